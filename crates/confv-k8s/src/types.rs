// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::api::core::v1::Pod;

use crate::secret::SecretMaterial;

/// The `data` entries of a ConfigMap.
pub type ConfigData = BTreeMap<String, String>;

/// The `data` entries of a Secret, already base64-decoded by the API layer.
pub type SecretData = BTreeMap<String, SecretMaterial>;

/// Kind of object read from the store, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
	ConfigMap,
	Secret,
	Pod,
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			ResourceKind::ConfigMap => "ConfigMap",
			ResourceKind::Secret => "Secret",
			ResourceKind::Pod => "Pod",
		};
		f.write_str(s)
	}
}

/// Runtime facts about a pod that identity strategies key on.
///
/// Fields are empty strings when the pod has not been scheduled yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodFacts {
	pub host_ip: String,
	pub node_name: String,
	pub pod_name: String,
}

impl PodFacts {
	pub fn new(
		host_ip: impl Into<String>,
		node_name: impl Into<String>,
		pod_name: impl Into<String>,
	) -> Self {
		Self {
			host_ip: host_ip.into(),
			node_name: node_name.into(),
			pod_name: pod_name.into(),
		}
	}
}

impl From<&Pod> for PodFacts {
	fn from(pod: &Pod) -> Self {
		Self {
			host_ip: pod
				.status
				.as_ref()
				.and_then(|s| s.host_ip.clone())
				.unwrap_or_default(),
			node_name: pod
				.spec
				.as_ref()
				.and_then(|s| s.node_name.clone())
				.unwrap_or_default(),
			pod_name: pod.metadata.name.clone().unwrap_or_default(),
		}
	}
}

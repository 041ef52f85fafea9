// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Mount options as handed over by the kubelet.

use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use confv_k8s::PodFacts;
use serde::Deserialize;

use crate::error::{ConfvError, ConfvResult};
use crate::reference::ResourceKeyRef;

/// Attribute on the values reference that overrides the top-level `identifiedBy`.
pub const IDENTIFIED_BY_ATTR: &str = "identifiedBy";

/// Which pod fact selects the values entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifiedBy {
	HostIp,
	NodeName,
	PodName,
}

impl IdentifiedBy {
	/// The pod fact this strategy keys on.
	pub fn select<'a>(&self, facts: &'a PodFacts) -> &'a str {
		match self {
			IdentifiedBy::HostIp => &facts.host_ip,
			IdentifiedBy::NodeName => &facts.node_name,
			IdentifiedBy::PodName => &facts.pod_name,
		}
	}
}

impl fmt::Display for IdentifiedBy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			IdentifiedBy::HostIp => "hostIP",
			IdentifiedBy::NodeName => "nodeName",
			IdentifiedBy::PodName => "podName",
		};
		f.write_str(s)
	}
}

impl FromStr for IdentifiedBy {
	type Err = ConfvError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"hostIP" => Ok(IdentifiedBy::HostIp),
			"nodeName" => Ok(IdentifiedBy::NodeName),
			"podName" => Ok(IdentifiedBy::PodName),
			other => Err(ConfvError::malformed(format!(
				"identifiedBy must be one of hostIP, nodeName or podName, got {other:?}"
			))),
		}
	}
}

/// Raw options JSON. Every value arrives as a string; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct RawMountOptions {
	#[serde(rename = "kubernetes.io/pod.name", default)]
	pod_name: String,
	#[serde(rename = "kubernetes.io/pod.namespace", default)]
	pod_namespace: String,
	#[serde(default)]
	template: String,
	#[serde(default)]
	values: String,
	#[serde(rename = "identifiedBy", default)]
	identified_by: String,
	#[serde(rename = "sharedSecret", default)]
	shared_secret: Option<String>,
	#[serde(rename = "targetFileName", default)]
	target_file_name: String,
}

/// Validated mount options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountOptions {
	pub pod_name: String,
	pub pod_namespace: String,
	pub template: ResourceKeyRef,
	pub values: ResourceKeyRef,
	/// Effective strategy: an inline `identifiedBy=` on the values reference
	/// wins over the top-level field.
	pub identified_by: IdentifiedBy,
	pub shared_secret: Option<String>,
	pub target_file_name: String,
}

impl MountOptions {
	/// Decode and validate the options JSON.
	pub fn decode(raw: &[u8]) -> ConfvResult<Self> {
		let raw: RawMountOptions = serde_json::from_slice(raw)
			.map_err(|e| ConfvError::malformed(format!("invalid options JSON: {e}")))?;
		Self::from_raw(raw)
	}

	fn from_raw(raw: RawMountOptions) -> ConfvResult<Self> {
		if raw.pod_name.is_empty() || raw.pod_namespace.is_empty() {
			return Err(ConfvError::malformed("pod name and namespace must be set"));
		}

		let template = ResourceKeyRef::parse(&raw.template);
		if template.resource_name.is_empty() {
			return Err(ConfvError::malformed("template must name a ConfigMap"));
		}

		let values = ResourceKeyRef::parse(&raw.values);
		if values.resource_name.is_empty() {
			return Err(ConfvError::malformed("values must name a ConfigMap"));
		}
		if values.key.is_some() {
			return Err(ConfvError::malformed(
				"values must not name a key; the key is chosen by identifiedBy",
			));
		}

		let identified_by = match values.attr(IDENTIFIED_BY_ATTR) {
			Some(inline) => inline.parse()?,
			None => raw.identified_by.parse()?,
		};

		let shared_secret = match raw.shared_secret {
			None => None,
			Some(name) if name.is_empty() => None,
			Some(name) if name.contains('/') => {
				return Err(ConfvError::malformed("sharedSecret must be a bare Secret name"));
			}
			Some(name) => Some(name),
		};

		validate_target_file_name(&raw.target_file_name)?;

		Ok(Self {
			pod_name: raw.pod_name,
			pod_namespace: raw.pod_namespace,
			template,
			values,
			identified_by,
			shared_secret,
			target_file_name: raw.target_file_name,
		})
	}
}

fn validate_target_file_name(name: &str) -> ConfvResult<()> {
	if name.is_empty() {
		return Err(ConfvError::malformed("targetFileName must be set"));
	}
	let mut components = Path::new(name).components();
	let single_normal = matches!(
		(components.next(), components.next()),
		(Some(Component::Normal(_)), None)
	);
	if !single_normal || name.contains('/') || name.contains('\\') {
		return Err(ConfvError::malformed(format!(
			"targetFileName {name:?} must be a plain file name"
		)));
	}
	Ok(())
}

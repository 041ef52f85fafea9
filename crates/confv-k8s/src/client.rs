// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::K8sError;
use crate::types::{ConfigData, PodFacts, SecretData};

/// Read-only view of the cluster store needed to render a mount.
///
/// The engine receives an implementation of this trait instead of building a
/// client itself, so tests can substitute [`crate::MemoryStore`].
#[async_trait]
pub trait StoreGateway: Send + Sync {
	/// Get the `data` entries of a ConfigMap.
	///
	/// Returns [`K8sError::NotFound`] when the ConfigMap does not exist and
	/// [`K8sError::Forbidden`] when the caller may not read it.
	async fn get_config_resource(&self, namespace: &str, name: &str)
		-> Result<ConfigData, K8sError>;

	/// Get the identity facts (host IP, node name, pod name) of a pod.
	async fn get_pod_facts(&self, namespace: &str, name: &str) -> Result<PodFacts, K8sError>;

	/// Get the decoded `data` entries of a Secret.
	async fn get_secret_resource(&self, namespace: &str, name: &str)
		-> Result<SecretData, K8sError>;
}

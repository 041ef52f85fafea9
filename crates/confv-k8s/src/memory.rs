// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;

use crate::client::StoreGateway;
use crate::error::K8sError;
use crate::secret::SecretMaterial;
use crate::types::{ConfigData, PodFacts, ResourceKind, SecretData};

type ObjectKey = (String, String);

/// In-memory store gateway for tests.
///
/// Objects are registered up front with the `with_*` builders. Lookups of
/// unregistered objects return [`K8sError::NotFound`]; objects registered
/// through [`MemoryStore::deny`] return [`K8sError::Forbidden`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	config_maps: BTreeMap<ObjectKey, ConfigData>,
	secrets: BTreeMap<ObjectKey, SecretData>,
	pods: BTreeMap<ObjectKey, PodFacts>,
	denied: HashSet<(ResourceKind, String, String)>,
	outage: Option<String>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config<K, V>(
		mut self,
		namespace: &str,
		name: &str,
		entries: impl IntoIterator<Item = (K, V)>,
	) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		let data = entries
			.into_iter()
			.map(|(k, v)| (k.into(), v.into()))
			.collect();
		self.config_maps.insert(key(namespace, name), data);
		self
	}

	pub fn with_secret<K, V>(
		mut self,
		namespace: &str,
		name: &str,
		entries: impl IntoIterator<Item = (K, V)>,
	) -> Self
	where
		K: Into<String>,
		V: Into<Vec<u8>>,
	{
		let data = entries
			.into_iter()
			.map(|(k, v)| (k.into(), SecretMaterial::new(v.into())))
			.collect();
		self.secrets.insert(key(namespace, name), data);
		self
	}

	pub fn with_pod(mut self, namespace: &str, facts: PodFacts) -> Self {
		self.pods.insert(key(namespace, &facts.pod_name), facts);
		self
	}

	/// Make reads of the given object fail as if RBAC forbade them.
	pub fn deny(mut self, kind: ResourceKind, namespace: &str, name: &str) -> Self {
		self.denied.insert((kind, namespace.to_string(), name.to_string()));
		self
	}

	/// Make every read fail with an API error, as when the API server is down.
	pub fn with_outage(mut self, message: &str) -> Self {
		self.outage = Some(message.to_string());
		self
	}

	fn check(&self, kind: ResourceKind, namespace: &str, name: &str) -> Result<(), K8sError> {
		if let Some(message) = &self.outage {
			return Err(K8sError::ApiError {
				message: message.clone(),
			});
		}
		if self
			.denied
			.contains(&(kind, namespace.to_string(), name.to_string()))
		{
			return Err(K8sError::Forbidden {
				kind,
				namespace: namespace.into(),
				name: name.into(),
				message: "denied by test store".into(),
			});
		}
		Ok(())
	}
}

fn key(namespace: &str, name: &str) -> ObjectKey {
	(namespace.to_string(), name.to_string())
}

fn not_found(kind: ResourceKind, namespace: &str, name: &str) -> K8sError {
	K8sError::NotFound {
		kind,
		namespace: namespace.into(),
		name: name.into(),
	}
}

#[async_trait]
impl StoreGateway for MemoryStore {
	async fn get_config_resource(
		&self,
		namespace: &str,
		name: &str,
	) -> Result<ConfigData, K8sError> {
		self.check(ResourceKind::ConfigMap, namespace, name)?;
		self
			.config_maps
			.get(&key(namespace, name))
			.cloned()
			.ok_or_else(|| not_found(ResourceKind::ConfigMap, namespace, name))
	}

	async fn get_pod_facts(&self, namespace: &str, name: &str) -> Result<PodFacts, K8sError> {
		self.check(ResourceKind::Pod, namespace, name)?;
		self
			.pods
			.get(&key(namespace, name))
			.cloned()
			.ok_or_else(|| not_found(ResourceKind::Pod, namespace, name))
	}

	async fn get_secret_resource(
		&self,
		namespace: &str,
		name: &str,
	) -> Result<SecretData, K8sError> {
		self.check(ResourceKind::Secret, namespace, name)?;
		self
			.secrets
			.get(&key(namespace, name))
			.cloned()
			.ok_or_else(|| not_found(ResourceKind::Secret, namespace, name))
	}
}

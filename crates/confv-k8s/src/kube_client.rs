// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::time::Duration;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{ConfigMap, Pod, Secret};
use kube::{api::Api, Client, Config};
use tracing::{debug, instrument};

use crate::client::StoreGateway;
use crate::error::K8sError;
use crate::secret::SecretMaterial;
use crate::types::{ConfigData, PodFacts, ResourceKind, SecretData};

/// How [`KubeStore`] reaches the API server.
#[derive(Debug, Clone, Default)]
pub struct KubeStoreOptions {
	/// Plain HTTP endpoint of a node-local API proxy (for example
	/// `kubectl proxy`). When unset, cluster configuration is inferred from
	/// the environment instead.
	pub proxy_url: Option<String>,
	pub connect_timeout: Option<Duration>,
	pub read_timeout: Option<Duration>,
}

/// Production store gateway implementation using the kube crate.
pub struct KubeStore {
	client: Client,
}

impl KubeStore {
	/// Build a client according to `opts`.
	///
	/// With a proxy URL the client talks to that endpoint without credentials,
	/// leaving authentication to the proxy. Without one, configuration is loaded
	/// from:
	/// 1. In-cluster service account (when running in K8s)
	/// 2. KUBECONFIG environment variable
	/// 3. ~/.kube/config
	pub async fn connect(opts: &KubeStoreOptions) -> Result<Self, K8sError> {
		let mut config = match &opts.proxy_url {
			Some(url) => {
				let uri: http::Uri = url.parse().map_err(|e: http::uri::InvalidUri| {
					K8sError::InvalidEndpoint {
						url: url.clone(),
						message: e.to_string(),
					}
				})?;
				Config::new(uri)
			}
			None => Config::infer().await.map_err(|e| K8sError::ClientConfig {
				message: e.to_string(),
			})?,
		};

		if opts.connect_timeout.is_some() {
			config.connect_timeout = opts.connect_timeout;
		}
		if opts.read_timeout.is_some() {
			config.read_timeout = opts.read_timeout;
		}

		debug!(
			cluster_url = %config.cluster_url,
			via_proxy = opts.proxy_url.is_some(),
			"K8s client initialized"
		);
		let client = Client::try_from(config)?;
		Ok(Self { client })
	}
}

#[async_trait]
impl StoreGateway for KubeStore {
	#[instrument(skip(self))]
	async fn get_config_resource(
		&self,
		namespace: &str,
		name: &str,
	) -> Result<ConfigData, K8sError> {
		let config_maps: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
		let cm = config_maps
			.get(name)
			.await
			.map_err(|e| K8sError::from_api(e, ResourceKind::ConfigMap, namespace, name))?;

		let data = cm.data.unwrap_or_default();
		debug!(entries = data.len(), "fetched ConfigMap");
		Ok(data)
	}

	#[instrument(skip(self))]
	async fn get_pod_facts(&self, namespace: &str, name: &str) -> Result<PodFacts, K8sError> {
		let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
		let pod = pods
			.get(name)
			.await
			.map_err(|e| K8sError::from_api(e, ResourceKind::Pod, namespace, name))?;

		let facts = PodFacts::from(&pod);
		debug!(
			host_ip = %facts.host_ip,
			node_name = %facts.node_name,
			"fetched pod facts"
		);
		Ok(facts)
	}

	#[instrument(skip(self))]
	async fn get_secret_resource(
		&self,
		namespace: &str,
		name: &str,
	) -> Result<SecretData, K8sError> {
		let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
		let secret = secrets
			.get(name)
			.await
			.map_err(|e| K8sError::from_api(e, ResourceKind::Secret, namespace, name))?;

		let data: SecretData = secret
			.data
			.unwrap_or_default()
			.into_iter()
			.map(|(key, value)| (key, SecretMaterial::new(value.0)))
			.collect();
		debug!(entries = data.len(), "fetched Secret");
		Ok(data)
	}
}

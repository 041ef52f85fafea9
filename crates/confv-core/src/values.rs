// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use confv_k8s::StoreGateway;
use tracing::{debug, instrument};

use crate::error::{classify_store_error, ConfvError, ConfvResult};
use crate::options::{IdentifiedBy, MountOptions, IDENTIFIED_BY_ATTR};
use crate::reference::ResourceKeyRef;
use crate::value::{parse_values_document, ValueTree};

/// Builds the value tree for a pod from its values ConfigMap and optional
/// shared secret.
pub struct ValuesResolver<'a> {
	store: &'a dyn StoreGateway,
}

impl<'a> ValuesResolver<'a> {
	pub fn new(store: &'a dyn StoreGateway) -> Self {
		Self { store }
	}

	#[instrument(skip(self, opts), fields(values = %reference, pod = %opts.pod_name))]
	pub async fn resolve(
		&self,
		reference: &ResourceKeyRef,
		opts: &MountOptions,
	) -> ConfvResult<ValueTree> {
		if reference.resource_name.is_empty() {
			return Err(ConfvError::malformed("values reference has no ConfigMap name"));
		}
		let identified_by = match reference.attr(IDENTIFIED_BY_ATTR) {
			Some(inline) => inline.parse::<IdentifiedBy>()?,
			None => opts.identified_by,
		};
		let namespace = opts.pod_namespace.as_str();
		let name = &reference.resource_name;

		let entries = self
			.store
			.get_config_resource(namespace, name)
			.await
			.map_err(|e| {
				classify_store_error(e, |source| ConfvError::ValuesResourceNotFound {
					namespace: namespace.to_string(),
					name: name.clone(),
					source,
				})
			})?;

		let facts = self
			.store
			.get_pod_facts(namespace, &opts.pod_name)
			.await
			.map_err(|e| {
				classify_store_error(e, |source| ConfvError::PodNotFound {
					namespace: namespace.to_string(),
					name: opts.pod_name.clone(),
					source,
				})
			})?;

		let key = identified_by.select(&facts);
		let document = entries
			.get(key)
			.ok_or_else(|| ConfvError::ValuesKeyNotFound {
				resource: name.clone(),
				key: key.to_string(),
				identified_by,
			})?;
		let values =
			parse_values_document(document).map_err(|message| ConfvError::InvalidValuesPayload {
				resource: name.clone(),
				key: key.to_string(),
				message,
			})?;
		debug!(%identified_by, key, entries = values.len(), "selected values");

		let mut tree = ValueTree::new(values);
		if let Some(secret_name) = opts.shared_secret.as_deref() {
			let secret = self
				.store
				.get_secret_resource(namespace, secret_name)
				.await
				.map_err(|e| {
					classify_store_error(e, |source| ConfvError::SecretResourceNotFound {
						namespace: namespace.to_string(),
						name: secret_name.to_string(),
						source,
					})
				})?;
			debug!(entries = secret.len(), "attached shared secret");
			tree = tree.with_shared_secret(secret);
		}

		Ok(tree)
	}
}

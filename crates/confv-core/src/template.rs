// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use confv_k8s::StoreGateway;
use tracing::{debug, instrument};

use crate::error::{classify_store_error, ConfvError, ConfvResult};
use crate::reference::ResourceKeyRef;

/// Fetches the template body named by a reference.
pub struct TemplateResolver<'a> {
	store: &'a dyn StoreGateway,
}

impl<'a> TemplateResolver<'a> {
	pub fn new(store: &'a dyn StoreGateway) -> Self {
		Self { store }
	}

	/// Return the template text.
	///
	/// Without a key the ConfigMap must hold exactly one entry.
	#[instrument(skip(self), fields(template = %reference))]
	pub async fn resolve(&self, reference: &ResourceKeyRef, namespace: &str) -> ConfvResult<String> {
		if reference.resource_name.is_empty() {
			return Err(ConfvError::malformed("template reference has no ConfigMap name"));
		}
		let name = &reference.resource_name;

		let entries = self
			.store
			.get_config_resource(namespace, name)
			.await
			.map_err(|e| {
				classify_store_error(e, |source| ConfvError::TemplateResourceNotFound {
					namespace: namespace.to_string(),
					name: name.clone(),
					source,
				})
			})?;

		let body = match &reference.key {
			Some(key) => entries
				.get(key)
				.cloned()
				.ok_or_else(|| ConfvError::TemplateKeyNotFound {
					resource: name.clone(),
					key: key.clone(),
				})?,
			None => {
				let count = entries.len();
				let mut bodies = entries.into_values();
				match (bodies.next(), bodies.next()) {
					(Some(body), None) => body,
					_ => {
						return Err(ConfvError::AmbiguousTemplate {
							resource: name.clone(),
							entries: count,
						})
					}
				}
			}
		};

		debug!(bytes = body.len(), "resolved template");
		Ok(body)
	}
}

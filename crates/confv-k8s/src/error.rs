// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

use crate::types::ResourceKind;

/// Result type alias for store operations.
pub type K8sResult<T> = Result<T, K8sError>;

/// Errors that can occur while reading from the cluster store.
#[derive(Error, Debug)]
pub enum K8sError {
	#[error("{kind} {namespace}/{name} not found")]
	NotFound {
		kind: ResourceKind,
		namespace: String,
		name: String,
	},

	#[error("access to {kind} {namespace}/{name} denied: {message}")]
	Forbidden {
		kind: ResourceKind,
		namespace: String,
		name: String,
		message: String,
	},

	#[error("K8s API error: {message}")]
	ApiError { message: String },

	#[error("invalid API server endpoint {url}: {message}")]
	InvalidEndpoint { url: String, message: String },

	#[error("K8s client configuration error: {message}")]
	ClientConfig { message: String },
}

impl K8sError {
	/// True when the object is missing or unreadable for this caller.
	///
	/// The engine treats both the same way: the named resource cannot be used.
	pub fn is_missing(&self) -> bool {
		matches!(self, K8sError::NotFound { .. } | K8sError::Forbidden { .. })
	}

	pub(crate) fn from_api(err: kube::Error, kind: ResourceKind, namespace: &str, name: &str) -> Self {
		match err {
			kube::Error::Api(resp) if resp.code == 404 => K8sError::NotFound {
				kind,
				namespace: namespace.into(),
				name: name.into(),
			},
			kube::Error::Api(resp) if resp.code == 403 => K8sError::Forbidden {
				kind,
				namespace: namespace.into(),
				name: name.into(),
				message: resp.message,
			},
			e => e.into(),
		}
	}
}

impl From<kube::Error> for K8sError {
	fn from(err: kube::Error) -> Self {
		K8sError::ApiError {
			message: err.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use kube::core::ErrorResponse;

	fn api_error(code: u16) -> kube::Error {
		kube::Error::Api(ErrorResponse {
			status: "Failure".to_string(),
			message: format!("status {code}"),
			reason: String::new(),
			code,
		})
	}

	#[test]
	fn not_found_status_maps_to_not_found() {
		let err = K8sError::from_api(api_error(404), ResourceKind::ConfigMap, "ns", "tpl");
		assert!(matches!(err, K8sError::NotFound { .. }));
		assert!(err.is_missing());
		assert_eq!(err.to_string(), "ConfigMap ns/tpl not found");
	}

	#[test]
	fn forbidden_status_maps_to_forbidden() {
		let err = K8sError::from_api(api_error(403), ResourceKind::Secret, "ns", "creds");
		assert!(matches!(err, K8sError::Forbidden { .. }));
		assert!(err.is_missing());
	}

	#[test]
	fn other_status_is_api_error() {
		let err = K8sError::from_api(api_error(500), ResourceKind::Pod, "ns", "p1");
		assert!(matches!(err, K8sError::ApiError { .. }));
		assert!(!err.is_missing());
	}
}

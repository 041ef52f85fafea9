// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration validation rules.

use tracing::warn;

use crate::runtime::{DriverConfig, StoreMode};
use crate::ConfigError;

/// Validate the configuration.
pub fn validate_config(config: &DriverConfig) -> Result<(), ConfigError> {
	let store = &config.store;

	if store.mode == StoreMode::Proxy {
		if store.proxy_url.is_empty() {
			return Err(ConfigError::invalid_value(
				"store.proxy_url",
				"proxy_url cannot be empty in proxy mode",
			));
		}
		if store.proxy_url.starts_with("unix:") {
			return Err(ConfigError::invalid_value(
				"store.proxy_url",
				"Unix-socket proxies are not supported; run `kubectl proxy --port=8001` and use http://127.0.0.1:8001",
			));
		}
		if !store.proxy_url.starts_with("http://") && !store.proxy_url.starts_with("https://") {
			return Err(ConfigError::invalid_value(
				"store.proxy_url",
				"proxy_url must be an http:// or https:// URL",
			));
		}
	} else if store.proxy_url != crate::runtime::DEFAULT_PROXY_URL {
		warn!(
			proxy_url = %store.proxy_url,
			"store.proxy_url is ignored in kubeconfig mode"
		);
	}

	if store.connect_timeout.is_zero() {
		return Err(ConfigError::validation("store.connect_timeout_secs must be > 0"));
	}
	if store.read_timeout.is_zero() {
		return Err(ConfigError::validation("store.read_timeout_secs must be > 0"));
	}

	Ok(())
}

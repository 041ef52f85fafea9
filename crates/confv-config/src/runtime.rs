// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration types with resolved defaults.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::layer::{ConfigLayer, LoggingLayer, StoreLayer};
use crate::ConfigError;

/// Default endpoint of the node-local API proxy.
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:8001";

/// The final, validated driver configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DriverConfig {
	pub store: StoreConfig,
	pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreConfig {
	pub mode: StoreMode,
	pub proxy_url: String,
	#[serde(with = "duration_secs")]
	pub connect_timeout: Duration,
	#[serde(with = "duration_secs")]
	pub read_timeout: Duration,
}

/// How the driver reaches the API server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
	/// Talk plain HTTP to a node-local API proxy that handles authentication.
	#[default]
	Proxy,
	/// Use in-cluster or kubeconfig credentials directly.
	Kubeconfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Error,
	#[default]
	Warn,
	Info,
	Debug,
	Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Pretty,
	Json,
	#[default]
	Compact,
}

mod duration_secs {
	use serde::Serializer;
	use std::time::Duration;

	pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u64(duration.as_secs())
	}
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self {
			mode: StoreMode::Proxy,
			proxy_url: DEFAULT_PROXY_URL.to_string(),
			connect_timeout: Duration::from_secs(5),
			read_timeout: Duration::from_secs(30),
		}
	}
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: LogLevel::Warn,
			format: LogFormat::Compact,
		}
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			LogLevel::Error => "error",
			LogLevel::Warn => "warn",
			LogLevel::Info => "info",
			LogLevel::Debug => "debug",
			LogLevel::Trace => "trace",
		};
		f.write_str(s)
	}
}

impl DriverConfig {
	/// Build runtime config from a merged layer.
	pub fn from_layer(layer: ConfigLayer) -> Result<Self, ConfigError> {
		Ok(Self {
			store: build_store_config(layer.store)?,
			logging: build_logging_config(layer.logging)?,
		})
	}
}

fn build_store_config(layer: Option<StoreLayer>) -> Result<StoreConfig, ConfigError> {
	let layer = layer.unwrap_or_default();
	let defaults = StoreConfig::default();
	Ok(StoreConfig {
		mode: parse_store_mode(layer.mode.as_deref())?,
		proxy_url: layer.proxy_url.unwrap_or(defaults.proxy_url),
		connect_timeout: layer
			.connect_timeout_secs
			.map(Duration::from_secs)
			.unwrap_or(defaults.connect_timeout),
		read_timeout: layer
			.read_timeout_secs
			.map(Duration::from_secs)
			.unwrap_or(defaults.read_timeout),
	})
}

fn build_logging_config(layer: Option<LoggingLayer>) -> Result<LoggingConfig, ConfigError> {
	let layer = layer.unwrap_or_default();
	Ok(LoggingConfig {
		level: parse_log_level(layer.level.as_deref())?,
		format: parse_log_format(layer.format.as_deref())?,
	})
}

fn parse_store_mode(s: Option<&str>) -> Result<StoreMode, ConfigError> {
	match s {
		None | Some("proxy") => Ok(StoreMode::Proxy),
		Some("kubeconfig") => Ok(StoreMode::Kubeconfig),
		Some(other) => Err(ConfigError::invalid_value(
			"store.mode",
			format!("expected proxy or kubeconfig, got {other:?}"),
		)),
	}
}

fn parse_log_level(s: Option<&str>) -> Result<LogLevel, ConfigError> {
	match s {
		Some("error") => Ok(LogLevel::Error),
		None | Some("warn") => Ok(LogLevel::Warn),
		Some("info") => Ok(LogLevel::Info),
		Some("debug") => Ok(LogLevel::Debug),
		Some("trace") => Ok(LogLevel::Trace),
		Some(other) => Err(ConfigError::invalid_value(
			"logging.level",
			format!("unknown level {other:?}"),
		)),
	}
}

fn parse_log_format(s: Option<&str>) -> Result<LogFormat, ConfigError> {
	match s {
		Some("json") => Ok(LogFormat::Json),
		None | Some("compact") => Ok(LogFormat::Compact),
		Some("pretty") => Ok(LogFormat::Pretty),
		Some(other) => Err(ConfigError::invalid_value(
			"logging.format",
			format!("unknown format {other:?}"),
		)),
	}
}

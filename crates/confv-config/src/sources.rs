// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: files, environment, CLI, defaults.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::layer::*;
use crate::ConfigError;

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	SystemFile = 20,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	/// Precedence level
	fn precedence(&self) -> Precedence;

	/// Load configuration layer from this source
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		// Defaults are applied when the merged layer is finalized
		Ok(ConfigLayer::default())
	}
}

/// File-based configuration source (TOML).
pub struct FileSource {
	path: PathBuf,
	required: bool,
}

impl FileSource {
	/// Optional system config; a missing file is skipped.
	pub fn system(path: PathBuf) -> Self {
		Self {
			path,
			required: false,
		}
	}

	/// Config file named on the command line; it must exist.
	pub fn required(path: PathBuf) -> Self {
		Self {
			path,
			required: true,
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		if self.required {
			"cli-config-file"
		} else {
			"system-config"
		}
	}
	fn precedence(&self) -> Precedence {
		Precedence::SystemFile
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			if self.required {
				return Err(ConfigError::MissingFile(self.path.clone()));
			}
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");

		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::Io {
			path: self.path.clone(),
			source: e,
		})?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!(source = self.name(), "parsed config layer");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Recognized variables: `CONFV_STORE_MODE`, `CONFV_PROXY_URL`,
/// `CONFV_CONNECT_TIMEOUT_SECS`, `CONFV_READ_TIMEOUT_SECS`, `CONFV_LOG_LEVEL`,
/// `CONFV_LOG_FORMAT`.
pub struct EnvSource {
	vars: Vec<(String, String)>,
}

impl EnvSource {
	/// Snapshot of the current process environment.
	pub fn process() -> Self {
		Self::from_vars(std::env::vars())
	}

	pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
		Self {
			vars: vars
				.into_iter()
				.filter(|(k, _)| k.starts_with("CONFV_"))
				.collect(),
		}
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let mut layer = ConfigLayer::default();

		for (key, value) in &self.vars {
			let value = value.trim().to_string();
			if value.is_empty() {
				continue;
			}

			trace!(key = %key, "processing env var");

			match key.as_str() {
				"CONFV_STORE_MODE" => {
					layer.store.get_or_insert_with(StoreLayer::default).mode = Some(value);
				}
				"CONFV_PROXY_URL" => {
					layer.store.get_or_insert_with(StoreLayer::default).proxy_url = Some(value);
				}
				"CONFV_CONNECT_TIMEOUT_SECS" => {
					layer
						.store
						.get_or_insert_with(StoreLayer::default)
						.connect_timeout_secs = Some(parse_secs(key, &value)?);
				}
				"CONFV_READ_TIMEOUT_SECS" => {
					layer
						.store
						.get_or_insert_with(StoreLayer::default)
						.read_timeout_secs = Some(parse_secs(key, &value)?);
				}
				"CONFV_LOG_LEVEL" => {
					layer.logging.get_or_insert_with(LoggingLayer::default).level = Some(value);
				}
				"CONFV_LOG_FORMAT" => {
					layer.logging.get_or_insert_with(LoggingLayer::default).format = Some(value);
				}
				_ => {
					trace!(key = %key, "ignoring unknown env var");
				}
			}
		}

		Ok(layer)
	}
}

fn parse_secs(key: &str, value: &str) -> Result<u64, ConfigError> {
	value
		.parse()
		.map_err(|_| ConfigError::invalid_value(key, format!("expected seconds, got {value:?}")))
}

/// CLI argument overrides.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub config_file: Option<PathBuf>,
	pub store_mode: Option<String>,
	pub proxy_url: Option<String>,
	pub log_level: Option<String>,
	pub log_format: Option<String>,
}

/// Command line flags source.
pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let mut layer = ConfigLayer::default();

		if let Some(ref mode) = self.overrides.store_mode {
			layer.store.get_or_insert_with(StoreLayer::default).mode = Some(mode.clone());
		}

		if let Some(ref url) = self.overrides.proxy_url {
			layer.store.get_or_insert_with(StoreLayer::default).proxy_url = Some(url.clone());
		}

		if let Some(ref level) = self.overrides.log_level {
			layer.logging.get_or_insert_with(LoggingLayer::default).level = Some(level.clone());
		}

		if let Some(ref format) = self.overrides.log_format {
			layer.logging.get_or_insert_with(LoggingLayer::default).format = Some(format.clone());
		}

		Ok(layer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Cli > Precedence::Environment);
		assert!(Precedence::Environment > Precedence::SystemFile);
		assert!(Precedence::SystemFile > Precedence::Defaults);
	}

	#[test]
	fn env_source_reads_confv_vars() {
		let source = EnvSource::from_vars(vars(&[
			("CONFV_PROXY_URL", "http://10.0.0.1:8001"),
			("CONFV_READ_TIMEOUT_SECS", " 12 "),
			("CONFV_LOG_LEVEL", "debug"),
			("HOME", "/root"),
		]));

		let layer = source.load().unwrap();
		let store = layer.store.unwrap();
		assert_eq!(store.proxy_url.as_deref(), Some("http://10.0.0.1:8001"));
		assert_eq!(store.read_timeout_secs, Some(12));
		assert_eq!(layer.logging.unwrap().level.as_deref(), Some("debug"));
	}

	#[test]
	fn env_source_rejects_non_numeric_timeouts() {
		let source = EnvSource::from_vars(vars(&[("CONFV_CONNECT_TIMEOUT_SECS", "soon")]));
		let err = source.load().unwrap_err();
		assert!(err.to_string().contains("CONFV_CONNECT_TIMEOUT_SECS"));
	}

	#[test]
	fn env_source_skips_empty_values() {
		let source = EnvSource::from_vars(vars(&[("CONFV_LOG_FORMAT", "  ")]));
		assert!(source.load().unwrap().logging.is_none());
	}

	#[test]
	fn missing_system_file_is_skipped() {
		let source = FileSource::system(PathBuf::from("/nonexistent/confv/config.toml"));
		let layer = source.load().unwrap();
		assert!(layer.store.is_none());
	}

	#[test]
	fn missing_required_file_is_an_error() {
		let source = FileSource::required(PathBuf::from("/nonexistent/confv/config.toml"));
		assert!(matches!(source.load(), Err(ConfigError::MissingFile(_))));
	}

	#[test]
	fn file_source_parses_toml() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[store]\nproxy_url = \"http://localhost:9000\"").unwrap();

		let source = FileSource::required(file.path().to_path_buf());
		let layer = source.load().unwrap();
		assert_eq!(
			layer.store.unwrap().proxy_url.as_deref(),
			Some("http://localhost:9000")
		);
	}

	#[test]
	fn file_source_reports_parse_errors() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[store\nproxy_url = ").unwrap();

		let source = FileSource::required(file.path().to_path_buf());
		assert!(matches!(source.load(), Err(ConfigError::TomlParse { .. })));
	}

	#[test]
	fn cli_source_sets_only_given_flags() {
		let source = CliSource::new(CliOverrides {
			log_format: Some("json".to_string()),
			..Default::default()
		});

		let layer = source.load().unwrap();
		assert!(layer.store.is_none());
		assert_eq!(layer.logging.unwrap().format.as_deref(), Some("json"));
	}
}

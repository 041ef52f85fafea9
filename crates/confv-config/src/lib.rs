// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the confv volume driver.
//!
//! The driver runs as a short-lived process started by the kubelet, so its
//! configuration is small: how to reach the API server and how to log. Values
//! are layered from built-in defaults, a TOML file, `CONFV_*` environment
//! variables and command line flags, in increasing precedence.

pub mod error;
pub mod layer;
pub mod registry;
pub mod runtime;
pub mod sources;
pub mod validation;

use std::path::PathBuf;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use registry::ConfigRegistry;
pub use runtime::{DriverConfig, LogFormat, LogLevel, LoggingConfig, StoreConfig, StoreMode};
pub use sources::{CliOverrides, ConfigSource, Precedence};

/// Default location of the driver configuration file.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/confv/config.toml";

/// Load configuration from all sources with CLI overrides applied last.
///
/// An explicit `config_file` replaces the system file and must exist.
pub fn load_config_with_cli(cli: CliOverrides) -> Result<DriverConfig, ConfigError> {
	let mut registry = ConfigRegistry::new();

	registry.register(Box::new(sources::DefaultsSource));
	match &cli.config_file {
		Some(path) => registry.register(Box::new(sources::FileSource::required(path.clone()))),
		None => registry.register(Box::new(sources::FileSource::system(PathBuf::from(
			SYSTEM_CONFIG_FILE,
		)))),
	}
	registry.register(Box::new(sources::EnvSource::process()));
	registry.register(Box::new(sources::CliSource::new(cli)));

	registry.load()
}

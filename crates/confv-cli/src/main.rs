// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod status;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use confv_config::{
	load_config_with_cli, CliOverrides, DriverConfig, LogFormat, LogLevel, LoggingConfig,
	StoreConfig, StoreMode,
};
use confv_core::MountLifecycle;
use confv_k8s::{KubeStore, KubeStoreOptions};

use crate::status::DriverStatus;

/// confv - FlexVolume driver that renders per-pod config files
#[derive(Parser, Debug)]
#[command(name = "confv", version, about, long_about = None)]
struct Args {
	/// Path to custom configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	/// How to reach the API server: proxy or kubeconfig (overrides config)
	#[arg(long)]
	store_mode: Option<String>,

	/// API proxy URL used in proxy mode (overrides config)
	#[arg(long)]
	proxy_url: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Initialize the driver
	Init,
	/// Render the config file into the mount dir
	Mount {
		/// Directory the kubelet expects populated
		mount_dir: PathBuf,
		/// JSON mount options
		options: String,
	},
	/// Remove the mount dir
	Unmount {
		/// Directory to remove
		mount_dir: PathBuf,
	},
	/// Any other driver call, e.g. attach or getvolumename
	#[command(external_subcommand)]
	Unsupported(Vec<String>),
}

enum Operation<'a> {
	Mount { mount_dir: &'a Path, options: &'a str },
	Unmount { mount_dir: &'a Path },
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		Self {
			config_file: args.config.clone(),
			store_mode: args.store_mode.clone(),
			proxy_url: args.proxy_url.clone(),
			log_level: args.log_level.clone(),
			log_format: if args.json_logs {
				Some("json".to_string())
			} else {
				None
			},
		}
	}
}

fn log_level_to_tracing(level: LogLevel) -> tracing::Level {
	match level {
		LogLevel::Trace => tracing::Level::TRACE,
		LogLevel::Debug => tracing::Level::DEBUG,
		LogLevel::Info => tracing::Level::INFO,
		LogLevel::Warn => tracing::Level::WARN,
		LogLevel::Error => tracing::Level::ERROR,
	}
}

/// Logs go to stderr; stdout carries only the status object.
fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("confv={}", log_level_to_tracing(logging.level))));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

fn store_options(store: &StoreConfig) -> KubeStoreOptions {
	KubeStoreOptions {
		proxy_url: match store.mode {
			StoreMode::Proxy => Some(store.proxy_url.clone()),
			StoreMode::Kubeconfig => None,
		},
		connect_timeout: Some(store.connect_timeout),
		read_timeout: Some(store.read_timeout),
	}
}

async fn mount(config: &DriverConfig, mount_dir: &Path, options: &str) -> Result<DriverStatus> {
	let store = KubeStore::connect(&store_options(&config.store))
		.await
		.context("failed to build Kubernetes client")?;
	let lifecycle = MountLifecycle::new(Arc::new(store));

	Ok(match lifecycle.mount(mount_dir, options.as_bytes()).await {
		Ok(path) => {
			debug!(path = %path.display(), "mount complete");
			DriverStatus::success()
		}
		Err(e) => {
			warn!(step = %e.step, error = %e, "mount failed");
			DriverStatus::failure(e.to_string())
		}
	})
}

async fn unmount(mount_dir: &Path) -> DriverStatus {
	match MountLifecycle::unmount(mount_dir).await {
		Ok(()) => DriverStatus::success(),
		Err(e) => {
			warn!(step = %e.step, error = %e, "unmount failed");
			DriverStatus::failure(e.to_string())
		}
	}
}

fn execute(args: &Args, operation: Operation<'_>) -> Result<DriverStatus> {
	let config =
		load_config_with_cli(CliOverrides::from(args)).context("failed to load configuration")?;

	init_tracing(&config.logging);
	info!(mode = ?config.store.mode, "starting confv");

	let runtime = tokio::runtime::Builder::new_current_thread()
		.enable_all()
		.build()
		.context("failed to start async runtime")?;

	match operation {
		Operation::Mount { mount_dir, options } => runtime.block_on(mount(&config, mount_dir, options)),
		Operation::Unmount { mount_dir } => Ok(runtime.block_on(unmount(mount_dir))),
	}
}

fn run(args: &Args) -> DriverStatus {
	let operation = match &args.command {
		Command::Init => return DriverStatus::initialized(MountLifecycle::init()),
		Command::Unsupported(argv) => {
			return DriverStatus::not_supported(argv.first().map(String::as_str).unwrap_or("command"))
		}
		Command::Mount { mount_dir, options } => Operation::Mount { mount_dir, options },
		Command::Unmount { mount_dir } => Operation::Unmount { mount_dir },
	};

	execute(args, operation).unwrap_or_else(|e| {
		error!(error = %format!("{e:#}"), "driver setup failed");
		DriverStatus::failure(format!("{e:#}"))
	})
}

fn main() -> ExitCode {
	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(e) if !e.use_stderr() => {
			let _ = e.print();
			return ExitCode::SUCCESS;
		}
		Err(e) => {
			let status = DriverStatus::failure(e.to_string().trim().to_string());
			println!("{}", status.to_json());
			return status.exit_code();
		}
	};

	let status = run(&args);
	println!("{}", status.to_json());
	status.exit_code()
}

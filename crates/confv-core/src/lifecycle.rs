// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The init, mount and unmount entry points of the driver.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use confv_k8s::StoreGateway;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

use crate::error::{ConfvError, ConfvResult, Step, StepError};
use crate::options::MountOptions;
use crate::render::RenderEngine;
use crate::template::TemplateResolver;
use crate::values::ValuesResolver;

/// Driver capabilities reported by `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
	pub attach: bool,
}

/// Drives a mount from raw options to a rendered file on disk.
pub struct MountLifecycle {
	store: Arc<dyn StoreGateway>,
	engine: RenderEngine,
}

impl MountLifecycle {
	pub fn new(store: Arc<dyn StoreGateway>) -> Self {
		Self {
			store,
			engine: RenderEngine::new(),
		}
	}

	/// The driver never needs a separate attach phase.
	pub fn init() -> Capabilities {
		Capabilities { attach: false }
	}

	/// Resolve, render and write the config file for a mount.
	///
	/// Returns the path of the written file. On failure nothing is left at the
	/// target path beyond what a previous successful mount wrote.
	#[instrument(skip_all, fields(mount_dir = %mount_dir.display()))]
	pub async fn mount(&self, mount_dir: &Path, raw_options: &[u8]) -> Result<PathBuf, StepError> {
		let opts = MountOptions::decode(raw_options)
			.map_err(|e| StepError::new(Step::DecodeOptions, e))?;
		debug!(
			pod = %opts.pod_name,
			namespace = %opts.pod_namespace,
			template = %opts.template,
			values = %opts.values,
			identified_by = %opts.identified_by,
			"decoded mount options"
		);

		let rendered = self.render(&opts).await?;

		tokio::fs::create_dir_all(mount_dir)
			.await
			.map_err(|e| StepError::new(Step::PrepareMountDir, ConfvError::filesystem(mount_dir, e)))?;

		let target = mount_dir.join(&opts.target_file_name);
		write_atomically(&target, &rendered)
			.await
			.map_err(|e| StepError::new(Step::WriteConfig, e))?;

		info!(
			path = %target.display(),
			bytes = rendered.len(),
			pod = %opts.pod_name,
			"mounted rendered config"
		);
		Ok(target)
	}

	/// Resolve the template and values concurrently, then render.
	pub async fn render(&self, opts: &MountOptions) -> Result<Vec<u8>, StepError> {
		let templates = TemplateResolver::new(self.store.as_ref());
		let values = ValuesResolver::new(self.store.as_ref());

		let (template, tree) = tokio::try_join!(
			async {
				templates
					.resolve(&opts.template, &opts.pod_namespace)
					.await
					.map_err(|e| StepError::new(Step::ResolveTemplate, e))
			},
			async {
				values
					.resolve(&opts.values, opts)
					.await
					.map_err(|e| StepError::new(Step::ResolveValues, e))
			},
		)?;

		self
			.engine
			.render(&template, &tree)
			.map_err(|e| StepError::new(Step::Render, e))
	}

	/// Remove the mount path and everything under it. A regular file or
	/// symlink at the path is removed as well; a missing path is not an error.
	#[instrument(skip_all, fields(mount_dir = %mount_dir.display()))]
	pub async fn unmount(mount_dir: &Path) -> Result<(), StepError> {
		let removed = match tokio::fs::symlink_metadata(mount_dir).await {
			Ok(meta) if meta.is_dir() => tokio::fs::remove_dir_all(mount_dir).await,
			Ok(_) => tokio::fs::remove_file(mount_dir).await,
			Err(e) => Err(e),
		};
		match removed {
			Ok(()) => {
				info!("removed mount dir");
				Ok(())
			}
			Err(e) if e.kind() == ErrorKind::NotFound => {
				debug!("mount dir already absent");
				Ok(())
			}
			Err(e) => Err(StepError::new(
				Step::RemoveMountDir,
				ConfvError::filesystem(mount_dir, e),
			)),
		}
	}
}

/// Write `contents` to a hidden sibling of `target`, sync it, then rename it
/// into place. The temporary file is removed if any step fails.
async fn write_atomically(target: &Path, contents: &[u8]) -> ConfvResult<()> {
	let tmp_path = temp_path_for(target);

	let result = async {
		let mut file = open_for_write(&tmp_path).await?;
		file.write_all(contents).await?;
		file.flush().await?;
		file.sync_all().await?;
		drop(file);
		tokio::fs::rename(&tmp_path, target).await
	}
	.await;

	if let Err(e) = result {
		if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
			if cleanup.kind() != ErrorKind::NotFound {
				warn!(path = %tmp_path.display(), error = %cleanup, "failed to remove temp file");
			}
		}
		return Err(ConfvError::filesystem(target, e));
	}
	Ok(())
}

fn temp_path_for(target: &Path) -> PathBuf {
	let name = target
		.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.unwrap_or_default();
	target.with_file_name(format!(".{name}.confv-tmp"))
}

async fn open_for_write(path: &Path) -> std::io::Result<tokio::fs::File> {
	let file = tokio::fs::OpenOptions::new()
		.write(true)
		.create(true)
		.truncate(true)
		.open(path)
		.await?;
	#[cfg(unix)]
	{
		use std::os::unix::fs::PermissionsExt;
		file
			.set_permissions(std::fs::Permissions::from_mode(0o644))
			.await?;
	}
	Ok(file)
}

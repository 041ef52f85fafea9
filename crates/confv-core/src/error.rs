// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fmt;
use std::path::PathBuf;

use confv_k8s::K8sError;
use thiserror::Error;

use crate::options::IdentifiedBy;

/// Result type alias for engine operations.
pub type ConfvResult<T> = Result<T, ConfvError>;

/// Errors produced while resolving, rendering or writing a mount.
#[derive(Debug, Error)]
pub enum ConfvError {
	#[error("malformed options: {0}")]
	MalformedOptions(String),

	#[error(
		"template ConfigMap {resource} has {entries} entries; name one with <configmap>/<key>"
	)]
	AmbiguousTemplate { resource: String, entries: usize },

	#[error("template ConfigMap {namespace}/{name} is unavailable: {source}")]
	TemplateResourceNotFound {
		namespace: String,
		name: String,
		#[source]
		source: K8sError,
	},

	#[error("template key {key} not found in ConfigMap {resource}")]
	TemplateKeyNotFound { resource: String, key: String },

	#[error("values ConfigMap {namespace}/{name} is unavailable: {source}")]
	ValuesResourceNotFound {
		namespace: String,
		name: String,
		#[source]
		source: K8sError,
	},

	#[error("cannot find config values for {key:?} ({identified_by}) in ConfigMap {resource}")]
	ValuesKeyNotFound {
		resource: String,
		key: String,
		identified_by: IdentifiedBy,
	},

	#[error("secret {namespace}/{name} is unavailable: {source}")]
	SecretResourceNotFound {
		namespace: String,
		name: String,
		#[source]
		source: K8sError,
	},

	#[error("pod {namespace}/{name} is unavailable: {source}")]
	PodNotFound {
		namespace: String,
		name: String,
		#[source]
		source: K8sError,
	},

	#[error("invalid values in ConfigMap {resource} key {key:?}: {message}")]
	InvalidValuesPayload {
		resource: String,
		key: String,
		message: String,
	},

	#[error("template parse error: {0}")]
	TemplateParseError(#[source] minijinja::Error),

	#[error("template execution error: {0}")]
	TemplateExecError(#[source] minijinja::Error),

	#[error("filesystem error at {path}: {source}")]
	FilesystemError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("store error: {0}")]
	Store(#[from] K8sError),
}

impl ConfvError {
	pub(crate) fn malformed(msg: impl Into<String>) -> Self {
		Self::MalformedOptions(msg.into())
	}

	pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::FilesystemError {
			path: path.into(),
			source,
		}
	}
}

/// Map a store error to `on_missing` when the object is missing or forbidden,
/// and to [`ConfvError::Store`] otherwise.
pub(crate) fn classify_store_error(
	err: K8sError,
	on_missing: impl FnOnce(K8sError) -> ConfvError,
) -> ConfvError {
	if err.is_missing() {
		on_missing(err)
	} else {
		ConfvError::Store(err)
	}
}

/// A lifecycle step, used to tell the caller where a mount or unmount failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	DecodeOptions,
	ResolveTemplate,
	ResolveValues,
	Render,
	PrepareMountDir,
	WriteConfig,
	RemoveMountDir,
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Step::DecodeOptions => "decode options",
			Step::ResolveTemplate => "resolve template",
			Step::ResolveValues => "resolve values",
			Step::Render => "render",
			Step::PrepareMountDir => "prepare mount dir",
			Step::WriteConfig => "write config",
			Step::RemoveMountDir => "remove mount dir",
		};
		f.write_str(s)
	}
}

/// An engine error tagged with the lifecycle step that produced it.
#[derive(Debug, Error)]
#[error("{step}: {source}")]
pub struct StepError {
	pub step: Step,
	#[source]
	pub source: ConfvError,
}

impl StepError {
	pub fn new(step: Step, source: ConfvError) -> Self {
		Self { step, source }
	}

	pub fn error(&self) -> &ConfvError {
		&self.source
	}
}

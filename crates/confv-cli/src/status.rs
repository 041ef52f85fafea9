// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The JSON status object printed for every driver call.

use std::process::ExitCode;

use confv_core::Capabilities;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusKind {
	Success,
	Failure,
	#[serde(rename = "Not supported")]
	NotSupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverStatus {
	pub status: StatusKind,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub capabilities: Option<Capabilities>,
}

impl DriverStatus {
	pub fn success() -> Self {
		Self {
			status: StatusKind::Success,
			message: None,
			capabilities: None,
		}
	}

	pub fn initialized(capabilities: Capabilities) -> Self {
		Self {
			capabilities: Some(capabilities),
			..Self::success()
		}
	}

	pub fn failure(message: impl Into<String>) -> Self {
		Self {
			status: StatusKind::Failure,
			message: Some(message.into()),
			capabilities: None,
		}
	}

	pub fn not_supported(command: &str) -> Self {
		Self {
			status: StatusKind::NotSupported,
			message: Some(format!("{command} is not supported by confv")),
			capabilities: None,
		}
	}

	pub fn is_success(&self) -> bool {
		self.status == StatusKind::Success
	}

	pub fn exit_code(&self) -> ExitCode {
		if self.is_success() {
			ExitCode::SUCCESS
		} else {
			ExitCode::FAILURE
		}
	}

	pub fn to_json(&self) -> String {
		serde_json::to_string(self).unwrap_or_else(|e| {
			format!(
				r#"{{"status":"Failure","message":"cannot encode status: {}"}}"#,
				e.to_string().replace(['"', '\\'], "'")
			)
		})
	}
}

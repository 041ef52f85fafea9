// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Holder for Secret entry bytes.
//!
//! [`SecretMaterial`] keeps the raw bytes of one Secret entry. It never prints
//! its content through `Debug` or `Display`, and the buffer is zeroed when the
//! value is dropped. Callers read the bytes through [`SecretMaterial::expose`]
//! or [`SecretMaterial::to_utf8_lossy`].

use std::fmt;

use zeroize::Zeroize;

/// The redaction placeholder used in all output.
pub const REDACTED: &str = "[REDACTED]";

#[derive(Zeroize)]
#[zeroize(drop)]
pub struct SecretMaterial {
	bytes: Vec<u8>,
}

impl SecretMaterial {
	pub fn new(bytes: Vec<u8>) -> Self {
		Self { bytes }
	}

	/// Explicitly access the raw bytes.
	pub fn expose(&self) -> &[u8] {
		&self.bytes
	}

	/// Decode the bytes as UTF-8, replacing invalid sequences with U+FFFD.
	///
	/// Secret entries are binary-safe, so this never fails.
	pub fn to_utf8_lossy(&self) -> String {
		String::from_utf8_lossy(&self.bytes).into_owned()
	}

	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}
}

impl Clone for SecretMaterial {
	fn clone(&self) -> Self {
		Self {
			bytes: self.bytes.clone(),
		}
	}
}

impl PartialEq for SecretMaterial {
	fn eq(&self, other: &Self) -> bool {
		self.bytes == other.bytes
	}
}

impl Eq for SecretMaterial {}

impl From<Vec<u8>> for SecretMaterial {
	fn from(bytes: Vec<u8>) -> Self {
		Self::new(bytes)
	}
}

impl From<&str> for SecretMaterial {
	fn from(s: &str) -> Self {
		Self::new(s.as_bytes().to_vec())
	}
}

impl fmt::Debug for SecretMaterial {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SecretMaterial").field(&REDACTED).finish()
	}
}

impl fmt::Display for SecretMaterial {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

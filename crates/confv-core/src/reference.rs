// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Parsing of `resource/key,attr=value,...` references.
//!
//! Parsing never fails. A missing resource name or key shows up as an empty
//! name or `None`, and callers decide whether that is acceptable.

use std::collections::BTreeMap;
use std::fmt;

/// A parsed reference to a ConfigMap or Secret, optionally narrowed to one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceKeyRef {
	pub resource_name: String,
	/// `None` means the key should be inferred.
	pub key: Option<String>,
	pub attrs: BTreeMap<String, String>,
}

impl ResourceKeyRef {
	/// Parse `name`, `name/key`, or either followed by `,attr=value` pairs.
	///
	/// The address splits on the first `/`. An empty key (`name/`) is unset.
	pub fn parse(s: &str) -> Self {
		let (address, attrs) = match s.split_once(',') {
			Some((address, rest)) => (address, parse_params(rest)),
			None => (s, BTreeMap::new()),
		};

		let (resource_name, key) = match address.split_once('/') {
			Some((name, key)) => {
				let key = key.trim();
				(name.trim(), (!key.is_empty()).then(|| key.to_string()))
			}
			None => (address.trim(), None),
		};

		Self {
			resource_name: resource_name.to_string(),
			key,
			attrs,
		}
	}

	pub fn attr(&self, name: &str) -> Option<&str> {
		self.attrs.get(name).map(String::as_str)
	}
}

impl fmt::Display for ResourceKeyRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.key {
			Some(key) => write!(f, "{}/{}", self.resource_name, key),
			None => f.write_str(&self.resource_name),
		}
	}
}

/// Parse comma-separated `attr=value` pairs.
///
/// Whitespace around attributes and values is trimmed. Pairs that do not
/// contain exactly one `=` are skipped; later duplicates win.
pub fn parse_params(s: &str) -> BTreeMap<String, String> {
	s.split(',')
		.filter_map(|pair| {
			let mut parts = pair.split('=');
			match (parts.next(), parts.next(), parts.next()) {
				(Some(k), Some(v), None) => Some((k.trim().to_string(), v.trim().to_string())),
				_ => None,
			}
		})
		.collect()
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The value tree a template renders against.
//!
//! YAML documents are converted into [`Value`] with string mapping keys so the
//! render context has one shape regardless of how the YAML spelled its keys.

use std::collections::BTreeMap;

use confv_k8s::{SecretData, SecretMaterial};
use serde::{Deserialize, Serialize};

/// Root key holding the decoded values document.
pub const VALUES_KEY: &str = "values";
/// Root key holding decoded secret entries, present only with a shared secret.
pub const SHARED_SECRET_KEY: &str = "sharedSecret";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
	Int(i64),
	UInt(u64),
	Float(f64),
}

/// A YAML-compatible value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
	Null,
	Bool(bool),
	Number(Number),
	String(String),
	Sequence(Vec<Value>),
	Mapping(BTreeMap<String, Value>),
}

impl Value {
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "boolean",
			Value::Number(_) => "number",
			Value::String(_) => "string",
			Value::Sequence(_) => "sequence",
			Value::Mapping(_) => "mapping",
		}
	}

	#[cfg(test)]
	pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
		match self {
			Value::Mapping(m) => Some(m),
			_ => None,
		}
	}

	/// Walk a dotted path of mapping keys.
	#[cfg(test)]
	pub fn lookup(&self, path: &str) -> Option<&Value> {
		path.split('.').try_fold(self, |node, segment| node.as_mapping()?.get(segment))
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::String(s.to_string())
	}
}

impl TryFrom<serde_yaml::Value> for Value {
	type Error = String;

	fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
		Ok(match value {
			serde_yaml::Value::Null => Value::Null,
			serde_yaml::Value::Bool(b) => Value::Bool(b),
			serde_yaml::Value::Number(n) => Value::Number(number_from_yaml(&n)),
			serde_yaml::Value::String(s) => Value::String(s),
			serde_yaml::Value::Sequence(items) => Value::Sequence(
				items
					.into_iter()
					.map(Value::try_from)
					.collect::<Result<_, _>>()?,
			),
			serde_yaml::Value::Mapping(mapping) => {
				let mut out = BTreeMap::new();
				for (k, v) in mapping {
					out.insert(mapping_key(k)?, Value::try_from(v)?);
				}
				Value::Mapping(out)
			}
			serde_yaml::Value::Tagged(tagged) => Value::try_from(tagged.value)?,
		})
	}
}

fn number_from_yaml(n: &serde_yaml::Number) -> Number {
	if let Some(i) = n.as_i64() {
		Number::Int(i)
	} else if let Some(u) = n.as_u64() {
		Number::UInt(u)
	} else {
		Number::Float(n.as_f64().unwrap_or(f64::NAN))
	}
}

fn mapping_key(key: serde_yaml::Value) -> Result<String, String> {
	match key {
		serde_yaml::Value::String(s) => Ok(s),
		serde_yaml::Value::Bool(b) => Ok(b.to_string()),
		serde_yaml::Value::Number(n) => Ok(n.to_string()),
		serde_yaml::Value::Tagged(tagged) => mapping_key(tagged.value),
		other => Err(format!(
			"mapping keys must be scalars, found {}",
			Value::try_from(other).map(|v| v.kind()).unwrap_or("complex value")
		)),
	}
}

/// Parse a values document into a mapping.
///
/// Only the first YAML document of a multi-document stream is read. An empty
/// or comment-only document is an empty mapping. Any other top-level shape is
/// rejected.
pub fn parse_values_document(document: &str) -> Result<BTreeMap<String, Value>, String> {
	if document.trim().is_empty() {
		return Ok(BTreeMap::new());
	}
	let Some(first) = serde_yaml::Deserializer::from_str(document).next() else {
		return Ok(BTreeMap::new());
	};
	let yaml = serde_yaml::Value::deserialize(first).map_err(|e| e.to_string())?;
	match Value::try_from(yaml)? {
		Value::Mapping(m) => Ok(m),
		Value::Null => Ok(BTreeMap::new()),
		other => Err(format!(
			"top-level document is a {}, expected a mapping",
			other.kind()
		)),
	}
}

/// Root render context: `values` plus, when configured, `sharedSecret`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueTree {
	values: BTreeMap<String, Value>,
	shared_secret: Option<BTreeMap<String, SecretMaterial>>,
}

impl ValueTree {
	pub fn new(values: BTreeMap<String, Value>) -> Self {
		Self {
			values,
			shared_secret: None,
		}
	}

	pub fn with_shared_secret(mut self, secret: SecretData) -> Self {
		self.shared_secret = Some(secret);
		self
	}

	pub fn values(&self) -> &BTreeMap<String, Value> {
		&self.values
	}

	pub fn shared_secret(&self) -> Option<&BTreeMap<String, SecretMaterial>> {
		self.shared_secret.as_ref()
	}

	/// Build the root mapping. Secret bytes are decoded as lossy UTF-8.
	pub fn to_value(&self) -> Value {
		let mut root = BTreeMap::new();
		root.insert(VALUES_KEY.to_string(), Value::Mapping(self.values.clone()));
		if let Some(secret) = &self.shared_secret {
			let decoded = secret
				.iter()
				.map(|(k, v)| (k.clone(), Value::String(v.to_utf8_lossy())))
				.collect();
			root.insert(SHARED_SECRET_KEY.to_string(), Value::Mapping(decoded));
		}
		Value::Mapping(root)
	}
}

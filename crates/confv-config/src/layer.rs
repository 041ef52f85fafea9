// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer for merging from multiple sources.

use serde::Deserialize;

/// Partial configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
	#[serde(default)]
	pub store: Option<StoreLayer>,
	#[serde(default)]
	pub logging: Option<LoggingLayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreLayer {
	/// `proxy` or `kubeconfig`
	#[serde(default)]
	pub mode: Option<String>,
	#[serde(default)]
	pub proxy_url: Option<String>,
	#[serde(default)]
	pub connect_timeout_secs: Option<u64>,
	#[serde(default)]
	pub read_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub format: Option<String>,
}

impl ConfigLayer {
	/// Merge another layer into this one. Values set in `other` win.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_option(&mut self.store, other.store, StoreLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

impl StoreLayer {
	fn merge(&mut self, other: StoreLayer) {
		if other.mode.is_some() {
			self.mode = other.mode;
		}
		if other.proxy_url.is_some() {
			self.proxy_url = other.proxy_url;
		}
		if other.connect_timeout_secs.is_some() {
			self.connect_timeout_secs = other.connect_timeout_secs;
		}
		if other.read_timeout_secs.is_some() {
			self.read_timeout_secs = other.read_timeout_secs;
		}
	}
}

impl LoggingLayer {
	fn merge(&mut self, other: LoggingLayer) {
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.format.is_some() {
			self.format = other.format;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn store_layer() -> impl Strategy<Value = Option<StoreLayer>> {
		proptest::option::of(
			(
				proptest::option::of("proxy|kubeconfig"),
				proptest::option::of("http://[a-z]{1,8}:[0-9]{2,4}"),
				proptest::option::of(1u64..120),
				proptest::option::of(1u64..120),
			)
				.prop_map(
					|(mode, proxy_url, connect_timeout_secs, read_timeout_secs)| StoreLayer {
						mode,
						proxy_url,
						connect_timeout_secs,
						read_timeout_secs,
					},
				),
		)
	}

	fn field<T>(layer: &Option<StoreLayer>, get: impl Fn(&StoreLayer) -> Option<T>) -> Option<T> {
		layer.as_ref().and_then(get)
	}

	proptest! {
		#[test]
		fn upper_layer_fields_win_and_unset_fields_keep_the_base(
			base in store_layer(),
			top in store_layer(),
		) {
			let mut merged = ConfigLayer { store: base.clone(), logging: None };
			merged.merge(ConfigLayer { store: top.clone(), logging: None });

			prop_assert_eq!(merged.store.is_some(), base.is_some() || top.is_some());
			prop_assert_eq!(
				field(&merged.store, |s| s.mode.clone()),
				field(&top, |s| s.mode.clone()).or(field(&base, |s| s.mode.clone()))
			);
			prop_assert_eq!(
				field(&merged.store, |s| s.proxy_url.clone()),
				field(&top, |s| s.proxy_url.clone()).or(field(&base, |s| s.proxy_url.clone()))
			);
			prop_assert_eq!(
				field(&merged.store, |s| s.connect_timeout_secs),
				field(&top, |s| s.connect_timeout_secs).or(field(&base, |s| s.connect_timeout_secs))
			);
			prop_assert_eq!(
				field(&merged.store, |s| s.read_timeout_secs),
				field(&top, |s| s.read_timeout_secs).or(field(&base, |s| s.read_timeout_secs))
			);
		}
	}

	#[test]
	fn merge_overrides_only_set_fields() {
		let mut base = ConfigLayer {
			store: Some(StoreLayer {
				proxy_url: Some("http://127.0.0.1:8001".to_string()),
				read_timeout_secs: Some(30),
				..Default::default()
			}),
			logging: None,
		};
		let top = ConfigLayer {
			store: Some(StoreLayer {
				read_timeout_secs: Some(5),
				..Default::default()
			}),
			logging: Some(LoggingLayer {
				level: Some("debug".to_string()),
				format: None,
			}),
		};

		base.merge(top);

		let store = base.store.unwrap();
		assert_eq!(store.proxy_url.as_deref(), Some("http://127.0.0.1:8001"));
		assert_eq!(store.read_timeout_secs, Some(5));
		assert_eq!(base.logging.unwrap().level.as_deref(), Some("debug"));
	}

	#[test]
	fn parses_toml_layer() {
		let layer: ConfigLayer = toml::from_str(
			r#"
			[store]
			mode = "kubeconfig"
			connect_timeout_secs = 3

			[logging]
			format = "json"
			"#,
		)
		.unwrap();

		assert_eq!(layer.store.unwrap().mode.as_deref(), Some("kubeconfig"));
		assert_eq!(layer.logging.unwrap().format.as_deref(), Some("json"));
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let result: Result<ConfigLayer, _> = toml::from_str("[store]\nproxy = \"x\"\n");
		assert!(result.is_err());
	}
}

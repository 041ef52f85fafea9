// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Template rendering.
//!
//! Templates are written in the Go `text/template` dialect against a root
//! context holding `values` and, when configured, `sharedSecret`:
//! `{{.values.port}}`, `{{if ...}}`, `{{range ...}}`, `{{with ...}}`.
//! [`translate`] turns them into minijinja source which runs with strict
//! undefined handling and no auto-escaping.
//!
//! Missing keys are errors. Output is byte-for-byte deterministic for the same
//! template and value tree.

pub mod filters;
mod translate;

use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use tracing::debug;

use crate::error::{ConfvError, ConfvResult};
use crate::value::ValueTree;

/// Renders template text against a [`ValueTree`].
pub struct RenderEngine {
	env: Environment<'static>,
}

impl Default for RenderEngine {
	fn default() -> Self {
		Self::new()
	}
}

impl RenderEngine {
	pub fn new() -> Self {
		let mut env = Environment::new();
		env.set_undefined_behavior(UndefinedBehavior::Strict);
		env.set_keep_trailing_newline(true);
		env.set_auto_escape_callback(|_| AutoEscape::None);

		env.add_filter("b64enc", filters::b64enc);
		env.add_filter("b64dec", filters::b64dec);
		env.add_filter("required", filters::required);
		env.add_filter("entries", filters::entries);
		env.add_function("printf", filters::printf);

		Self { env }
	}

	/// Render `template` against `tree`.
	///
	/// Syntax errors surface as [`ConfvError::TemplateParseError`]; failures
	/// while evaluating, including missing keys, as
	/// [`ConfvError::TemplateExecError`].
	pub fn render(&self, template: &str, tree: &ValueTree) -> ConfvResult<Vec<u8>> {
		let source = translate::translate(template).map_err(ConfvError::TemplateParseError)?;
		let context = minijinja::Value::from_serialize(tree.to_value());
		let rendered = self
			.env
			.render_str(&source, context)
			.map_err(|e| match e.kind() {
				ErrorKind::SyntaxError => ConfvError::TemplateParseError(e),
				_ => ConfvError::TemplateExecError(e),
			})?;
		debug!(bytes = rendered.len(), "rendered template");
		Ok(rendered.into_bytes())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::parse_values_document;
	use confv_k8s::{SecretData, SecretMaterial};
	use proptest::prelude::*;
	use std::collections::BTreeMap;

	fn tree(yaml: &str) -> ValueTree {
		ValueTree::new(parse_values_document(yaml).unwrap())
	}

	fn render(template: &str, tree: &ValueTree) -> ConfvResult<String> {
		RenderEngine::new()
			.render(template, tree)
			.map(|bytes| String::from_utf8(bytes).unwrap())
	}

	#[test]
	fn substitutes_values() {
		let out = render("port={{.values.port}}\n", &tree("port: 8080\n")).unwrap();
		assert_eq!(out, "port=8080\n");
	}

	#[test]
	fn nested_paths_and_trim_markers() {
		let t = tree("port: 8080\ndb:\n  host: db.local\n");
		assert_eq!(
			render("{{ .values.port }} {{ .values.db.host }}", &t).unwrap(),
			"8080 db.local"
		);
		assert_eq!(
			render("a = \n  {{- .values.port -}}\n;", &t).unwrap(),
			"a =8080;"
		);
	}

	#[test]
	fn conditionals_and_loops_render() {
		let t = tree("servers:\n  - a\n  - b\nenabled: true\n");
		let out = render(
			"{{if .values.enabled}}on{{end}};{{range .values.servers}}{{.}},{{end}}",
			&t,
		)
		.unwrap();
		assert_eq!(out, "on;a,b,");
	}

	#[test]
	fn else_and_else_if_branches() {
		let template = "{{if eq .values.env \"prod\"}}P{{else if eq .values.env \"dev\"}}D{{else}}?{{end}}";
		assert_eq!(render(template, &tree("env: prod\n")).unwrap(), "P");
		assert_eq!(render(template, &tree("env: dev\n")).unwrap(), "D");
		assert_eq!(render(template, &tree("env: qa\n")).unwrap(), "?");
	}

	#[test]
	fn range_rebinds_dot_and_declares_variables() {
		let t = tree(
			"name: svc\nservers:\n  - host: a\n    port: 1\n  - host: b\n    port: 2\n",
		);
		assert_eq!(
			render(
				"{{range .values.servers}}{{.host}}:{{.port}}@{{$.values.name}} {{end}}",
				&t
			)
			.unwrap(),
			"a:1@svc b:2@svc "
		);
		assert_eq!(
			render(
				"{{range $i, $s := .values.servers}}{{$i}}={{$s.host}} {{end}}",
				&t
			)
			.unwrap(),
			"0=a 1=b "
		);
	}

	#[test]
	fn range_over_empty_takes_else() {
		let out = render(
			"{{range .values.list}}x{{else}}none{{end}}",
			&tree("list: []\n"),
		)
		.unwrap();
		assert_eq!(out, "none");
	}

	#[test]
	fn with_rebinds_dot_or_falls_back() {
		let t = tree("db:\n  host: h\nempty: \"\"\n");
		assert_eq!(
			render("{{with .values.db}}{{.host}}{{end}}", &t).unwrap(),
			"h"
		);
		assert_eq!(
			render("{{with .values.empty}}x{{else}}fallback{{end}}", &t).unwrap(),
			"fallback"
		);
	}

	#[test]
	fn builtin_functions() {
		let t = tree(
			"labels:\n  app.kubernetes.io/name: web\nlist: [1, 2, 3]\nhost: db\nport: 5432\na: true\nb: false\n",
		);
		assert_eq!(
			render("{{index .values.labels \"app.kubernetes.io/name\"}}", &t).unwrap(),
			"web"
		);
		assert_eq!(render("{{len .values.list}}", &t).unwrap(), "3");
		assert_eq!(
			render("{{if and .values.a (not .values.b)}}yes{{end}}", &t).unwrap(),
			"yes"
		);
		assert_eq!(
			render("{{printf \"%s:%d\" .values.host .values.port}}", &t).unwrap(),
			"db:5432"
		);
		assert_eq!(
			render("{{$p := .values.port}}{{if gt $p 1024}}high {{$p}}{{end}}", &t).unwrap(),
			"high 5432"
		);
	}

	#[test]
	fn missing_key_is_an_execution_error() {
		let err = render("{{.values.missing}}", &tree("port: 1\n")).unwrap_err();
		assert!(matches!(err, ConfvError::TemplateExecError(_)));
	}

	#[test]
	fn missing_nested_key_is_an_execution_error() {
		let err = render("{{.values.db.host}}", &tree("port: 1\n")).unwrap_err();
		assert!(matches!(err, ConfvError::TemplateExecError(_)));
	}

	#[test]
	fn required_fails_with_its_message() {
		let err = render("{{required \"need a port\" .values.port}}", &tree("port: null\n"))
			.unwrap_err();
		assert!(matches!(err, ConfvError::TemplateExecError(_)));
		assert!(err.to_string().contains("need a port"));
	}

	#[test]
	fn syntax_error_is_a_parse_error() {
		for template in [
			"{{.values.port ",
			"{{if .values.port}}never closed",
			"{{end}}",
			"{{nosuch .values.port}}",
			"{{ values.port }}",
		] {
			let err = render(template, &tree("port: 1\n")).unwrap_err();
			assert!(
				matches!(err, ConfvError::TemplateParseError(_)),
				"{template}: {err:?}"
			);
		}
	}

	#[test]
	fn shared_secret_is_reachable() {
		let mut secret = SecretData::new();
		secret.insert("token".into(), SecretMaterial::from("abc"));
		let t = tree("user: app\n").with_shared_secret(secret);
		let out = render(
			"{{.values.user}}:{{.sharedSecret.token}}:{{.sharedSecret.token | b64enc}}",
			&t,
		)
		.unwrap();
		assert_eq!(out, "app:abc:YWJj");
	}

	#[test]
	fn shared_secret_is_absent_without_secret() {
		let err = render("{{.sharedSecret.token}}", &tree("a: 1\n")).unwrap_err();
		assert!(matches!(err, ConfvError::TemplateExecError(_)));
	}

	#[test]
	fn output_is_not_html_escaped() {
		let out = render("{{.values.s}}", &tree("s: \"<a & 'b'>\"\n")).unwrap();
		assert_eq!(out, "<a & 'b'>");
	}

	#[test]
	fn jinja_syntax_in_text_is_literal() {
		let out = render(
			"{% raw %}{{\"{{ .Values.x }}\"}}{% endraw %} {# note #} {\"port\": {{.values.port}}}\n",
			&tree("port: 1\n"),
		)
		.unwrap();
		assert_eq!(
			out,
			"{% raw %}{{ .Values.x }}{% endraw %} {# note #} {\"port\": 1}\n"
		);
	}

	#[test]
	fn map_iteration_is_deterministic() {
		let t = tree("env:\n  zeta: 1\n  alpha: 2\n  mid: 3\n");
		let template = "{{range $k, $v := .values.env}}{{$k}}={{$v}}\n{{end}}";
		let first = render(template, &t).unwrap();
		assert_eq!(first, "alpha=2\nmid=3\nzeta=1\n");
		for _ in 0..10 {
			assert_eq!(render(template, &t).unwrap(), first);
		}
	}

	#[test]
	fn static_template_passes_through() {
		let out = render("plain text\nwith lines\n", &ValueTree::default()).unwrap();
		assert_eq!(out, "plain text\nwith lines\n");
	}

	proptest! {
		#[test]
		fn rendering_is_deterministic(
			entries in proptest::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..12),
		) {
			let values: BTreeMap<String, crate::value::Value> = entries
				.into_iter()
				.map(|(k, v)| (k, crate::value::Value::Number(crate::value::Number::Int(v))))
				.collect();
			let t = ValueTree::new(values);
			let template = "{{range $k, $v := .values}}{{$k}}={{$v}};{{end}}";
			let engine = RenderEngine::new();
			let first = engine.render(template, &t).unwrap();
			let second = engine.render(template, &t).unwrap();
			prop_assert_eq!(first, second);
		}
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! End-to-end mount and unmount scenarios against an in-memory store.

use std::path::Path;
use std::sync::Arc;

use confv_core::{ConfvError, MountLifecycle, Step};
use confv_k8s::{MemoryStore, PodFacts};
use serde_json::json;
use tempfile::TempDir;

fn scenario_store() -> MemoryStore {
	MemoryStore::new()
		.with_config("ns", "tpl-cm", [("app.conf", "port={{.values.port}}")])
		.with_config("ns", "val-cm", [("node-7", "port: 8080")])
		.with_pod("ns", PodFacts::new("10.1.2.3", "node-7", "p1"))
}

fn scenario_options() -> serde_json::Value {
	json!({
		"kubernetes.io/pod.name": "p1",
		"kubernetes.io/pod.namespace": "ns",
		"template": "tpl-cm/app.conf",
		"values": "val-cm",
		"identifiedBy": "nodeName",
		"targetFileName": "app.conf",
	})
}

fn lifecycle(store: MemoryStore) -> MountLifecycle {
	MountLifecycle::new(Arc::new(store))
}

async fn mount(
	lifecycle: &MountLifecycle,
	dir: &Path,
	options: &serde_json::Value,
) -> Result<std::path::PathBuf, confv_core::StepError> {
	lifecycle
		.mount(dir, &serde_json::to_vec(options).unwrap())
		.await
}

#[tokio::test]
async fn renders_values_selected_by_node_name() {
	let tmp = TempDir::new().unwrap();
	let dir = tmp.path().join("vol");

	let written = mount(&lifecycle(scenario_store()), &dir, &scenario_options())
		.await
		.unwrap();

	assert_eq!(written, dir.join("app.conf"));
	assert_eq!(std::fs::read_to_string(written).unwrap(), "port=8080");
}

#[tokio::test]
async fn missing_identity_entry_writes_nothing() {
	let tmp = TempDir::new().unwrap();
	let dir = tmp.path().join("vol");
	let store = MemoryStore::new()
		.with_config("ns", "tpl-cm", [("app.conf", "port={{.values.port}}")])
		.with_config("ns", "val-cm", [("node-8", "port: 8080")])
		.with_pod("ns", PodFacts::new("10.1.2.3", "node-7", "p1"));

	let err = mount(&lifecycle(store), &dir, &scenario_options())
		.await
		.unwrap_err();

	assert_eq!(err.step, Step::ResolveValues);
	assert!(matches!(err.error(), ConfvError::ValuesKeyNotFound { .. }));
	assert!(!dir.join("app.conf").exists());
}

#[tokio::test]
async fn mount_and_unmount_twice_converge() {
	let tmp = TempDir::new().unwrap();
	let dir = tmp.path().join("vol");
	let lifecycle = lifecycle(scenario_store());

	mount(&lifecycle, &dir, &scenario_options()).await.unwrap();
	mount(&lifecycle, &dir, &scenario_options()).await.unwrap();
	assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);
	assert_eq!(std::fs::read_to_string(dir.join("app.conf")).unwrap(), "port=8080");

	MountLifecycle::unmount(&dir).await.unwrap();
	assert!(!dir.exists());
	MountLifecycle::unmount(&dir).await.unwrap();
	assert!(!dir.exists());
}

#[tokio::test]
async fn unmount_removes_nested_content() {
	let tmp = TempDir::new().unwrap();
	let dir = tmp.path().join("vol");
	std::fs::create_dir_all(dir.join("nested/deeper")).unwrap();
	std::fs::write(dir.join("nested/deeper/file"), "x").unwrap();

	MountLifecycle::unmount(&dir).await.unwrap();

	assert!(!dir.exists());
}

#[tokio::test]
async fn shared_secret_feeds_the_template() {
	let tmp = TempDir::new().unwrap();
	let store = MemoryStore::new()
		.with_config(
			"ns",
			"tpl-cm",
			[(
				"app.conf",
				"user={{ .values.user }}\npassword={{ .sharedSecret.password }}\n",
			)],
		)
		.with_config("ns", "val-cm", [("p1", "user: app\n")])
		.with_pod("ns", PodFacts::new("10.1.2.3", "node-7", "p1"))
		.with_secret("ns", "db-creds", [("password", "hunter2")]);
	let mut options = scenario_options();
	options["values"] = json!("val-cm,identifiedBy=podName");
	options["sharedSecret"] = json!("db-creds");

	let written = mount(&lifecycle(store), tmp.path(), &options).await.unwrap();

	assert_eq!(
		std::fs::read_to_string(written).unwrap(),
		"user=app\npassword=hunter2\n"
	);
}

#[tokio::test]
async fn template_inferred_from_single_entry() {
	let tmp = TempDir::new().unwrap();
	let mut options = scenario_options();
	options["template"] = json!("tpl-cm");

	let written = mount(&lifecycle(scenario_store()), tmp.path(), &options)
		.await
		.unwrap();

	assert_eq!(std::fs::read_to_string(written).unwrap(), "port=8080");
}

#[tokio::test]
async fn ambiguous_template_is_reported_at_resolve_template() {
	let tmp = TempDir::new().unwrap();
	let store = scenario_store().with_config("ns", "tpl-cm", [("a", "x"), ("b", "y")]);
	let mut options = scenario_options();
	options["template"] = json!("tpl-cm");

	let err = mount(&lifecycle(store), tmp.path(), &options)
		.await
		.unwrap_err();

	assert_eq!(err.step, Step::ResolveTemplate);
	assert!(matches!(err.error(), ConfvError::AmbiguousTemplate { .. }));
}

#[tokio::test]
async fn render_failure_leaves_previous_file_intact() {
	let tmp = TempDir::new().unwrap();
	let lifecycle_ok = lifecycle(scenario_store());
	mount(&lifecycle_ok, tmp.path(), &scenario_options())
		.await
		.unwrap();

	let broken = scenario_store().with_config(
		"ns",
		"tpl-cm",
		[("app.conf", "port={{ .values.missing }}")],
	);
	let err = mount(&lifecycle(broken), tmp.path(), &scenario_options())
		.await
		.unwrap_err();

	assert_eq!(err.step, Step::Render);
	assert_eq!(
		std::fs::read_to_string(tmp.path().join("app.conf")).unwrap(),
		"port=8080"
	);
	assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn path_escaping_target_is_rejected_before_any_lookup() {
	let tmp = TempDir::new().unwrap();
	let dir = tmp.path().join("vol");
	let mut options = scenario_options();
	options["targetFileName"] = json!("../escape.conf");

	let err = mount(&lifecycle(scenario_store()), &dir, &options)
		.await
		.unwrap_err();

	assert_eq!(err.step, Step::DecodeOptions);
	assert!(!dir.exists());
	assert!(!tmp.path().join("escape.conf").exists());
}

#[tokio::test]
async fn store_outage_surfaces_as_store_error() {
	let tmp = TempDir::new().unwrap();
	let store = scenario_store().with_outage("connection refused");

	let err = mount(&lifecycle(store), tmp.path(), &scenario_options())
		.await
		.unwrap_err();

	assert!(matches!(err.error(), ConfvError::Store(_)));
	assert!(err.to_string().contains("connection refused"));
}

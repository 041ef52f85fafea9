// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Store gateway for the confv volume driver.
//!
//! This crate provides:
//! - The [`StoreGateway`] trait the rendering engine reads ConfigMaps, Secrets
//!   and pod facts through
//! - [`KubeStore`], the production implementation using the kube crate
//! - [`MemoryStore`], an in-memory implementation for tests
//! - [`SecretMaterial`], a redacting, zeroizing holder for secret entry bytes
//!
//! # Reaching the API server
//!
//! [`KubeStore`] talks to a plain HTTP proxy URL (default
//! `http://127.0.0.1:8001`) or, in kubeconfig mode, uses inferred credentials.
//! There is no Unix-socket transport. Nodes that ran
//! `kubectl proxy --unix-socket=/var/run/confv.sock` for the driver should run
//! `kubectl proxy --port=8001` on loopback instead, or point `CONFV_PROXY_URL`
//! (`store.proxy_url` in `/etc/confv/config.toml`) at the proxy they keep.

mod client;
mod error;
mod kube_client;
mod memory;
mod secret;
mod types;

pub use client::StoreGateway;
pub use error::{K8sError, K8sResult};
pub use kube_client::{KubeStore, KubeStoreOptions};
pub use memory::MemoryStore;
pub use secret::{SecretMaterial, REDACTED};
pub use types::{ConfigData, PodFacts, ResourceKind, SecretData};

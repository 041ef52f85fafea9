// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Resolution and rendering engine for the confv volume driver.
//!
//! A mount decodes the kubelet's options, resolves the template and the
//! pod-specific values from the cluster, renders the template and writes the
//! result into the mount directory.

pub mod error;
pub mod lifecycle;
pub mod options;
pub mod reference;
pub mod render;
pub mod template;
pub mod value;
pub mod values;

pub use error::{ConfvError, ConfvResult, Step, StepError};
pub use lifecycle::{Capabilities, MountLifecycle};
pub use options::{IdentifiedBy, MountOptions};
pub use reference::{parse_params, ResourceKeyRef};
pub use render::RenderEngine;
pub use template::TemplateResolver;
pub use value::{parse_values_document, Number, Value, ValueTree};
pub use values::ValuesResolver;

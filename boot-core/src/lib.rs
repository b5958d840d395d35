//! Core utilities and types for the kubeboot scaffolding tool.
//!
//! This crate provides the naming rules, the API version grammar and the
//! file primitives shared by the generator crates.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod naming;
mod version;

pub use error::{Error, Result};
// File operations
pub use file::{GeneratedFile, Overwrite, WriteResult, write_artifact};
// Naming utilities
pub use naming::{pluralize, to_lower_case, to_title_case, to_upper_first};
pub use version::{ApiVersion, Stage};

//! Core operations.
//!
//! This module contains the business logic for kubeboot commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod create;
pub mod register;

pub use check::check;
pub use create::{create_group, create_resource, create_version};
pub use register::{RegisterOptions, register};

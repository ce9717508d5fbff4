#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level pipeline orchestration for apack
//!
//! This crate sequences the build: precondition checks, environment
//! provisioning, plugin and module installs, and the final archive step.
//! Every failure is terminal - nothing here retries.

mod context;
mod create;
mod types;

pub use context::{OpsCtx, OpsCtxBuilder};
pub use create::create;
pub use types::PackageReport;

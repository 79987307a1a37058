//! Test utilities for the param-alias workspace.
//!
//! Provides schema fixtures, a store helper and a reporter that records
//! notices for assertions.

pub mod fixtures;
pub mod reporter;

pub use fixtures::{companion_schema, param_set, ssl_schema, ssl_verify_mode_remap};
pub use reporter::RecordingReporter;

//! Parameter schema and value storage for plugin configuration.
//!
//! This crate is the read-only view the alias resolution engine queries:
//!
//! - [`Schema`] is an immutable snapshot of declared parameters, their
//!   defaults and their deprecation flag.
//! - [`ParameterStore`] is the contract a host system implements to expose
//!   effective values and explicit-supply flags.
//! - [`ParamSet`] is a ready-made in-memory store built from a schema and
//!   the raw user input.

pub mod error;
pub mod schema;
pub mod store;

pub use error::{Error, Result};
pub use schema::{ParamDef, Schema, SchemaBuilder};
pub use store::{ParamSet, ParameterStore};

/// Dynamic parameter value.
pub use serde_json::Value;

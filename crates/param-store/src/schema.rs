//! Parameter schema snapshot
//!
//! A [`Schema`] lists every parameter a plugin accepts. It is built once,
//! before any raw input is processed, and never mutated afterwards, so name
//! existence and deprecation lookups are pure.
//!
//! # Example TOML
//!
//! ```toml
//! [[param]]
//! name = "ssl_verification_mode"
//! default = "full"
//!
//! [[param]]
//! name = "ssl_verify_mode"
//! deprecated = true
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Declaration of a single parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDef {
    /// Parameter name as it appears in user configuration
    pub name: String,
    /// Value substituted when the user does not supply one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Whether the name is kept only for backwards compatibility
    #[serde(default)]
    pub deprecated: bool,
}

impl ParamDef {
    /// A parameter with no default that is not deprecated.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            deprecated: false,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default, rename = "param")]
    params: Vec<ParamDef>,
}

/// Immutable snapshot of declared parameters.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    params: Vec<ParamDef>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Start building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Build a schema from a list of declarations.
    ///
    /// Fails on empty or duplicated names.
    pub fn from_defs(defs: impl IntoIterator<Item = ParamDef>) -> Result<Self> {
        let mut schema = Schema::default();
        for def in defs {
            if def.name.is_empty() {
                return Err(Error::EmptyName);
            }
            if schema.index.contains_key(&def.name) {
                return Err(Error::DuplicateParameter { name: def.name });
            }
            schema.index.insert(def.name.clone(), schema.params.len());
            schema.params.push(def);
        }
        tracing::debug!(params = schema.params.len(), "Built parameter schema");
        Ok(schema)
    }

    /// Load a schema from a TOML document of `[[param]]` tables.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let doc: SchemaDocument = toml::from_str(content).map_err(|e| Error::SchemaParse {
            message: e.to_string(),
        })?;
        Self::from_defs(doc.params)
    }

    /// Look up a parameter declaration.
    pub fn get(&self, name: &str) -> Option<&ParamDef> {
        self.index.get(name).map(|&i| &self.params[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// True only for declared parameters flagged as deprecated.
    pub fn is_deprecated(&self, name: &str) -> bool {
        self.get(name).is_some_and(|def| def.deprecated)
    }

    /// Default value of a declared parameter, if any.
    pub fn default_value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(|def| def.default.as_ref())
    }

    /// Declarations in the order they were added.
    pub fn params(&self) -> impl Iterator<Item = &ParamDef> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Incremental schema construction.
///
/// # Example
///
/// ```
/// use param_store::Schema;
///
/// let schema = Schema::builder()
///     .param("ssl_verification_mode")
///     .deprecated_param("ssl_verify_mode")
///     .build()
///     .unwrap();
/// assert!(schema.is_deprecated("ssl_verify_mode"));
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    defs: Vec<ParamDef>,
}

impl SchemaBuilder {
    /// Declare a parameter without a default.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.defs.push(ParamDef::new(name));
        self
    }

    /// Declare a parameter with a default value.
    pub fn param_with_default(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.defs.push(ParamDef::new(name).with_default(default));
        self
    }

    /// Declare a deprecated parameter without a default.
    pub fn deprecated_param(mut self, name: impl Into<String>) -> Self {
        self.defs.push(ParamDef::new(name).deprecated());
        self
    }

    /// Add a fully specified declaration.
    pub fn def(mut self, def: ParamDef) -> Self {
        self.defs.push(def);
        self
    }

    pub fn build(self) -> Result<Schema> {
        Schema::from_defs(self.defs)
    }
}

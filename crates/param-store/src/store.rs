//! Read-only parameter stores
//!
//! The resolution engine never parses or coerces configuration. It only asks
//! a [`ParameterStore`] two questions per name: what the effective value is
//! after default substitution, and whether the user literally supplied it.

use serde_json::{Map, Value};

use crate::{Error, Result, Schema};

/// Read-only view over parsed plugin configuration.
///
/// Implementations must answer consistently for the lifetime of a
/// resolution; the engine may query the same name several times.
pub trait ParameterStore {
    /// Value after default substitution, `None` when absent.
    fn effective_value(&self, name: &str) -> Option<&Value>;

    /// True only if the raw user input included `name`. Defaults never count.
    fn was_supplied(&self, name: &str) -> bool;

    /// Whether `name` is declared at all.
    fn exists(&self, name: &str) -> bool;

    /// Whether `name` is declared and flagged as deprecated.
    fn is_deprecated(&self, name: &str) -> bool;
}

/// In-memory store pairing a schema snapshot with raw user input.
///
/// An explicit `null` in the raw input counts as supplied, but its effective
/// value is absent and the schema default is not substituted.
#[derive(Debug, Clone)]
pub struct ParamSet {
    schema: Schema,
    raw: Map<String, Value>,
}

impl ParamSet {
    /// Pair `schema` with raw input, rejecting undeclared keys.
    pub fn new(schema: Schema, raw: Map<String, Value>) -> Result<Self> {
        if let Some(name) = raw.keys().find(|name| !schema.contains(name)) {
            return Err(Error::UnknownParameter { name: name.clone() });
        }
        tracing::debug!(supplied = raw.len(), "Built parameter set");
        Ok(Self { schema, raw })
    }

    /// A store where nothing was supplied and every value is a default.
    pub fn defaults(schema: Schema) -> Self {
        Self {
            schema,
            raw: Map::new(),
        }
    }

    /// Build from a JSON value that must be an object.
    pub fn from_value(schema: Schema, raw: Value) -> Result<Self> {
        match raw {
            Value::Object(map) => Self::new(schema, map),
            other => Err(Error::InvalidInput {
                found: json_type_name(&other).to_string(),
            }),
        }
    }

    /// Build from a JSON document holding the raw user input.
    pub fn from_json_str(schema: Schema, raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(schema, value)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Names the user supplied, sorted by name.
    pub fn supplied_names(&self) -> impl Iterator<Item = &str> {
        self.raw.keys().map(String::as_str)
    }
}

impl ParameterStore for ParamSet {
    fn effective_value(&self, name: &str) -> Option<&Value> {
        match self.raw.get(name) {
            Some(Value::Null) => None,
            Some(value) => Some(value),
            None => self.schema.default_value(name),
        }
    }

    fn was_supplied(&self, name: &str) -> bool {
        self.raw.contains_key(name)
    }

    fn exists(&self, name: &str) -> bool {
        self.schema.contains(name)
    }

    fn is_deprecated(&self, name: &str) -> bool {
        self.schema.is_deprecated(name)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

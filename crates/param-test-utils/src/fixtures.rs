//! Schema fixtures shared across test suites

use param_store::{ParamDef, ParamSet, Schema};
use serde_json::{Value, json};

/// TLS plugin schema: `ssl_verify_mode` was renamed to
/// `ssl_verification_mode` and two of its values were renamed.
pub fn ssl_schema() -> Schema {
    Schema::builder()
        .param_with_default("ssl_verification_mode", "full")
        .deprecated_param("ssl_verify_mode")
        .param("ssl_certificate")
        .param("ssl_key")
        .param("ssl_keystore_path")
        .param("ssl_truststore_path")
        .param_with_default("ssl_supported_protocols", json!(["TLSv1.2", "TLSv1.3"]))
        .build()
        .expect("ssl fixture schema is valid")
}

/// Value remap for `ssl_verify_mode`: `peer` becomes `certificate`,
/// `force_peer` becomes `full`, anything else passes through.
pub fn ssl_verify_mode_remap([mode]: [Option<Value>; 1]) -> Option<Value> {
    match mode.as_ref().and_then(Value::as_str) {
        Some("peer") => Some(json!("certificate")),
        Some("force_peer") => Some(json!("full")),
        _ => mode,
    }
}

/// Generic canonical/companion schema used by constraint tests.
///
/// - `new_config`: canonical, no default
/// - `another_config`, `third_config`: companions, no default
/// - `defaulted_config`: companion with a default
/// - `old_config`, `older_config`: deprecated, `older_config` has a default
pub fn companion_schema() -> Schema {
    Schema::builder()
        .param("new_config")
        .param("another_config")
        .param("third_config")
        .param_with_default("defaulted_config", "d")
        .deprecated_param("old_config")
        .def(ParamDef::new("older_config").with_default("o").deprecated())
        .build()
        .expect("companion fixture schema is valid")
}

/// Build a store from a schema and a JSON object literal.
pub fn param_set(schema: Schema, raw: Value) -> ParamSet {
    ParamSet::from_value(schema, raw).expect("fixture input matches schema")
}

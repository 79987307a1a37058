//! End-to-end tests for a TLS plugin migrating to canonical parameter names
//!
//! Schemas and raw inputs are loaded from `test-fixtures/`, the way a host
//! would hand them over during plugin initialization.

use param_alias::{
    DeprecationNotice, Error, ResolutionContext, TracingReporter, UserConfigurationError,
};
use param_store::{ParamSet, Schema};
use param_test_utils::{RecordingReporter, param_set, ssl_schema, ssl_verify_mode_remap};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;

/// Path to the test-fixtures directory (relative to the workspace root).
fn fixtures_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> ../../test-fixtures
    manifest_dir.join("../../test-fixtures")
}

fn load_schema() -> Schema {
    let path = fixtures_dir().join("schemas/tls_input.toml");
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read schema at {}: {}", path.display(), e));
    Schema::from_toml_str(&content).unwrap()
}

fn load_input(name: &str) -> ParamSet {
    let path = fixtures_dir().join("inputs").join(name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read input at {}: {}", path.display(), e));
    ParamSet::from_json_str(load_schema(), &content).unwrap()
}

/// Effective TLS settings of the plugin after normalization.
#[derive(Debug, PartialEq)]
struct TlsSettings {
    verification_mode: Option<Value>,
    certificate: Option<Value>,
    keystore_path: Option<Value>,
    keystore_password: Option<Value>,
}

/// Resolve every TLS parameter the way the plugin does at startup.
fn resolve_tls(ctx: &ResolutionContext<'_>) -> param_alias::Result<TlsSettings> {
    let verification_mode = ctx.resolve("ssl_verification_mode", |n| {
        n.with_deprecated_mapping(["ssl_verify_mode"], ssl_verify_mode_remap)?;
        Ok(())
    })?;

    let certificate = ctx.resolve("ssl_certificate", |n| {
        n.with_required_aliases(["ssl_key"])?
            .with_conflicting_aliases(["ssl_keystore_path"])?;
        Ok(())
    })?;

    let keystore_path = ctx.resolve("ssl_keystore_path", |n| {
        n.with_deprecated_alias("keystore")?;
        Ok(())
    })?;

    let keystore_password = ctx.resolve("ssl_keystore_password", |n| {
        n.with_deprecated_alias("keystore_password")?;
        Ok(())
    })?;

    Ok(TlsSettings {
        verification_mode,
        certificate,
        keystore_path,
        keystore_password,
    })
}

#[test]
fn test_fixture_schema_marks_legacy_names_deprecated() {
    let schema = load_schema();
    for name in ["ssl_verify_mode", "keystore", "keystore_password"] {
        assert!(schema.is_deprecated(name), "{name} should be deprecated");
    }
    assert!(!schema.is_deprecated("ssl_verification_mode"));
}

#[test]
fn test_legacy_force_peer_becomes_full() {
    let store = load_input("legacy_force_peer.json");
    let reporter = RecordingReporter::new();
    let ctx = ResolutionContext::new(&store).with_reporter(&reporter);

    let settings = resolve_tls(&ctx).unwrap();

    assert_eq!(settings.verification_mode, Some(json!("full")));
    assert_eq!(settings.certificate, None);
    assert_eq!(
        reporter.notices(),
        vec![DeprecationNotice::AliasUsed {
            canonical: "ssl_verification_mode".into(),
            aliases: vec!["ssl_verify_mode".into()],
        }]
    );
}

#[test]
fn test_mixed_verification_names_both_parameters() {
    let store = load_input("mixed_verification.json");
    let err = resolve_tls(&ResolutionContext::new(&store)).unwrap_err();

    assert_eq!(
        err,
        Error::User(UserConfigurationError::AmbiguousConfiguration {
            canonical: "ssl_verification_mode".into(),
            aliases: vec!["ssl_verify_mode".to_string()].into(),
        })
    );
    let message = err.to_string();
    assert!(message.contains("ssl_verification_mode"));
    assert!(message.contains("ssl_verify_mode"));
}

#[test]
fn test_certificate_without_key_reports_every_problem_of_that_rule() {
    let store = load_input("certificate_without_key.json");
    let err = resolve_tls(&ResolutionContext::new(&store)).unwrap_err();

    // Required is checked before conflicting.
    assert_eq!(
        err.to_string(),
        "Using `ssl_certificate` requires `ssl_key` to also be set"
    );
}

#[test]
fn test_legacy_keystore_pair_is_renamed() {
    let store = load_input("legacy_keystore.json");
    let reporter = RecordingReporter::new();
    let settings = resolve_tls(&ResolutionContext::new(&store).with_reporter(&reporter)).unwrap();

    assert_eq!(
        settings,
        TlsSettings {
            verification_mode: Some(json!("full")),
            certificate: None,
            keystore_path: Some(json!("/etc/tls/legacy.jks")),
            keystore_password: Some(json!("changeit")),
        }
    );
    assert_eq!(reporter.len(), 2);
}

#[test]
fn test_peer_maps_to_certificate_and_other_values_pass_through() {
    for (legacy, expected) in [
        ("peer", "certificate"),
        ("force_peer", "full"),
        ("none", "none"),
    ] {
        let store = param_set(ssl_schema(), json!({"ssl_verify_mode": legacy}));
        let value = ResolutionContext::new(&store)
            .resolve("ssl_verification_mode", |n| {
                n.with_deprecated_mapping(["ssl_verify_mode"], ssl_verify_mode_remap)?;
                Ok(())
            })
            .unwrap();
        assert_eq!(value, Some(json!(expected)), "legacy value {legacy}");
    }
}

#[test]
fn test_canonical_default_when_nothing_set() {
    let store = param_set(ssl_schema(), json!({}));
    let value = ResolutionContext::new(&store)
        .resolve("ssl_verification_mode", |n| {
            n.with_deprecated_mapping(["ssl_verify_mode"], ssl_verify_mode_remap)?;
            Ok(())
        })
        .unwrap();
    assert_eq!(value, Some(json!("full")));
}

#[test]
fn test_tracing_reporter_with_subscriber() {
    // Another test binary may already own the global subscriber.
    let _ = param_alias::logging::init();

    let store = param_set(ssl_schema(), json!({"ssl_verify_mode": "peer"}));
    let reporter = TracingReporter;
    let value = ResolutionContext::new(&store)
        .with_reporter(&reporter)
        .resolve_deprecated_value("ssl_verify_mode", |v| ssl_verify_mode_remap([v]))
        .unwrap();
    assert_eq!(value, Some(json!("certificate")));
}

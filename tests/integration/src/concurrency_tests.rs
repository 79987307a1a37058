//! Concurrent resolution of a frozen normalizer

use param_alias::{NormalizerSettings, NoticeCadence, ResolutionContext};
use param_test_utils::{RecordingReporter, param_set, ssl_schema, ssl_verify_mode_remap};
use serde_json::json;
use std::thread;

#[test]
fn test_frozen_normalizer_resolves_from_many_threads() {
    let store = param_set(ssl_schema(), json!({"ssl_verify_mode": "peer"}));
    let reporter = RecordingReporter::new();
    let normalizer = ResolutionContext::new(&store)
        .with_reporter(&reporter)
        .normalizer("ssl_verification_mode", |n| {
            n.with_deprecated_mapping(["ssl_verify_mode"], ssl_verify_mode_remap)?;
            Ok(())
        })
        .unwrap();

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|| normalizer.value())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in results {
        assert_eq!(result.unwrap(), Some(json!("certificate")));
    }
    assert_eq!(reporter.len(), 8);
}

#[test]
fn test_once_cadence_holds_across_threads() {
    let store = param_set(ssl_schema(), json!({"ssl_verify_mode": "peer"}));
    let reporter = RecordingReporter::new();
    let normalizer = ResolutionContext::new(&store)
        .with_reporter(&reporter)
        .with_settings(NormalizerSettings::default().with_notice_cadence(NoticeCadence::Once))
        .normalizer("ssl_verification_mode", |n| {
            n.with_deprecated_mapping(["ssl_verify_mode"], ssl_verify_mode_remap)?;
            Ok(())
        })
        .unwrap();

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| normalizer.value().unwrap());
        }
    });

    assert_eq!(reporter.len(), 1);
}

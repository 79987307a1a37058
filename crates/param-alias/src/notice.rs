//! Deprecation notices and the sinks that receive them

use std::collections::HashSet;
use std::fmt;
use std::mem::Discriminant;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;

use crate::error::NameList;
use crate::settings::NoticeCadence;

/// Human-readable notice that a deprecated parameter or value was used.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeprecationNotice {
    /// A deprecated value was rewritten to its replacement.
    ValueChanged {
        parameter: String,
        original: Option<Value>,
        transformed: Option<Value>,
    },
    /// Deprecated aliases supplied the value of a canonical parameter.
    AliasUsed {
        canonical: String,
        aliases: Vec<String>,
    },
}

impl DeprecationNotice {
    /// The parameter users should now be setting.
    pub fn parameter(&self) -> &str {
        match self {
            DeprecationNotice::ValueChanged { parameter, .. } => parameter,
            DeprecationNotice::AliasUsed { canonical, .. } => canonical,
        }
    }

    fn key(&self) -> NoticeKey {
        (std::mem::discriminant(self), self.parameter().to_string())
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(value) => crate::comparator::canonical_string(value).into_owned(),
        None => "<unset>".to_string(),
    }
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeprecationNotice::ValueChanged {
                parameter,
                original,
                transformed,
            } => write!(
                f,
                "Value `{}` of `{}` is deprecated, using `{}` instead",
                display_value(original.as_ref()),
                parameter,
                display_value(transformed.as_ref())
            ),
            DeprecationNotice::AliasUsed { canonical, aliases } => write!(
                f,
                "Deprecated {} used in place of `{}`. Please set `{}` instead",
                NameList(aliases.clone()),
                canonical,
                canonical
            ),
        }
    }
}

/// Receives deprecation notices.
///
/// Passed explicitly to the resolution context; a missing reporter simply
/// means notices are dropped.
pub trait DeprecationReporter: Send + Sync {
    fn report(&self, notice: &DeprecationNotice);
}

/// Reporter that logs each notice as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl DeprecationReporter for TracingReporter {
    fn report(&self, notice: &DeprecationNotice) {
        tracing::warn!(
            target: crate::logging::DEPRECATION_TARGET,
            parameter = notice.parameter(),
            "{}",
            notice
        );
    }
}

type NoticeKey = (Discriminant<DeprecationNotice>, String);

/// Notices already reported, keyed by notice kind and parameter.
///
/// Shared by every rule resolved through the same context.
#[derive(Debug, Default)]
pub(crate) struct NoticeLedger {
    seen: Mutex<HashSet<NoticeKey>>,
}

impl NoticeLedger {
    /// True the first time `key` is recorded.
    fn record(&self, key: NoticeKey) -> bool {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key)
    }
}

/// Applies the configured notice cadence before handing notices to a reporter.
#[derive(Debug, Clone, Default)]
pub(crate) struct NoticeGate {
    cadence: NoticeCadence,
    ledger: Arc<NoticeLedger>,
}

impl NoticeGate {
    /// Gate with its own ledger.
    pub(crate) fn new(cadence: NoticeCadence) -> Self {
        Self::shared(cadence, Arc::default())
    }

    /// Gate recording into `ledger`, so `Once` holds across every rule using it.
    pub(crate) fn shared(cadence: NoticeCadence, ledger: Arc<NoticeLedger>) -> Self {
        Self { cadence, ledger }
    }

    /// Send the notice built by `build` if a reporter exists and the cadence allows it.
    pub(crate) fn emit(
        &self,
        reporter: Option<&dyn DeprecationReporter>,
        build: impl FnOnce() -> DeprecationNotice,
    ) {
        let Some(reporter) = reporter else {
            return;
        };
        let notice = build();
        let admitted = match self.cadence {
            NoticeCadence::EveryResolution => true,
            NoticeCadence::Once => self.ledger.record(notice.key()),
        };
        if admitted {
            reporter.report(&notice);
        } else {
            tracing::trace!(parameter = notice.parameter(), "Deprecation notice already reported");
        }
    }
}

//! Entry point bundling the collaborators every rule needs

use std::sync::Arc;

use param_store::ParameterStore;
use serde_json::Value;

use crate::Result;
use crate::normalizer::{ConfigNormalizer, Configurator};
use crate::notice::{DeprecationReporter, NoticeGate, NoticeLedger};
use crate::settings::NormalizerSettings;
use crate::value_rule::DeprecatedValueRule;

/// Store, optional reporter and settings shared by all resolutions of one
/// plugin instance.
///
/// With [`NoticeCadence::Once`](crate::NoticeCadence::Once) each deprecation
/// is reported once per parameter across every resolution made through this
/// context and its clones.
///
/// # Example
///
/// ```
/// use param_alias::{ResolutionContext, TracingReporter};
/// use param_store::{ParamSet, Schema};
/// use serde_json::json;
///
/// let schema = Schema::builder()
///     .param_with_default("ssl_verification_mode", "full")
///     .deprecated_param("ssl_verify_mode")
///     .build()
///     .unwrap();
/// let store = ParamSet::from_value(schema, json!({"ssl_verify_mode": "none"})).unwrap();
/// let reporter = TracingReporter;
///
/// let mode = ResolutionContext::new(&store)
///     .with_reporter(&reporter)
///     .resolve("ssl_verification_mode", |n| {
///         n.with_deprecated_alias("ssl_verify_mode")?;
///         Ok(())
///     })
///     .unwrap();
/// assert_eq!(mode, Some(json!("none")));
/// ```
#[derive(Clone)]
pub struct ResolutionContext<'a> {
    store: &'a (dyn ParameterStore + Sync),
    reporter: Option<&'a dyn DeprecationReporter>,
    settings: NormalizerSettings,
    ledger: Arc<NoticeLedger>,
}

impl<'a> ResolutionContext<'a> {
    /// Context without a reporter; notices are dropped.
    pub fn new(store: &'a (dyn ParameterStore + Sync)) -> Self {
        Self {
            store,
            reporter: None,
            settings: NormalizerSettings::default(),
            ledger: Arc::default(),
        }
    }

    pub fn with_reporter(mut self, reporter: &'a dyn DeprecationReporter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn with_settings(mut self, settings: NormalizerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> NormalizerSettings {
        self.settings
    }

    /// Build a frozen normalizer for `canonical`.
    ///
    /// Registration errors from `configure` are returned before any user
    /// input is examined.
    pub fn normalizer<F>(&self, canonical: &str, configure: F) -> Result<ConfigNormalizer<'a>>
    where
        F: FnOnce(&mut Configurator<'a>) -> Result<()>,
    {
        ConfigNormalizer::configure(canonical, self.store, self.reporter, self.gate(), configure)
    }

    /// Configure a normalizer for `canonical` and resolve it once.
    pub fn resolve<F>(&self, canonical: &str, configure: F) -> Result<Option<Value>>
    where
        F: FnOnce(&mut Configurator<'a>) -> Result<()>,
    {
        self.normalizer(canonical, configure)?.value()
    }

    /// Rewrite the value of `name` with `transform`, reporting any change.
    pub fn resolve_deprecated_value<T>(&self, name: &str, transform: T) -> Result<Option<Value>>
    where
        T: Fn(Option<Value>) -> Option<Value> + Send + Sync,
    {
        DeprecatedValueRule::new(name, transform)
            .with_gate(self.gate())
            .evaluate(self.store, self.reporter)
    }

    /// Like [`resolve_deprecated_value`](Self::resolve_deprecated_value) with
    /// a custom comparator deciding whether the value changed.
    pub fn resolve_deprecated_value_with<T, C>(
        &self,
        name: &str,
        transform: T,
        comparator: C,
    ) -> Result<Option<Value>>
    where
        T: Fn(Option<Value>) -> Option<Value> + Send + Sync,
        C: Fn(Option<&Value>, Option<&Value>) -> bool + Send + Sync,
    {
        DeprecatedValueRule::new(name, transform)
            .with_comparator(comparator)
            .with_gate(self.gate())
            .evaluate(self.store, self.reporter)
    }

    fn gate(&self) -> NoticeGate {
        NoticeGate::shared(self.settings.notice_cadence, Arc::clone(&self.ledger))
    }
}

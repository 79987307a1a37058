//! Single-parameter deprecated value rewriting
//!
//! Used when a parameter keeps its name but some of its accepted values are
//! renamed, e.g. `"peer"` becoming `"certificate"`.

use param_store::ParameterStore;
use serde_json::Value;

use crate::comparator::{Comparator, default_equivalent};
use crate::error::{ConfigurationError, Result, RuleKind};
use crate::notice::{DeprecationNotice, DeprecationReporter, NoticeGate};
use crate::settings::NoticeCadence;

type ValueTransform<'a> = Box<dyn Fn(Option<Value>) -> Option<Value> + Send + Sync + 'a>;

/// Rewrites the effective value of one parameter and reports changes.
pub struct DeprecatedValueRule<'a> {
    name: String,
    transform: ValueTransform<'a>,
    comparator: Comparator<'a>,
    gate: NoticeGate,
}

impl<'a> DeprecatedValueRule<'a> {
    /// Rule for `name` using the default comparator.
    pub fn new<T>(name: impl Into<String>, transform: T) -> Self
    where
        T: Fn(Option<Value>) -> Option<Value> + Send + Sync + 'a,
    {
        Self {
            name: name.into(),
            transform: Box::new(transform),
            comparator: Box::new(default_equivalent),
            gate: NoticeGate::default(),
        }
    }

    /// Replace the comparator deciding whether the transform changed the value.
    pub fn with_comparator<C>(mut self, comparator: C) -> Self
    where
        C: Fn(Option<&Value>, Option<&Value>) -> bool + Send + Sync + 'a,
    {
        self.comparator = Box::new(comparator);
        self
    }

    /// Report at most once over this rule's lifetime with [`NoticeCadence::Once`].
    pub fn with_cadence(self, cadence: NoticeCadence) -> Self {
        self.with_gate(NoticeGate::new(cadence))
    }

    pub(crate) fn with_gate(mut self, gate: NoticeGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check the rule against the schema.
    pub fn validate(&self, store: &dyn ParameterStore) -> Result<()> {
        if !store.exists(&self.name) {
            return Err(ConfigurationError::UnknownParameter {
                name: self.name.clone(),
                rule: RuleKind::DeprecatedValue,
            }
            .into());
        }
        Ok(())
    }

    /// Transform the current effective value, reporting when it changed.
    pub fn evaluate(
        &self,
        store: &dyn ParameterStore,
        reporter: Option<&dyn DeprecationReporter>,
    ) -> Result<Option<Value>> {
        self.validate(store)?;

        let original = store.effective_value(&self.name).cloned();
        let transformed = (self.transform)(original.clone());

        if !(self.comparator)(original.as_ref(), transformed.as_ref()) {
            tracing::debug!(parameter = %self.name, "Deprecated value rewritten");
            self.gate.emit(reporter, || DeprecationNotice::ValueChanged {
                parameter: self.name.clone(),
                original: original.clone(),
                transformed: transformed.clone(),
            });
        }

        Ok(transformed)
    }
}

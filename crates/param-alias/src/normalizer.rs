//! Per-parameter normalizer orchestrating mapping and constraint rules
//!
//! A [`ConfigNormalizer`] is configured exactly once through a callback that
//! receives a [`Configurator`]. Once the callback returns the normalizer is
//! frozen: the configurator is no longer reachable, so further registration
//! is impossible.
//!
//! Resolution runs in a fixed order and stops at the first failure:
//!
//! 1. required aliases
//! 2. dependent aliases
//! 3. conflicting aliases
//! 4. value computation (mapping rule if registered, else the canonical value)
//!
//! Structural checks run first so caller-supplied transforms never see an
//! ambiguous or incomplete configuration.

use std::sync::atomic::{AtomicU8, Ordering};

use param_store::ParameterStore;
use serde_json::Value;

use crate::constraint::{AliasConstraint, ConstraintKind};
use crate::error::{ConfigurationError, Result, RuleKind};
use crate::mapping::DeprecatedMappingRule;
use crate::notice::{DeprecationNotice, DeprecationReporter, NoticeGate};

/// Outcome of the most recent resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizerState {
    /// Frozen, not yet resolved
    Configured,
    /// Last resolution produced a value
    Resolved,
    /// Last resolution failed
    Failed,
}

impl NormalizerState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => NormalizerState::Resolved,
            2 => NormalizerState::Failed,
            _ => NormalizerState::Configured,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            NormalizerState::Configured => 0,
            NormalizerState::Resolved => 1,
            NormalizerState::Failed => 2,
        }
    }
}

/// Registration surface handed to the configure callback.
///
/// Every registration is validated immediately and each rule kind may be
/// registered at most once.
pub struct Configurator<'a> {
    canonical: String,
    store: &'a (dyn ParameterStore + Sync),
    mapping: Option<DeprecatedMappingRule<'a>>,
    required: Option<AliasConstraint>,
    dependent: Option<AliasConstraint>,
    conflicting: Option<AliasConstraint>,
}

impl<'a> Configurator<'a> {
    fn new(canonical: &str, store: &'a (dyn ParameterStore + Sync)) -> Self {
        Self {
            canonical: canonical.to_string(),
            store,
            mapping: None,
            required: None,
            dependent: None,
            conflicting: None,
        }
    }

    /// Name of the parameter being configured.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Fold the values of `aliases` into the canonical value with `transform`.
    ///
    /// # Example
    ///
    /// ```
    /// use param_alias::ResolutionContext;
    /// use param_store::{ParamSet, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::builder()
    ///     .param("size")
    ///     .deprecated_param("width")
    ///     .deprecated_param("height")
    ///     .build()
    ///     .unwrap();
    /// let store = ParamSet::from_value(schema, json!({"width": 2, "height": 3})).unwrap();
    ///
    /// let size = ResolutionContext::new(&store)
    ///     .resolve("size", |n| {
    ///         n.with_deprecated_mapping(["width", "height"], |[w, h]| {
    ///             Some(json!(format!("{}x{}", w?, h?)))
    ///         })?;
    ///         Ok(())
    ///     })
    ///     .unwrap();
    /// assert_eq!(size, Some(json!("2x3")));
    /// ```
    pub fn with_deprecated_mapping<const N: usize, F>(
        &mut self,
        aliases: [&str; N],
        transform: F,
    ) -> Result<&mut Self>
    where
        F: Fn([Option<Value>; N]) -> Option<Value> + Send + Sync + 'a,
    {
        self.set_mapping(DeprecatedMappingRule::new(aliases, transform))
    }

    /// Treat `alias` as a plain deprecated rename of the canonical parameter.
    pub fn with_deprecated_alias(&mut self, alias: &str) -> Result<&mut Self> {
        self.set_mapping(DeprecatedMappingRule::rename(alias))
    }

    /// Companions that must be present whenever the canonical value is.
    pub fn with_required_aliases<I, S>(&mut self, names: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_constraint(AliasConstraint::new(ConstraintKind::Required, names))
    }

    /// Companions that may only be supplied alongside the canonical value.
    pub fn with_dependent_aliases<I, S>(&mut self, names: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_constraint(AliasConstraint::new(ConstraintKind::Dependent, names))
    }

    /// Companions that must be absent when the canonical value is supplied.
    pub fn with_conflicting_aliases<I, S>(&mut self, names: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_constraint(AliasConstraint::new(ConstraintKind::Conflicting, names))
    }

    fn set_mapping(&mut self, rule: DeprecatedMappingRule<'a>) -> Result<&mut Self> {
        if self.mapping.is_some() {
            return Err(self.duplicate(RuleKind::DeprecatedMapping));
        }
        rule.validate(&self.canonical, self.store)?;
        self.mapping = Some(rule);
        Ok(self)
    }

    fn set_constraint(&mut self, constraint: AliasConstraint) -> Result<&mut Self> {
        let kind = constraint.kind();
        if self.slot(kind).is_some() {
            return Err(self.duplicate(kind.rule()));
        }
        constraint.validate(&self.canonical, self.store)?;

        for other in [&self.required, &self.dependent, &self.conflicting]
            .into_iter()
            .flatten()
        {
            if let Some(name) = constraint
                .companions()
                .iter()
                .find(|name| other.companions().contains(name))
            {
                return Err(ConfigurationError::OverlappingConstraint {
                    canonical: self.canonical.clone(),
                    name: name.clone(),
                    first: other.kind().rule(),
                    second: kind.rule(),
                }
                .into());
            }
        }

        *self.slot(kind) = Some(constraint);
        Ok(self)
    }

    fn slot(&mut self, kind: ConstraintKind) -> &mut Option<AliasConstraint> {
        match kind {
            ConstraintKind::Required => &mut self.required,
            ConstraintKind::Dependent => &mut self.dependent,
            ConstraintKind::Conflicting => &mut self.conflicting,
        }
    }

    fn duplicate(&self, rule: RuleKind) -> crate::Error {
        ConfigurationError::DuplicateRule {
            canonical: self.canonical.clone(),
            rule,
        }
        .into()
    }
}

/// Frozen rule set resolving the effective value of one canonical parameter.
///
/// Resolution only reads shared state, so a normalizer may be resolved
/// repeatedly and from several threads.
pub struct ConfigNormalizer<'a> {
    canonical: String,
    store: &'a (dyn ParameterStore + Sync),
    reporter: Option<&'a dyn DeprecationReporter>,
    mapping: Option<DeprecatedMappingRule<'a>>,
    constraints: Vec<AliasConstraint>,
    gate: NoticeGate,
    state: AtomicU8,
}

impl<'a> ConfigNormalizer<'a> {
    /// Validate the canonical name, run the configure callback, then freeze.
    pub(crate) fn configure<F>(
        canonical: &str,
        store: &'a (dyn ParameterStore + Sync),
        reporter: Option<&'a dyn DeprecationReporter>,
        gate: NoticeGate,
        configure: F,
    ) -> Result<Self>
    where
        F: FnOnce(&mut Configurator<'a>) -> Result<()>,
    {
        if !store.exists(canonical) {
            return Err(ConfigurationError::UnknownCanonical {
                name: canonical.to_string(),
            }
            .into());
        }

        let mut configurator = Configurator::new(canonical, store);
        configure(&mut configurator)?;

        let Configurator {
            canonical,
            mapping,
            required,
            dependent,
            conflicting,
            ..
        } = configurator;

        tracing::debug!(
            canonical = %canonical,
            mapping = mapping.is_some(),
            required = required.is_some(),
            dependent = dependent.is_some(),
            conflicting = conflicting.is_some(),
            "Configured normalizer"
        );

        Ok(Self {
            canonical,
            store,
            reporter,
            mapping,
            constraints: [required, dependent, conflicting]
                .into_iter()
                .flatten()
                .collect(),
            gate,
            state: AtomicU8::new(NormalizerState::Configured.as_u8()),
        })
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Outcome of the most recent call to [`value`](Self::value).
    pub fn state(&self) -> NormalizerState {
        NormalizerState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Compute the effective value of the canonical parameter.
    ///
    /// Deterministic for a given store state; the only side effect is the
    /// deprecation notice when deprecated aliases supplied the value.
    pub fn value(&self) -> Result<Option<Value>> {
        let result = self.compute();
        let state = match result {
            Ok(_) => NormalizerState::Resolved,
            Err(_) => NormalizerState::Failed,
        };
        self.state.store(state.as_u8(), Ordering::Release);
        result
    }

    fn compute(&self) -> Result<Option<Value>> {
        for constraint in &self.constraints {
            constraint.check(&self.canonical, self.store)?;
        }

        let Some(mapping) = &self.mapping else {
            return Ok(self.store.effective_value(&self.canonical).cloned());
        };

        let outcome = mapping.evaluate(&self.canonical, self.store)?;
        if !outcome.supplied_aliases.is_empty() {
            self.gate.emit(self.reporter, || DeprecationNotice::AliasUsed {
                canonical: self.canonical.clone(),
                aliases: outcome.supplied_aliases.clone(),
            });
        }
        Ok(outcome.value)
    }
}

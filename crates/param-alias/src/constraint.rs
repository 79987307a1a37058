//! Structural constraints between a canonical parameter and its companions
//!
//! | Kind        | Active when canonical is | Violated when a companion is |
//! |-------------|--------------------------|------------------------------|
//! | Required    | effectively present      | effectively absent           |
//! | Dependent   | effectively absent       | explicitly supplied          |
//! | Conflicting | explicitly supplied      | effectively present          |
//!
//! A companion that only carries its default satisfies `Required`, does not
//! trigger `Dependent`, but does trigger `Conflicting`.

use param_store::ParameterStore;

use crate::error::{ConfigurationError, Result, RuleKind, UserConfigurationError};

/// Relationship between a canonical parameter and a set of companions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Companions must be present whenever the canonical parameter is.
    Required,
    /// Companions may only be supplied together with the canonical parameter.
    Dependent,
    /// Companions must be absent when the canonical parameter is supplied.
    Conflicting,
}

impl ConstraintKind {
    pub fn rule(self) -> RuleKind {
        match self {
            ConstraintKind::Required => RuleKind::RequiredAliases,
            ConstraintKind::Dependent => RuleKind::DependentAliases,
            ConstraintKind::Conflicting => RuleKind::ConflictingAliases,
        }
    }
}

/// A constraint over a non-empty set of companion names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConstraint {
    kind: ConstraintKind,
    companions: Vec<String>,
}

impl AliasConstraint {
    pub fn new<I, S>(kind: ConstraintKind, companions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            companions: companions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn companions(&self) -> &[String] {
        &self.companions
    }

    /// Check the companion set against the schema of `store`.
    pub fn validate(&self, canonical: &str, store: &dyn ParameterStore) -> Result<()> {
        let rule = self.kind.rule();
        if self.companions.is_empty() {
            return Err(ConfigurationError::EmptyNameList {
                canonical: canonical.to_string(),
                rule,
            }
            .into());
        }
        for (i, name) in self.companions.iter().enumerate() {
            if name == canonical {
                return Err(ConfigurationError::CanonicalInOwnSet {
                    canonical: canonical.to_string(),
                    rule,
                }
                .into());
            }
            if self.companions[..i].contains(name) {
                return Err(ConfigurationError::DuplicateName {
                    canonical: canonical.to_string(),
                    name: name.clone(),
                    rule,
                }
                .into());
            }
            if !store.exists(name) {
                return Err(ConfigurationError::UnknownParameter {
                    name: name.clone(),
                    rule,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Evaluate against live store state, naming every violating companion.
    pub fn check(&self, canonical: &str, store: &dyn ParameterStore) -> Result<()> {
        let canonical_present = store.effective_value(canonical).is_some();

        let error = match self.kind {
            ConstraintKind::Required if canonical_present => {
                let missing = self.collect(|name| store.effective_value(name).is_none());
                (!missing.is_empty()).then(|| UserConfigurationError::MissingRequired {
                    canonical: canonical.to_string(),
                    missing: missing.into(),
                })
            }
            ConstraintKind::Dependent if !canonical_present => {
                let supplied = self.collect(|name| store.was_supplied(name));
                (!supplied.is_empty()).then(|| UserConfigurationError::DependentWithoutCanonical {
                    canonical: canonical.to_string(),
                    supplied: supplied.into(),
                })
            }
            ConstraintKind::Conflicting if store.was_supplied(canonical) => {
                let conflicting = self.collect(|name| store.effective_value(name).is_some());
                (!conflicting.is_empty()).then(|| UserConfigurationError::ConflictingParameters {
                    canonical: canonical.to_string(),
                    conflicting: conflicting.into(),
                })
            }
            _ => None,
        };

        match error {
            Some(error) => {
                tracing::debug!(canonical, rule = %self.kind.rule(), "Alias constraint violated");
                Err(error.into())
            }
            None => Ok(()),
        }
    }

    fn collect(&self, mut predicate: impl FnMut(&str) -> bool) -> Vec<String> {
        self.companions
            .iter()
            .filter(|name| predicate(name))
            .cloned()
            .collect()
    }
}

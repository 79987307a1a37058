//! Folding deprecated aliases into a canonical parameter
//!
//! A mapping rule declares `N` deprecated alias names and, for `N > 1`, a
//! transform taking exactly `N` values. The transform arity is carried by a
//! const generic, so a mismatch between alias count and transform signature
//! does not compile.

use param_store::ParameterStore;
use serde_json::Value;

use crate::error::{ConfigurationError, Result, RuleKind, UserConfigurationError};

type FoldFn<'a> = Box<dyn Fn(&dyn ParameterStore) -> Option<Value> + Send + Sync + 'a>;

/// Result of evaluating a mapping rule.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MappingOutcome {
    /// The value the canonical parameter resolves to
    pub(crate) value: Option<Value>,
    /// Aliases the user explicitly supplied, in declared order
    pub(crate) supplied_aliases: Vec<String>,
}

/// N-ary fold of deprecated alias values into a canonical value.
///
/// Registered through [`Configurator`](crate::Configurator), which validates
/// the rule before it can be evaluated.
pub struct DeprecatedMappingRule<'a> {
    aliases: Vec<String>,
    transform: Option<FoldFn<'a>>,
}

impl<'a> DeprecatedMappingRule<'a> {
    /// Fold `aliases` through `transform`.
    ///
    /// The transform receives the effective value of every alias in declared
    /// order, defaults included.
    pub fn new<const N: usize, F>(aliases: [&str; N], transform: F) -> Self
    where
        F: Fn([Option<Value>; N]) -> Option<Value> + Send + Sync + 'a,
    {
        let names: [String; N] = aliases.map(str::to_string);
        let fold = move |store: &dyn ParameterStore| {
            transform(std::array::from_fn(|i| store.effective_value(&names[i]).cloned()))
        };
        Self {
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            transform: Some(Box::new(fold)),
        }
    }

    /// Single alias whose value passes through unchanged.
    pub fn rename(alias: &str) -> Self {
        Self {
            aliases: vec![alias.to_string()],
            transform: None,
        }
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Check the aliases against the schema of `store`.
    pub fn validate(&self, canonical: &str, store: &dyn ParameterStore) -> Result<()> {
        let rule = RuleKind::DeprecatedMapping;
        if self.aliases.is_empty() {
            return Err(ConfigurationError::EmptyNameList {
                canonical: canonical.to_string(),
                rule,
            }
            .into());
        }
        for (i, alias) in self.aliases.iter().enumerate() {
            if alias == canonical {
                return Err(ConfigurationError::CanonicalInOwnSet {
                    canonical: canonical.to_string(),
                    rule,
                }
                .into());
            }
            if self.aliases[..i].contains(alias) {
                return Err(ConfigurationError::DuplicateName {
                    canonical: canonical.to_string(),
                    name: alias.clone(),
                    rule,
                }
                .into());
            }
            if !store.exists(alias) {
                return Err(ConfigurationError::UnknownParameter {
                    name: alias.clone(),
                    rule,
                }
                .into());
            }
            if !store.is_deprecated(alias) {
                return Err(ConfigurationError::NotDeprecated {
                    canonical: canonical.to_string(),
                    name: alias.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Resolve the canonical value, honouring precedence between the
    /// canonical parameter and its aliases.
    ///
    /// - no alias supplied: the canonical effective value, transform not run
    /// - canonical and any alias supplied: ambiguous, every supplied alias named
    /// - only aliases supplied: the transform over all alias effective values
    pub(crate) fn evaluate(
        &self,
        canonical: &str,
        store: &dyn ParameterStore,
    ) -> Result<MappingOutcome> {
        let supplied: Vec<String> = self
            .aliases
            .iter()
            .filter(|alias| store.was_supplied(alias))
            .cloned()
            .collect();

        if supplied.is_empty() {
            return Ok(MappingOutcome {
                value: store.effective_value(canonical).cloned(),
                supplied_aliases: supplied,
            });
        }

        if store.was_supplied(canonical) {
            tracing::debug!(canonical, aliases = ?supplied, "Canonical and deprecated aliases both supplied");
            return Err(UserConfigurationError::AmbiguousConfiguration {
                canonical: canonical.to_string(),
                aliases: supplied.into(),
            }
            .into());
        }

        let value = match &self.transform {
            Some(transform) => transform(store),
            None => self
                .aliases
                .first()
                .and_then(|alias| store.effective_value(alias).cloned()),
        };

        tracing::debug!(canonical, aliases = ?supplied, "Resolved canonical value from deprecated aliases");
        Ok(MappingOutcome {
            value,
            supplied_aliases: supplied,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use param_store::{ParamSet, Schema};
    use serde_json::json;

    fn schema() -> Schema {
        Schema::builder()
            .param_with_default("target", "default-target")
            .param("plain")
            .def(param_store::ParamDef::new("old_a").with_default("a0").deprecated())
            .deprecated_param("old_b")
            .build()
            .unwrap()
    }

    fn store(raw: Value) -> ParamSet {
        ParamSet::from_value(schema(), raw).unwrap()
    }

    fn concat([a, b]: [Option<Value>; 2]) -> Option<Value> {
        let a = a.and_then(|v| v.as_str().map(str::to_string)).unwrap_or_default();
        let b = b.and_then(|v| v.as_str().map(str::to_string)).unwrap_or_default();
        Some(json!(format!("{a}+{b}")))
    }

    #[test]
    fn test_transform_not_called_without_aliases() {
        let rule = DeprecatedMappingRule::new(["old_a", "old_b"], |_: [Option<Value>; 2]| {
            panic!("transform must not run")
        });
        let outcome = rule.evaluate("target", &store(json!({"target": "t"}))).unwrap();
        assert_eq!(outcome.value, Some(json!("t")));
        assert!(outcome.supplied_aliases.is_empty());
    }

    #[test]
    fn test_nothing_supplied_returns_canonical_default() {
        let rule = DeprecatedMappingRule::new(["old_a", "old_b"], concat);
        let outcome = rule.evaluate("target", &store(json!({}))).unwrap();
        assert_eq!(outcome.value, Some(json!("default-target")));
    }

    #[test]
    fn test_fold_receives_defaults_in_declared_order() {
        let rule = DeprecatedMappingRule::new(["old_a", "old_b"], concat);
        let outcome = rule.evaluate("target", &store(json!({"old_b": "b1"}))).unwrap();
        assert_eq!(outcome.value, Some(json!("a0+b1")));
        assert_eq!(outcome.supplied_aliases, vec!["old_b".to_string()]);
    }

    #[test]
    fn test_ambiguous_names_all_supplied_aliases() {
        let rule = DeprecatedMappingRule::new(["old_a", "old_b"], concat);
        let err = rule
            .evaluate("target", &store(json!({"target": "t", "old_a": "a", "old_b": "b"})))
            .unwrap_err();
        assert_eq!(
            err,
            Error::User(UserConfigurationError::AmbiguousConfiguration {
                canonical: "target".into(),
                aliases: vec!["old_a".to_string(), "old_b".to_string()].into(),
            })
        );
    }

    #[test]
    fn test_rename_passes_value_through() {
        let rule = DeprecatedMappingRule::rename("old_b");
        let outcome = rule.evaluate("target", &store(json!({"old_b": 7}))).unwrap();
        assert_eq!(outcome.value, Some(json!(7)));
    }

    #[test]
    fn test_validate_rejects_non_deprecated_alias() {
        let rule = DeprecatedMappingRule::rename("plain");
        let err = rule.validate("target", &store(json!({}))).unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::NotDeprecated { ref name, .. }) if name == "plain"
        ));
    }

    #[test]
    fn test_validate_rejects_empty_and_self_reference() {
        let store = store(json!({}));

        let empty = DeprecatedMappingRule::new([], |[]: [Option<Value>; 0]| None);
        assert!(matches!(
            empty.validate("target", &store),
            Err(Error::Configuration(ConfigurationError::EmptyNameList { .. }))
        ));

        let own = DeprecatedMappingRule::rename("target");
        assert!(matches!(
            own.validate("target", &store),
            Err(Error::Configuration(ConfigurationError::CanonicalInOwnSet { .. }))
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_and_duplicate() {
        let store = store(json!({}));

        let unknown = DeprecatedMappingRule::rename("nope");
        assert!(matches!(
            unknown.validate("target", &store),
            Err(Error::Configuration(ConfigurationError::UnknownParameter { .. }))
        ));

        let dup = DeprecatedMappingRule::new(["old_a", "old_a"], concat);
        assert!(matches!(
            dup.validate("target", &store),
            Err(Error::Configuration(ConfigurationError::DuplicateName { .. }))
        ));
    }
}

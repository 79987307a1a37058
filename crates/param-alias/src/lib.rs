//! Deprecated parameter resolution for plugin configuration.
//!
//! Plugins rename parameters over time. This crate computes the single
//! effective value of a canonical parameter from its own value, from values
//! supplied through deprecated aliases, and from structural constraints with
//! companion parameters, failing loudly whenever the user's intent is
//! ambiguous.
//!
//! # Architecture
//!
//! ```text
//!               ResolutionContext
//!              /                 \
//!     ConfigNormalizer      DeprecatedValueRule
//!       /          \                |
//! AliasConstraint  DeprecatedMappingRule
//!              \        |        /
//!        ParameterStore (param-store)   DeprecationReporter
//! ```
//!
//! # Errors
//!
//! [`ConfigurationError`] covers rule registration mistakes made by the
//! plugin author. [`UserConfigurationError`] covers invalid end-user input
//! and always names every offending parameter at once.

pub mod comparator;
pub mod constraint;
pub mod context;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod normalizer;
pub mod notice;
pub mod settings;
pub mod value_rule;

#[cfg(test)]
mod test_support;

pub use comparator::{default_equivalent, values_equivalent};
pub use constraint::{AliasConstraint, ConstraintKind};
pub use context::ResolutionContext;
pub use error::{ConfigurationError, Error, NameList, Result, RuleKind, UserConfigurationError};
pub use mapping::DeprecatedMappingRule;
pub use normalizer::{ConfigNormalizer, Configurator, NormalizerState};
pub use notice::{DeprecationNotice, DeprecationReporter, TracingReporter};
pub use settings::{NormalizerSettings, NoticeCadence};
pub use value_rule::DeprecatedValueRule;

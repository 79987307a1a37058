//! Error types for param-alias
//!
//! Errors fall in two disjoint classes:
//!
//! - [`ConfigurationError`]: the plugin author wired the rules wrong. These
//!   are raised while rules are registered, before any user input is read.
//! - [`UserConfigurationError`]: the end user's configuration is ambiguous or
//!   incomplete. These are raised while resolving and name every offending
//!   parameter in a single report.

use std::fmt;

/// Result type for param-alias operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while registering or resolving alias rules
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Rule registration mistake made by the plugin author
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Invalid combination of parameters supplied by the end user
    #[error(transparent)]
    User(#[from] UserConfigurationError),
}

impl Error {
    /// True when the end user, not the plugin author, must act.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::User(_))
    }

    /// Every parameter name the error refers to, canonical first.
    pub fn offending_names(&self) -> Vec<&str> {
        match self {
            Error::Configuration(err) => err.names(),
            Error::User(err) => err.names(),
        }
    }
}

/// Kind of rule an error or log line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    DeprecatedValue,
    DeprecatedMapping,
    RequiredAliases,
    DependentAliases,
    ConflictingAliases,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::DeprecatedValue => write!(f, "deprecated value"),
            RuleKind::DeprecatedMapping => write!(f, "deprecated mapping"),
            RuleKind::RequiredAliases => write!(f, "required aliases"),
            RuleKind::DependentAliases => write!(f, "dependent aliases"),
            RuleKind::ConflictingAliases => write!(f, "conflicting aliases"),
        }
    }
}

/// Ordered list of parameter names, displayed as `` `a`, `b` ``.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameList(pub Vec<String>);

impl NameList {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for NameList {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl fmt::Display for NameList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "`{}`", name)?;
        }
        Ok(())
    }
}

/// Mistakes in how a plugin registers its alias rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Unknown canonical parameter `{name}`")]
    UnknownCanonical { name: String },

    #[error("Unknown parameter `{name}` referenced by {rule} rule")]
    UnknownParameter { name: String, rule: RuleKind },

    #[error("Parameter `{name}` must be marked deprecated to be an alias of `{canonical}`")]
    NotDeprecated { canonical: String, name: String },

    #[error("The {rule} rule of `{canonical}` needs at least one parameter name")]
    EmptyNameList { canonical: String, rule: RuleKind },

    #[error("`{canonical}` cannot be listed in its own {rule} rule")]
    CanonicalInOwnSet { canonical: String, rule: RuleKind },

    #[error("The {rule} rule is already configured for `{canonical}`")]
    DuplicateRule { canonical: String, rule: RuleKind },

    #[error("`{name}` is listed more than once in the {rule} rule of `{canonical}`")]
    DuplicateName {
        canonical: String,
        name: String,
        rule: RuleKind,
    },

    #[error("`{name}` appears in both the {first} and {second} rules of `{canonical}`")]
    OverlappingConstraint {
        canonical: String,
        name: String,
        first: RuleKind,
        second: RuleKind,
    },
}

impl ConfigurationError {
    fn names(&self) -> Vec<&str> {
        match self {
            ConfigurationError::UnknownCanonical { name }
            | ConfigurationError::UnknownParameter { name, .. } => vec![name.as_str()],
            ConfigurationError::NotDeprecated { canonical, name }
            | ConfigurationError::DuplicateName { canonical, name, .. }
            | ConfigurationError::OverlappingConstraint { canonical, name, .. } => {
                vec![canonical.as_str(), name.as_str()]
            }
            ConfigurationError::EmptyNameList { canonical, .. }
            | ConfigurationError::CanonicalInOwnSet { canonical, .. }
            | ConfigurationError::DuplicateRule { canonical, .. } => vec![canonical.as_str()],
        }
    }
}

/// Invalid end-user configuration, reported once with every offending name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserConfigurationError {
    #[error(
        "Both `{canonical}` and its deprecated alias {aliases} have been set. \
         Please only set `{canonical}`"
    )]
    AmbiguousConfiguration { canonical: String, aliases: NameList },

    #[error("Using `{canonical}` requires {missing} to also be set")]
    MissingRequired { canonical: String, missing: NameList },

    #[error("Setting {supplied} requires `{canonical}` to also be set")]
    DependentWithoutCanonical { canonical: String, supplied: NameList },

    #[error("`{canonical}` cannot be used together with {conflicting}")]
    ConflictingParameters {
        canonical: String,
        conflicting: NameList,
    },
}

impl UserConfigurationError {
    /// The canonical parameter the error was raised for.
    pub fn canonical(&self) -> &str {
        match self {
            UserConfigurationError::AmbiguousConfiguration { canonical, .. }
            | UserConfigurationError::MissingRequired { canonical, .. }
            | UserConfigurationError::DependentWithoutCanonical { canonical, .. }
            | UserConfigurationError::ConflictingParameters { canonical, .. } => canonical.as_str(),
        }
    }

    /// Companion or alias names that caused the error.
    pub fn companions(&self) -> &NameList {
        match self {
            UserConfigurationError::AmbiguousConfiguration { aliases, .. } => aliases,
            UserConfigurationError::MissingRequired { missing, .. } => missing,
            UserConfigurationError::DependentWithoutCanonical { supplied, .. } => supplied,
            UserConfigurationError::ConflictingParameters { conflicting, .. } => conflicting,
        }
    }

    fn names(&self) -> Vec<&str> {
        std::iter::once(self.canonical())
            .chain(self.companions().names().iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_list_display() {
        let names = NameList::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(names.to_string(), "`a`, `b`");
        assert_eq!(NameList::default().to_string(), "");
    }

    #[test]
    fn test_ambiguous_message_names_everything() {
        let err = UserConfigurationError::AmbiguousConfiguration {
            canonical: "ssl_verification_mode".into(),
            aliases: vec!["ssl_verify_mode".to_string()].into(),
        };
        assert_eq!(
            err.to_string(),
            "Both `ssl_verification_mode` and its deprecated alias `ssl_verify_mode` \
             have been set. Please only set `ssl_verification_mode`"
        );
    }

    #[test]
    fn test_error_classes_are_disjoint() {
        let user: Error = UserConfigurationError::MissingRequired {
            canonical: "new_config".into(),
            missing: vec!["another_config".to_string()].into(),
        }
        .into();
        let config: Error = ConfigurationError::DuplicateRule {
            canonical: "new_config".into(),
            rule: RuleKind::RequiredAliases,
        }
        .into();

        assert!(user.is_user_error());
        assert!(!config.is_user_error());
        assert_eq!(user.offending_names(), vec!["new_config", "another_config"]);
        assert_eq!(config.offending_names(), vec!["new_config"]);
    }

    #[test]
    fn test_transparent_display() {
        let err: Error = ConfigurationError::EmptyNameList {
            canonical: "x".into(),
            rule: RuleKind::DeprecatedMapping,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "The deprecated mapping rule of `x` needs at least one parameter name"
        );
    }
}

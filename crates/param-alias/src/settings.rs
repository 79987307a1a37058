//! Settings for the resolution engine itself

use serde::{Deserialize, Serialize};

/// How often a rule reports the same deprecation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoticeCadence {
    /// Report every time a value is resolved.
    #[default]
    EveryResolution,
    /// Report each deprecation at most once per resolution context.
    Once,
}

/// Engine settings, usually embedded in the host's own configuration file.
///
/// # Example TOML
///
/// ```toml
/// notice_cadence = "once"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizerSettings {
    #[serde(default)]
    pub notice_cadence: NoticeCadence,
}

impl NormalizerSettings {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn with_notice_cadence(mut self, cadence: NoticeCadence) -> Self {
        self.notice_cadence = cadence;
        self
    }
}

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Locale reported when a machine has none configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Machine-wide settings.
///
/// Settings are loaded from JSON by hosts; every field has a default so a partial (or empty)
/// object is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSettings {
    /// User-visible machine name.
    #[serde(default)]
    pub name: String,
    /// Locale used by formatting callers (e.g. number and date display).
    #[serde(default = "crate::serde_defaults::default_locale")]
    pub locale: String,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl MachineSettings {
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json).map_err(|err| ModelError::InvalidSettings(err.to_string()))
    }

    /// Effective locale; an empty configured locale falls back to [`DEFAULT_LOCALE`].
    #[must_use]
    pub fn locale(&self) -> &str {
        if self.locale.trim().is_empty() {
            DEFAULT_LOCALE
        } else {
            &self.locale
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let settings = MachineSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, MachineSettings::default());
        assert_eq!(settings.locale(), "en");
    }

    #[test]
    fn configured_locale_is_kept() {
        let settings = MachineSettings::from_json_str(r#"{"name":"M1","locale":"de"}"#).unwrap();
        assert_eq!(settings.name, "M1");
        assert_eq!(settings.locale(), "de");
    }

    #[test]
    fn blank_locale_falls_back_to_default() {
        let settings = MachineSettings {
            locale: "  ".into(),
            ..MachineSettings::default()
        };
        assert_eq!(settings.locale(), DEFAULT_LOCALE);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = MachineSettings::from_json_str("{").unwrap_err();
        assert!(matches!(err, ModelError::InvalidSettings(_)));
    }
}

use serde::Deserialize;
use user_preferences_sdk::DEFAULT_LANGUAGE;

/// Configuration for the user-preferences module (`modules.user_preferences`).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreferencesConfig {
    /// Reported for users who never saved preferences.
    #[serde(default)]
    pub default_dark_mode: bool,
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            default_dark_mode: false,
            default_language: default_language(),
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_owned()
}

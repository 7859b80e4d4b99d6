use secrecy::SecretString;
use serde::Deserialize;

/// Configuration for the insurance advisor (`modules.insurance_advisor`).
///
/// Without an `api_key` every answer comes from the canned responses.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL of an OpenAI-compatible API; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_owned()
}

fn default_model() -> String {
    "gpt-4o-mini".to_owned()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f64 {
    0.7
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn defaults_have_no_key() {
        let cfg: AdvisorConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.base_url, "https://api.openai.com/v1");
        assert_eq!(cfg.max_tokens, 500);
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[test]
    #[allow(clippy::use_debug)]
    fn key_is_read_and_redacted_in_debug() {
        let cfg: AdvisorConfig =
            serde_json::from_str(r#"{"api_key": "sk-test", "model": "gpt-4o"}"#).unwrap();
        assert_eq!(cfg.api_key.as_ref().unwrap().expose_secret(), "sk-test");
        assert!(!format!("{cfg:?}").contains("sk-test"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<AdvisorConfig>(r#"{"apikey": "x"}"#).is_err());
    }
}

/// Languages with localized prompts. Anything else is served in English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    French,
    Spanish,
    German,
}

impl Language {
    /// Resolve a language tag by its primary subtag, so `fr-CA` is French.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match primary_subtag(code).as_str() {
            "fr" => Self::French,
            "es" => Self::Spanish,
            "de" => Self::German,
            _ => Self::English,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
            Self::Spanish => "es",
            Self::German => "de",
        }
    }
}

/// Lowercase primary subtag of a language tag (`pt_BR` gives `pt`).
#[must_use]
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

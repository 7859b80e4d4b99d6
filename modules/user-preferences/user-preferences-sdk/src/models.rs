//! Public models for the user-preferences module.

use chrono::{DateTime, Utc};

pub const DEFAULT_LANGUAGE: &str = "en";

/// Display preferences of one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPreferences {
    pub user_id: String,
    pub dark_mode: bool,
    pub language: String,
    /// `None` until the user first saves preferences.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update. Absent fields keep the stored (or default) value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreferencesPatch {
    pub dark_mode: Option<bool>,
    pub language: Option<String>,
}

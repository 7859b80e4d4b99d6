use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use user_preferences_sdk::{PreferencesPatch, UserPreferences};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesDto {
    pub user_id: String,
    pub dark_mode: bool,
    pub language: String,
    /// Absent until the preferences are first saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<UserPreferences> for PreferencesDto {
    fn from(p: UserPreferences) -> Self {
        Self {
            user_id: p.user_id,
            dark_mode: p.dark_mode,
            language: p.language,
            updated_at: p.updated_at,
        }
    }
}

/// Body of `PUT /user/preferences`. Missing fields keep their current value.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    #[serde(default)]
    pub dark_mode: Option<bool>,
    #[serde(default)]
    pub language: Option<String>,
}

impl From<UpdatePreferencesRequest> for PreferencesPatch {
    fn from(req: UpdatePreferencesRequest) -> Self {
        Self {
            dark_mode: req.dark_mode,
            language: req.language,
        }
    }
}

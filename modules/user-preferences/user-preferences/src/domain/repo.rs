use async_trait::async_trait;
use user_preferences_sdk::UserPreferences;

/// Preference documents keyed by user id.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    async fn find(&self, user_id: &str) -> anyhow::Result<Option<UserPreferences>>;

    /// Insert or overwrite the user's document.
    async fn upsert(&self, prefs: &UserPreferences) -> anyhow::Result<()>;
}

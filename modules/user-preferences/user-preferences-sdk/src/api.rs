use async_trait::async_trait;
use ledgerkit::Principal;

use crate::errors::PreferencesError;
use crate::models::{PreferencesPatch, UserPreferences};

/// Public API trait for the user-preferences module.
///
/// Preferences belong to the principal's user, not to the household.
#[async_trait]
pub trait UserPreferencesApi: Send + Sync {
    /// Stored preferences, or defaults when none were saved.
    async fn get_preferences(&self, principal: &Principal)
    -> Result<UserPreferences, PreferencesError>;

    async fn update_preferences(
        &self,
        principal: &Principal,
        patch: PreferencesPatch,
    ) -> Result<UserPreferences, PreferencesError>;
}

use std::sync::Arc;

use async_trait::async_trait;
use ledgerkit::Principal;
use user_preferences_sdk::{
    PreferencesError, PreferencesPatch, UserPreferences, UserPreferencesApi,
};

use crate::domain::service::Service;

/// In-process `UserPreferencesApi` used by other modules.
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UserPreferencesApi for LocalClient {
    async fn get_preferences(
        &self,
        principal: &Principal,
    ) -> Result<UserPreferences, PreferencesError> {
        self.service
            .get_preferences(principal)
            .await
            .map_err(Into::into)
    }

    async fn update_preferences(
        &self,
        principal: &Principal,
        patch: PreferencesPatch,
    ) -> Result<UserPreferences, PreferencesError> {
        self.service
            .update_preferences(principal, patch)
            .await
            .map_err(Into::into)
    }
}

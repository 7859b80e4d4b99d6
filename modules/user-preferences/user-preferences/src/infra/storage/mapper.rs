use user_preferences_sdk::UserPreferences;

use super::entity;

impl From<entity::Model> for UserPreferences {
    fn from(entity: entity::Model) -> Self {
        Self {
            user_id: entity.user_id,
            dark_mode: entity.dark_mode,
            language: entity.language,
            updated_at: Some(entity.updated_at),
        }
    }
}

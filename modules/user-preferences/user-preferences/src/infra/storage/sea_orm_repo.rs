use async_trait::async_trait;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait, sea_query::OnConflict};
use user_preferences_sdk::UserPreferences;

use crate::domain::repo::PreferencesRepository;

use super::entity::{self, Entity as PreferencesEntity};

pub struct SeaOrmPreferencesRepository {
    db: DatabaseConnection,
}

impl SeaOrmPreferencesRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferencesRepository for SeaOrmPreferencesRepository {
    async fn find(&self, user_id: &str) -> anyhow::Result<Option<UserPreferences>> {
        let result = PreferencesEntity::find_by_id(user_id.to_owned())
            .one(&self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn upsert(&self, prefs: &UserPreferences) -> anyhow::Result<()> {
        let updated_at = prefs
            .updated_at
            .ok_or_else(|| anyhow::anyhow!("preferences must carry updated_at to be stored"))?;

        let active_model = entity::ActiveModel {
            user_id: ActiveValue::Set(prefs.user_id.clone()),
            dark_mode: ActiveValue::Set(prefs.dark_mode),
            language: ActiveValue::Set(prefs.language.clone()),
            updated_at: ActiveValue::Set(updated_at),
        };

        PreferencesEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(entity::Column::UserId)
                    .update_columns([
                        entity::Column::DarkMode,
                        entity::Column::Language,
                        entity::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

use assets_sdk::models::Asset;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::domain::repo::AssetsRepository;

use super::entity::{self, Entity as AssetEntity};
use super::mapper::to_active_model;

pub struct SeaOrmAssetsRepository {
    db: DatabaseConnection,
}

impl SeaOrmAssetsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AssetsRepository for SeaOrmAssetsRepository {
    async fn list(&self, household_id: &str) -> anyhow::Result<Vec<Asset>> {
        let rows = AssetEntity::find()
            .filter(entity::Column::HouseholdId.eq(household_id))
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .all(&self.db)
            .await?;

        rows.into_iter().map(Asset::try_from).collect()
    }

    async fn find(&self, household_id: &str, id: Uuid) -> anyhow::Result<Option<Asset>> {
        let row = AssetEntity::find_by_id(id)
            .filter(entity::Column::HouseholdId.eq(household_id))
            .one(&self.db)
            .await?;

        row.map(Asset::try_from).transpose()
    }

    async fn insert(&self, asset: &Asset) -> anyhow::Result<()> {
        to_active_model(asset)?.insert(&self.db).await?;
        Ok(())
    }

    async fn replace(&self, asset: &Asset) -> anyhow::Result<bool> {
        let result = AssetEntity::update_many()
            .set(to_active_model(asset)?)
            .filter(entity::Column::Id.eq(asset.id))
            .filter(entity::Column::HouseholdId.eq(asset.household_id.as_str()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, household_id: &str, id: Uuid) -> anyhow::Result<bool> {
        let result = AssetEntity::delete_many()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::HouseholdId.eq(household_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

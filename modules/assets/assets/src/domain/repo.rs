use assets_sdk::models::Asset;
use async_trait::async_trait;
use uuid::Uuid;

/// Asset persistence, partitioned by household.
///
/// Every lookup filters on `household_id`, so an id owned by another
/// household behaves exactly like a missing one.
#[async_trait]
pub trait AssetsRepository: Send + Sync {
    /// Assets of the household, newest first.
    async fn list(&self, household_id: &str) -> anyhow::Result<Vec<Asset>>;

    async fn find(&self, household_id: &str, id: Uuid) -> anyhow::Result<Option<Asset>>;

    async fn insert(&self, asset: &Asset) -> anyhow::Result<()>;

    /// Overwrite a stored asset. Returns `false` when no row matched.
    async fn replace(&self, asset: &Asset) -> anyhow::Result<bool>;

    /// Returns `false` when no row matched.
    async fn delete(&self, household_id: &str, id: Uuid) -> anyhow::Result<bool>;
}

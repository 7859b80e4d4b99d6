use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub household_id: String,
    pub make: String,
    pub model: String,
    pub serial_number: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub category: Option<String>,
    pub value: f64,
    pub purchase_date: Option<Date>,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,
    /// JSON array of `{"high": .., "low": ..}` objects.
    #[sea_orm(column_type = "Text")]
    pub image_urls_json: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

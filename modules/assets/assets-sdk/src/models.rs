//! Public models for the assets module.
//!
//! Transport-agnostic structures shared by the assets module and its
//! consumers. Wire representations live in each module's REST DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

pub const MAX_IMAGES_PER_ASSET: usize = 4;

/// Category label for assets stored without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Signed URLs for the two renditions of one uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    pub high: String,
    pub low: String,
}

impl ImageUrls {
    /// Pair that points both renditions at the same URL.
    #[must_use]
    pub fn single(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            low: url.clone(),
            high: url,
        }
    }
}

/// A catalogued household belonging.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub id: Uuid,
    pub household_id: String,
    pub make: String,
    pub model: String,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub value: f64,
    pub purchase_date: Option<NaiveDate>,
    /// Legacy single image; equals `image_urls[0].high` when the list is non-empty.
    pub image_url: Option<String>,
    pub image_urls: Vec<ImageUrls>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating an asset. Identity and timestamps are server-assigned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewAsset {
    pub make: String,
    pub model: String,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub value: f64,
    pub purchase_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub image_urls: Option<Vec<ImageUrls>>,
}

/// Partial update. `None` keeps the stored value; for the nullable fields
/// `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssetPatch {
    pub make: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub value: Option<f64>,
    pub purchase_date: Option<Option<NaiveDate>>,
    pub image_url: Option<String>,
    pub image_urls: Option<Vec<ImageUrls>>,
}

/// Aggregate value of a household's catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortfolioSummary {
    pub count: usize,
    pub total_value: f64,
    /// Sorted by `total_value`, largest first.
    pub by_category: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub count: usize,
    pub total_value: f64,
}

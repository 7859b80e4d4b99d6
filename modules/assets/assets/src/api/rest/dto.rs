use assets_sdk::models::{
    Asset, AssetPatch, CategoryTotal, ImageUrls, NewAsset, PortfolioSummary,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::fields::AssetFields;

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
#[allow(clippy::option_option)]
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// `YYYY-MM-DD`, or an RFC 3339 timestamp truncated to its date. Blank is absent.
pub fn parse_purchase_date(raw: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| Some(ts.date_naive()))
        .map_err(|_| {
            DomainError::validation(
                AssetFields::PURCHASE_DATE,
                "must be a YYYY-MM-DD date or an RFC 3339 timestamp",
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageUrlsDto {
    pub high: String,
    pub low: String,
}

impl From<ImageUrls> for ImageUrlsDto {
    fn from(p: ImageUrls) -> Self {
        Self {
            high: p.high,
            low: p.low,
        }
    }
}

impl From<ImageUrlsDto> for ImageUrls {
    fn from(p: ImageUrlsDto) -> Self {
        Self {
            high: p.high,
            low: p.low,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetDto {
    pub id: Uuid,
    pub household_id: String,
    pub make: String,
    pub model: String,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub value: f64,
    pub purchase_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub image_urls: Vec<ImageUrlsDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Asset> for AssetDto {
    fn from(a: Asset) -> Self {
        Self {
            id: a.id,
            household_id: a.household_id,
            make: a.make,
            model: a.model,
            serial_number: a.serial_number,
            description: a.description,
            category: a.category,
            value: a.value,
            purchase_date: a.purchase_date,
            image_url: a.image_url,
            image_urls: a.image_urls.into_iter().map(Into::into).collect(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// Body of `POST /assets`. Any `id` or `householdId` in the body is ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAssetRequest {
    pub make: String,
    pub model: String,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Required; a missing value is rejected rather than stored as zero.
    pub value: Option<f64>,
    pub purchase_date: Option<String>,
    pub image_url: Option<String>,
    pub image_urls: Option<Vec<ImageUrlsDto>>,
}

impl TryFrom<CreateAssetRequest> for NewAsset {
    type Error = DomainError;

    fn try_from(req: CreateAssetRequest) -> Result<Self, DomainError> {
        let value = req
            .value
            .ok_or_else(|| DomainError::validation(AssetFields::VALUE, "is required"))?;
        Ok(Self {
            purchase_date: parse_purchase_date(req.purchase_date.as_deref())?,
            make: req.make,
            model: req.model,
            serial_number: req.serial_number,
            description: req.description,
            category: req.category,
            value,
            image_url: req.image_url,
            image_urls: req
                .image_urls
                .map(|urls| urls.into_iter().map(Into::into).collect()),
        })
    }
}

/// Body of `PUT /assets/{id}`. Absent fields keep their stored value;
/// `null` clears the optional ones.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::option_option)]
pub struct UpdateAssetRequest {
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub serial_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub purchase_date: Option<Option<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_urls: Option<Vec<ImageUrlsDto>>,
}

impl TryFrom<UpdateAssetRequest> for AssetPatch {
    type Error = DomainError;

    fn try_from(req: UpdateAssetRequest) -> Result<Self, DomainError> {
        let purchase_date = match req.purchase_date {
            None => None,
            Some(raw) => Some(parse_purchase_date(raw.as_deref())?),
        };
        Ok(Self {
            make: req.make,
            model: req.model,
            serial_number: req.serial_number,
            description: req.description,
            category: req.category,
            value: req.value,
            purchase_date,
            image_url: req.image_url,
            image_urls: req
                .image_urls
                .map(|urls| urls.into_iter().map(Into::into).collect()),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedDto {
    pub id: Uuid,
    pub deleted: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotalDto {
    pub category: String,
    pub count: usize,
    pub total_value: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummaryDto {
    pub count: usize,
    pub total_value: f64,
    pub by_category: Vec<CategoryTotalDto>,
}

impl From<PortfolioSummary> for PortfolioSummaryDto {
    fn from(s: PortfolioSummary) -> Self {
        Self {
            count: s.count,
            total_value: s.total_value,
            by_category: s
                .by_category
                .into_iter()
                .map(|c: CategoryTotal| CategoryTotalDto {
                    category: c.category,
                    count: c.count,
                    total_value: c.total_value,
                })
                .collect(),
        }
    }
}

/// Response of `POST /upload`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Same as `imageUrls.high`.
    pub image_url: String,
    pub image_urls: ImageUrlsDto,
}

impl From<ImageUrls> for UploadResponse {
    fn from(urls: ImageUrls) -> Self {
        Self {
            image_url: urls.high.clone(),
            image_urls: urls.into(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProxyQuery {
    /// Absolute URL of the image to fetch.
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlobQuery {
    /// Unix expiry of the signature.
    pub se: Option<String>,
    /// Hex HMAC signature.
    pub sig: Option<String>,
}

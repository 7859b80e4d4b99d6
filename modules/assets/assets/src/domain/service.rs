use std::collections::BTreeMap;
use std::sync::Arc;

use assets_sdk::models::{
    Asset, AssetPatch, CategoryTotal, ImageUrls, MAX_IMAGES_PER_ASSET, NewAsset, PortfolioSummary,
    UNCATEGORIZED,
};
use chrono::Utc;
use ledgerkit::Principal;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::error::DomainError;
use super::fields::AssetFields;
use super::images::ImageService;
use super::repo::AssetsRepository;

pub struct ServiceConfig {
    pub max_field_length: usize,
    pub max_description_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_field_length: 200,
            max_description_length: 4000,
        }
    }
}

pub struct Service {
    repo: Arc<dyn AssetsRepository>,
    images: Arc<ImageService>,
    config: ServiceConfig,
}

impl Service {
    #[must_use]
    pub fn new(
        repo: Arc<dyn AssetsRepository>,
        images: Arc<ImageService>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            images,
            config,
        }
    }

    #[must_use]
    pub fn images(&self) -> &Arc<ImageService> {
        &self.images
    }

    #[instrument(skip(self, principal), fields(household_id = %principal.household_id()))]
    pub async fn list_assets(&self, principal: &Principal) -> Result<Vec<Asset>, DomainError> {
        let assets = self.repo.list(principal.household_id()).await?;
        debug!(count = assets.len(), "listed assets");
        Ok(assets)
    }

    #[instrument(skip(self, principal), fields(household_id = %principal.household_id(), %id))]
    pub async fn get_asset(&self, principal: &Principal, id: Uuid) -> Result<Asset, DomainError> {
        self.repo
            .find(principal.household_id(), id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    #[instrument(skip_all, fields(household_id = %principal.household_id()))]
    pub async fn create_asset(
        &self,
        principal: &Principal,
        new_asset: NewAsset,
    ) -> Result<Asset, DomainError> {
        let now = Utc::now();
        let (image_url, image_urls) =
            reconcile_images(None, new_asset.image_url, new_asset.image_urls);

        let asset = Asset {
            id: Uuid::new_v4(),
            household_id: principal.household_id().to_owned(),
            make: new_asset.make.trim().to_owned(),
            model: new_asset.model.trim().to_owned(),
            serial_number: normalize_optional(new_asset.serial_number),
            description: normalize_optional(new_asset.description),
            category: normalize_optional(new_asset.category),
            value: new_asset.value,
            purchase_date: new_asset.purchase_date,
            image_url,
            image_urls,
            created_at: now,
            updated_at: now,
        };
        self.validate(&asset)?;

        self.repo.insert(&asset).await?;
        info!(asset_id = %asset.id, "created asset");
        Ok(asset)
    }

    #[instrument(skip(self, principal, patch), fields(household_id = %principal.household_id(), %id))]
    pub async fn update_asset(
        &self,
        principal: &Principal,
        id: Uuid,
        patch: AssetPatch,
    ) -> Result<Asset, DomainError> {
        let existing = self
            .repo
            .find(principal.household_id(), id)
            .await?
            .ok_or(DomainError::NotFound)?;

        let (image_url, image_urls) = if patch.image_url.is_none() && patch.image_urls.is_none() {
            (existing.image_url.clone(), existing.image_urls.clone())
        } else {
            reconcile_images(Some(&existing), patch.image_url, patch.image_urls)
        };

        let asset = Asset {
            id: existing.id,
            household_id: existing.household_id,
            make: patch
                .make
                .map_or(existing.make, |v| v.trim().to_owned()),
            model: patch
                .model
                .map_or(existing.model, |v| v.trim().to_owned()),
            serial_number: merge_optional(existing.serial_number, patch.serial_number),
            description: merge_optional(existing.description, patch.description),
            category: merge_optional(existing.category, patch.category),
            value: patch.value.unwrap_or(existing.value),
            purchase_date: patch.purchase_date.unwrap_or(existing.purchase_date),
            image_url,
            image_urls,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.validate(&asset)?;

        if !self.repo.replace(&asset).await? {
            return Err(DomainError::NotFound);
        }
        info!("updated asset");
        Ok(asset)
    }

    /// Delete an asset; its images go first and failures there are only logged.
    #[instrument(skip(self, principal), fields(household_id = %principal.household_id(), %id))]
    pub async fn delete_asset(&self, principal: &Principal, id: Uuid) -> Result<(), DomainError> {
        let existing = self
            .repo
            .find(principal.household_id(), id)
            .await?
            .ok_or(DomainError::NotFound)?;

        self.images.delete_urls(image_urls_of(&existing)).await;

        if !self.repo.delete(principal.household_id(), id).await? {
            return Err(DomainError::NotFound);
        }
        info!("deleted asset");
        Ok(())
    }

    #[instrument(skip(self, principal), fields(household_id = %principal.household_id()))]
    pub async fn portfolio_summary(
        &self,
        principal: &Principal,
    ) -> Result<PortfolioSummary, DomainError> {
        let assets = self.repo.list(principal.household_id()).await?;
        Ok(summarize(&assets))
    }

    fn validate(&self, asset: &Asset) -> Result<(), DomainError> {
        self.validate_required(AssetFields::MAKE, &asset.make)?;
        self.validate_required(AssetFields::MODEL, &asset.model)?;
        self.validate_length(
            AssetFields::SERIAL_NUMBER,
            asset.serial_number.as_deref(),
            self.config.max_field_length,
        )?;
        self.validate_length(
            AssetFields::CATEGORY,
            asset.category.as_deref(),
            self.config.max_field_length,
        )?;
        self.validate_length(
            AssetFields::DESCRIPTION,
            asset.description.as_deref(),
            self.config.max_description_length,
        )?;

        if !asset.value.is_finite() || asset.value < 0.0 {
            return Err(DomainError::validation(
                AssetFields::VALUE,
                "must be a finite number greater than or equal to 0",
            ));
        }

        if asset.image_urls.len() > MAX_IMAGES_PER_ASSET {
            return Err(DomainError::validation(
                AssetFields::IMAGE_URLS,
                format!("at most {MAX_IMAGES_PER_ASSET} images are allowed"),
            ));
        }
        if asset
            .image_urls
            .iter()
            .any(|pair| pair.high.trim().is_empty() || pair.low.trim().is_empty())
        {
            return Err(DomainError::validation(
                AssetFields::IMAGE_URLS,
                "image urls must not be empty",
            ));
        }
        Ok(())
    }

    fn validate_required(&self, field: &str, value: &str) -> Result<(), DomainError> {
        if value.is_empty() {
            return Err(DomainError::validation(field, "is required"));
        }
        self.validate_length(field, Some(value), self.config.max_field_length)
    }

    #[allow(clippy::unused_self)]
    fn validate_length(
        &self,
        field: &str,
        value: Option<&str>,
        max: usize,
    ) -> Result<(), DomainError> {
        if value.is_some_and(|v| v.chars().count() > max) {
            return Err(DomainError::validation(
                field,
                format!("exceeds maximum length of {max}"),
            ));
        }
        Ok(())
    }
}

/// Resolve the stored `(image_url, image_urls)` pair.
///
/// A supplied list wins and its first `high` becomes the legacy url; an empty
/// list clears both. A lone legacy url becomes a one-element list. With
/// neither supplied the existing values (if any) are kept.
fn reconcile_images(
    existing: Option<&Asset>,
    image_url: Option<String>,
    image_urls: Option<Vec<ImageUrls>>,
) -> (Option<String>, Vec<ImageUrls>) {
    match (image_urls, image_url) {
        (Some(urls), _) => (urls.first().map(|p| p.high.clone()), urls),
        (None, Some(url)) => match normalize_optional(Some(url)) {
            Some(url) => (Some(url.clone()), vec![ImageUrls::single(url)]),
            None => (None, Vec::new()),
        },
        (None, None) => existing.map_or((None, Vec::new()), |a| {
            (a.image_url.clone(), a.image_urls.clone())
        }),
    }
}

/// Every stored image URL of an asset, the legacy one included.
fn image_urls_of(asset: &Asset) -> Vec<&str> {
    let mut urls: Vec<&str> = asset
        .image_urls
        .iter()
        .flat_map(|p| [p.high.as_str(), p.low.as_str()])
        .collect();
    if let Some(legacy) = asset.image_url.as_deref()
        && !urls.contains(&legacy)
    {
        urls.push(legacy);
    }
    urls
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn merge_optional(current: Option<String>, patch: Option<Option<String>>) -> Option<String> {
    match patch {
        Some(v) => normalize_optional(v),
        None => current,
    }
}

pub(crate) fn summarize(assets: &[Asset]) -> PortfolioSummary {
    let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for asset in assets {
        let category = asset.category.as_deref().unwrap_or(UNCATEGORIZED);
        let entry = groups.entry(category).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += asset.value;
    }

    let mut by_category: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, (count, total_value))| CategoryTotal {
            category: category.to_owned(),
            count,
            total_value,
        })
        .collect();
    // BTreeMap order keeps ties alphabetical
    by_category.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));

    PortfolioSummary {
        count: assets.len(),
        total_value: assets.iter().map(|a| a.value).sum(),
        by_category,
    }
}

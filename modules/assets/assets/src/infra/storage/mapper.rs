use anyhow::Context;
use assets_sdk::models::{Asset, ImageUrls};
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};

use super::entity;

#[derive(Serialize, Deserialize)]
struct StoredImage {
    high: String,
    low: String,
}

impl TryFrom<entity::Model> for Asset {
    type Error = anyhow::Error;

    fn try_from(e: entity::Model) -> anyhow::Result<Self> {
        let mut image_urls = decode_image_urls(&e.image_urls_json)
            .with_context(|| format!("corrupt image list on asset {}", e.id))?;
        // rows written before multi-image support only carry the legacy url
        if image_urls.is_empty()
            && let Some(url) = e.image_url.as_deref()
        {
            image_urls.push(ImageUrls::single(url));
        }

        Ok(Self {
            id: e.id,
            household_id: e.household_id,
            make: e.make,
            model: e.model,
            serial_number: e.serial_number,
            description: e.description,
            category: e.category,
            value: e.value,
            purchase_date: e.purchase_date,
            image_url: e.image_url,
            image_urls,
            created_at: e.created_at,
            updated_at: e.updated_at,
        })
    }
}

/// Full active model for an insert or overwrite of `asset`.
pub fn to_active_model(asset: &Asset) -> anyhow::Result<entity::ActiveModel> {
    Ok(entity::ActiveModel {
        id: ActiveValue::Set(asset.id),
        household_id: ActiveValue::Set(asset.household_id.clone()),
        make: ActiveValue::Set(asset.make.clone()),
        model: ActiveValue::Set(asset.model.clone()),
        serial_number: ActiveValue::Set(asset.serial_number.clone()),
        description: ActiveValue::Set(asset.description.clone()),
        category: ActiveValue::Set(asset.category.clone()),
        value: ActiveValue::Set(asset.value),
        purchase_date: ActiveValue::Set(asset.purchase_date),
        image_url: ActiveValue::Set(asset.image_url.clone()),
        image_urls_json: ActiveValue::Set(encode_image_urls(&asset.image_urls)?),
        created_at: ActiveValue::Set(asset.created_at),
        updated_at: ActiveValue::Set(asset.updated_at),
    })
}

fn encode_image_urls(urls: &[ImageUrls]) -> anyhow::Result<String> {
    let stored: Vec<StoredImage> = urls
        .iter()
        .map(|p| StoredImage {
            high: p.high.clone(),
            low: p.low.clone(),
        })
        .collect();
    serde_json::to_string(&stored).context("failed to encode image list")
}

fn decode_image_urls(raw: &str) -> anyhow::Result<Vec<ImageUrls>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let stored: Vec<StoredImage> = serde_json::from_str(raw)?;
    Ok(stored
        .into_iter()
        .map(|s| ImageUrls {
            high: s.high,
            low: s.low,
        })
        .collect())
}

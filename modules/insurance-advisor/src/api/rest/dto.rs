use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::models::{AdvisedAsset, ChatRequest};

/// Asset as sent by the client. Fields the advisor does not use are ignored.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatAssetDto {
    pub make: String,
    pub model: String,
    pub category: Option<String>,
    pub value: f64,
}

impl From<ChatAssetDto> for AdvisedAsset {
    fn from(a: ChatAssetDto) -> Self {
        Self {
            make: a.make,
            model: a.model,
            category: a.category,
            value: a.value,
        }
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatRequestDto {
    pub message: String,
    /// Catalog to discuss. The household's stored assets when omitted.
    pub assets: Option<Vec<ChatAssetDto>>,
    /// Language code such as `fr` or `de-AT`. The saved preference when omitted.
    pub language: Option<String>,
}

impl From<ChatRequestDto> for ChatRequest {
    fn from(req: ChatRequestDto) -> Self {
        Self {
            message: req.message,
            assets: req
                .assets
                .map(|assets| assets.into_iter().map(Into::into).collect()),
            language: req.language.filter(|l| !l.trim().is_empty()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponseDto {
    pub response: String,
}

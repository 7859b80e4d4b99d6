//! Assets SDK
//!
//! This crate provides the public API for the assets module:
//! - `AssetsApi` trait for inter-module communication
//! - Model types (`Asset`, `NewAsset`, `AssetPatch`, `PortfolioSummary`)
//! - Error type (`AssetsError`)

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::AssetsApi;
pub use errors::AssetsError;
pub use models::{
    Asset, AssetPatch, CategoryTotal, ImageUrls, MAX_IMAGES_PER_ASSET, NewAsset, PortfolioSummary,
    UNCATEGORIZED,
};

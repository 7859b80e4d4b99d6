//! Assets module implementation.
//!
//! The public API is defined in `assets-sdk` and re-exported here.

pub use assets_sdk::{
    Asset, AssetPatch, AssetsApi, AssetsError, ImageUrls, NewAsset, PortfolioSummary,
};

pub mod module;
pub use module::AssetsModule;

pub mod local_client;
pub use local_client::LocalClient;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use config::AssetsConfig;

#[cfg(test)]
pub(crate) mod test_support;

//! User preferences SDK
//!
//! - `UserPreferencesApi` trait for inter-module communication
//! - Model types (`UserPreferences`, `PreferencesPatch`)
//! - Error type (`PreferencesError`)

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::UserPreferencesApi;
pub use errors::PreferencesError;
pub use models::{DEFAULT_LANGUAGE, PreferencesPatch, UserPreferences};

//! User preferences module implementation.
//!
//! The public API is defined in `user-preferences-sdk` and re-exported here.

pub use user_preferences_sdk::{
    PreferencesError, PreferencesPatch, UserPreferences, UserPreferencesApi,
};

pub mod module;
pub use module::PreferencesModule;

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

pub use config::PreferencesConfig;

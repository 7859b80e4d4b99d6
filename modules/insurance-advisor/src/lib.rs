//! Insurance advice over the household's asset catalog.
//!
//! Answers come from an OpenAI-compatible chat endpoint when an API key is
//! configured, and from keyword-matched canned text otherwise.

pub mod module;
pub use module::AdvisorModule;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use config::AdvisorConfig;

#[cfg(test)]
pub(crate) mod test_support;

//! Platform kit shared by every HomeLedger module.
//!
//! Modules depend on this crate for the request-scoped [`Principal`], the
//! [`Problem`] error body and the process bootstrap helpers used by the
//! server binary.

pub mod auth;
pub mod config;
pub mod cors;
pub mod logging;
pub mod problem;
pub mod security;
pub mod shutdown;

pub use auth::{AuthConfig, AuthError, Authz};
pub use problem::{APPLICATION_PROBLEM_JSON, Problem, ValidationViolation};
pub use security::Principal;

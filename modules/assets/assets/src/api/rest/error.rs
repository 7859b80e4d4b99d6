use http::StatusCode;
use ledgerkit::problem::{self, Problem};

use crate::domain::error::DomainError;

/// Map a domain error to an RFC 9457 problem for the request at `instance`.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let (problem, code) = match e {
        DomainError::NotFound => (problem::not_found("Asset not found"), "assets.not_found"),
        DomainError::BlobNotFound => (problem::not_found("Blob not found"), "assets.blob_not_found"),
        DomainError::UpstreamNotFound => (
            problem::not_found("Upstream image not found"),
            "assets.upstream_not_found",
        ),
        DomainError::Validation { field, message } => {
            (problem::validation(field, message), "assets.validation")
        }
        DomainError::Upstream(_) => {
            tracing::error!(error = %e, "image proxy failed");
            (problem::internal_error(e.to_string()), "assets.upstream")
        }
        DomainError::Storage(_) | DomainError::Database(_) => {
            tracing::error!(error = ?e, "assets storage failure");
            (problem::internal_error(e.to_string()), "assets.internal")
        }
    };

    problem
        .with_type(format!("https://errors.homeledger.app/{code}"))
        .with_code(code)
        .with_instance(instance)
        .with_current_trace()
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "")
    }
}

pub fn bad_id(raw: &str, instance: &str) -> Problem {
    Problem::new(
        StatusCode::BAD_REQUEST,
        "Bad Request",
        format!("'{raw}' is not a valid asset id"),
    )
    .with_code("assets.invalid_id")
    .with_instance(instance)
    .with_current_trace()
}

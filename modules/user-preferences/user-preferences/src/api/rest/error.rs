use ledgerkit::problem::{self, Problem};

use crate::domain::error::DomainError;

pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let (problem, code) = match e {
        DomainError::Validation { field, message } => (
            problem::validation(field, message),
            "user_preferences.validation",
        ),
        DomainError::Database(_) => {
            tracing::error!(error = ?e, "Database error occurred");
            (
                problem::internal_error(e.to_string()),
                "user_preferences.internal",
            )
        }
    };

    problem
        .with_type(format!("https://errors.homeledger.app/{code}"))
        .with_code(code)
        .with_instance(instance)
        .with_current_trace()
}

use ledgerkit::problem::{self, Problem};

use crate::domain::error::DomainError;

pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let (problem, code) = match e {
        DomainError::Validation { field, message } => (
            problem::validation(field, message),
            "insurance_advisor.validation",
        ),
        DomainError::Internal(_) => {
            tracing::error!(error = ?e, "advice request failed");
            (
                problem::internal_error(e.to_string()),
                "insurance_advisor.internal",
            )
        }
    };

    problem
        .with_type(format!("https://errors.homeledger.app/{code}"))
        .with_code(code)
        .with_instance(instance)
        .with_current_trace()
}

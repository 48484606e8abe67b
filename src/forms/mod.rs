//! Submitted form values and their field-scoped errors.
//!
//! Every form checks all of its fields at once and reports one message per
//! failing field, a submission only proceeds when no field failed.

pub mod account;
pub mod user;
pub mod validation;

use validator::ValidationErrors;

fn first_message(errors: &ValidationErrors, field: &str) -> Option<String> {
    errors
        .field_errors()
        .get(field)
        .and_then(|issues| issues.first())
        .map(ToString::to_string)
}

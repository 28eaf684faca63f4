//! Business logic services.
//!
//! Every public service operation is total over its inputs: it never returns
//! `Err`. Failures are reported through the `errors` list of the returned
//! DTO, with the other fields echoing the caller's input. Infrastructure
//! failures are logged in full and surfaced as a generic per-operation
//! message, except in development mode where the detailed text goes through.

pub mod books;
pub mod users;

use validator::ValidationErrors;

use crate::{error::AppError, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, detailed_errors: bool) -> Self {
        Self {
            books: books::BooksService::new(repository.clone(), detailed_errors),
            users: users::UsersService::new(repository, detailed_errors),
        }
    }
}

/// Flatten a validation report into the error list, in declared field order.
pub(crate) fn validation_messages(report: &ValidationErrors, fields: &[&str]) -> Vec<String> {
    let field_errors = report.field_errors();
    let mut messages = Vec::new();
    for &field in fields {
        if let Some(errors) = field_errors.get(field) {
            for error in errors.iter() {
                match &error.message {
                    Some(message) => messages.push(message.to_string()),
                    None => messages.push(format!("Invalid value for {}", field)),
                }
            }
        }
    }
    messages
}

/// Fold a repository error into a DTO error list.
///
/// Not-found and conflict errors keep their specific message; anything else
/// is logged server-side and reported as `generic` unless detailed errors
/// are enabled.
pub(crate) fn append_error(
    errors: &mut Vec<String>,
    err: &AppError,
    generic: &str,
    detailed: bool,
) {
    match err {
        AppError::NotFound(message) | AppError::Conflict(message) => {
            errors.push(message.clone());
        }
        other => {
            tracing::error!(error = %other, "{}", generic);
            if detailed {
                errors.push(other.to_string());
            } else {
                errors.push(generic.to_string());
            }
        }
    }
}

//! Library user model and service-boundary DTO.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::BookDto;

/// Persisted library user record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field bundle exchanged at the service boundary.
///
/// `books` holds the user's currently-borrowed books when the operation
/// fetches them; `errors` is empty on success.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserDto {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "Please insert Name"))]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub books: Vec<BookDto>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl UserDto {
    pub fn from_record(user: User, books: Vec<BookDto>) -> Self {
        Self {
            id: Some(user.id),
            name: user.name,
            books,
            errors: Vec::new(),
        }
    }
}

//! Book model and service-boundary DTOs.
//!
//! The availability status is persisted as its name string through a
//! dedicated Postgres enum type (`book_status`); decoding an unknown label
//! fails as a database error instead of panicking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

/// Availability of a single book copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "book_status")]
pub enum BookStatus {
    Available,
    Borrowed,
}

impl Default for BookStatus {
    fn default() -> Self {
        BookStatus::Available
    }
}

impl BookStatus {
    /// Name string used for persistence and display
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Borrowed => "Borrowed",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown book status: {0}")]
pub struct UnknownStatus(String);

impl std::str::FromStr for BookStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(BookStatus::Available),
            "Borrowed" => Ok(BookStatus::Borrowed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Persisted book record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub status: BookStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field bundle exchanged at the service boundary.
///
/// `errors` is empty on success; on failure the remaining fields echo the
/// caller's input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookDto {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "Please insert Title"))]
    #[serde(default)]
    pub title: String,
    #[validate(length(min = 1, message = "Please insert Author"))]
    #[serde(default)]
    pub author: String,
    #[validate(length(min = 1, message = "Please insert ISBN"))]
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub status: BookStatus,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: Some(book.id),
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            status: book.status,
            errors: Vec::new(),
        }
    }
}

/// Search result bundle
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BooksDto {
    #[serde(default)]
    pub books: Vec<BookDto>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_available() {
        assert_eq!(BookStatus::default(), BookStatus::Available);
        assert_eq!(BookDto::default().status, BookStatus::Available);
    }

    #[test]
    fn status_name_mapping_round_trips() {
        for status in [BookStatus::Available, BookStatus::Borrowed] {
            let parsed: BookStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_status_name_is_rejected() {
        let err = "Lost".parse::<BookStatus>().unwrap_err();
        assert!(err.to_string().contains("Lost"));
    }

    #[test]
    fn dto_from_record_carries_all_fields() {
        let book = Book {
            id: 7,
            title: "My Book".to_string(),
            author: "Luca".to_string(),
            isbn: "XSD345".to_string(),
            status: BookStatus::Borrowed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let dto = BookDto::from(book);
        assert_eq!(dto.id, Some(7));
        assert_eq!(dto.title, "My Book");
        assert_eq!(dto.author, "Luca");
        assert_eq!(dto.isbn, "XSD345");
        assert_eq!(dto.status, BookStatus::Borrowed);
        assert!(dto.errors.is_empty());
    }
}

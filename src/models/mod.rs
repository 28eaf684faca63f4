//! Data models for Biblio

pub mod book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookDto, BookStatus, BooksDto};
pub use user::{User, UserDto};

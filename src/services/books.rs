//! Book catalog service: CRUD and search

use validator::Validate;

use crate::{
    models::book::{BookDto, BooksDto},
    repository::Repository,
};

use super::{append_error, validation_messages};

/// Validation order follows the field order reported to callers
const BOOK_FIELDS: &[&str] = &["author", "title", "isbn"];

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    detailed_errors: bool,
}

impl BooksService {
    pub fn new(repository: Repository, detailed_errors: bool) -> Self {
        Self {
            repository,
            detailed_errors,
        }
    }

    /// Add a new book. Returns the stored record with its assigned id, or
    /// the echoed input with one error per missing field.
    pub async fn add_book(&self, mut dto: BookDto) -> BookDto {
        dto.errors.clear();

        if let Err(report) = dto.validate() {
            dto.errors = validation_messages(&report, BOOK_FIELDS);
            return dto;
        }

        match self.repository.books.create(&dto).await {
            Ok(book) => BookDto::from(book),
            Err(err) => {
                append_error(
                    &mut dto.errors,
                    &err,
                    "An error occurred when adding the book",
                    self.detailed_errors,
                );
                dto
            }
        }
    }

    /// Update an existing book, overwriting all fields (status included)
    pub async fn update_book(&self, id: i32, mut dto: BookDto) -> BookDto {
        dto.errors.clear();

        if let Err(report) = dto.validate() {
            dto.errors = validation_messages(&report, BOOK_FIELDS);
            return dto;
        }

        match self.repository.books.update(id, &dto).await {
            Ok(book) => BookDto::from(book),
            Err(err) => {
                append_error(
                    &mut dto.errors,
                    &err,
                    "An error occurred when updating the book",
                    self.detailed_errors,
                );
                dto
            }
        }
    }

    /// Delete a book by id
    pub async fn delete_book(&self, id: i32) -> BookDto {
        let mut dto = BookDto::default();

        if let Err(err) = self.repository.books.delete(id).await {
            append_error(
                &mut dto.errors,
                &err,
                "An error occurred when deleting the book",
                self.detailed_errors,
            );
        }

        dto
    }

    /// Substring search over title, author and ISBN; up to 20 results
    /// ordered by title ascending.
    pub async fn search_book(&self, search: &str) -> BooksDto {
        let mut dto = BooksDto::default();

        if search.is_empty() {
            dto.errors.push("Please insert a string to search".to_string());
            return dto;
        }

        match self.repository.books.search(search).await {
            Ok(books) => {
                dto.books = books.into_iter().map(BookDto::from).collect();
                dto
            }
            Err(err) => {
                append_error(
                    &mut dto.errors,
                    &err,
                    "An error occurred when searching books",
                    self.detailed_errors,
                );
                dto
            }
        }
    }

    /// Get a book by id
    pub async fn get_book_by_id(&self, id: i32) -> BookDto {
        let mut dto = BookDto::default();

        match self.repository.books.get_by_id(id).await {
            Ok(book) => BookDto::from(book),
            Err(err) => {
                append_error(
                    &mut dto.errors,
                    &err,
                    "An error occurred when getting book by id",
                    self.detailed_errors,
                );
                dto
            }
        }
    }
}

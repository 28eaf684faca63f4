//! Book catalog endpoints.
//!
//! Handlers always answer 200: the service operations are total functions
//! and report failure through the `errors` list of the returned DTO.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::book::{BookDto, BooksDto};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Substring matched against title, author and ISBN
    pub q: Option<String>,
}

/// Search books by title, author or ISBN
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Up to 20 matches ordered by title; errors in-band", body = BooksDto)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<BooksDto> {
    let q = query.q.unwrap_or_default();
    Json(state.services.books.search_book(&q).await)
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details; errors in-band", body = BookDto)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Json<BookDto> {
    Json(state.services.books.get_book_by_id(id).await)
}

/// Add a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookDto,
    responses(
        (status = 200, description = "Created book with assigned id; errors in-band", body = BookDto)
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    Json(book): Json<BookDto>,
) -> Json<BookDto> {
    Json(state.services.books.add_book(book).await)
}

/// Update an existing book (full-field overwrite)
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookDto,
    responses(
        (status = 200, description = "Updated book; errors in-band", body = BookDto)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(book): Json<BookDto>,
) -> Json<BookDto> {
    Json(state.services.books.update_book(id, book).await)
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Empty DTO on success; errors in-band", body = BookDto)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Json<BookDto> {
    Json(state.services.books.delete_book(id).await)
}

//! User management and lending endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::models::user::UserDto;

/// Get user details by ID, with currently-borrowed books
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User with borrowed books; errors in-band", body = UserDto)
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Json<UserDto> {
    Json(state.services.users.get_user_by_id(id).await)
}

/// Add a new library user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserDto,
    responses(
        (status = 200, description = "Created user with assigned id; errors in-band", body = UserDto)
    )
)]
pub async fn add_user(
    State(state): State<crate::AppState>,
    Json(user): Json<UserDto>,
) -> Json<UserDto> {
    Json(state.services.users.add_user(user).await)
}

/// Update an existing user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UserDto,
    responses(
        (status = 200, description = "Updated user; errors in-band", body = UserDto)
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(user): Json<UserDto>,
) -> Json<UserDto> {
    Json(state.services.users.update_user(id, user).await)
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Empty DTO on success; errors in-band", body = UserDto)
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> Json<UserDto> {
    Json(state.services.users.delete_user(id).await)
}

/// Lend a book to a user
#[utoipa::path(
    post,
    path = "/users/{id}/borrow/{book_id}",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "User ID"),
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Refreshed user with borrowed books; errors in-band", body = UserDto)
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Path((id, book_id)): Path<(i32, i32)>,
) -> Json<UserDto> {
    Json(state.services.users.borrow_book(id, book_id).await)
}

/// Take a book back from a user
#[utoipa::path(
    post,
    path = "/users/{id}/return/{book_id}",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "User ID"),
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Refreshed user; errors in-band", body = UserDto)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path((id, book_id)): Path<(i32, i32)>,
) -> Json<UserDto> {
    Json(state.services.users.return_book(id, book_id).await)
}

//! User service: CRUD plus the borrow/return state transitions.
//!
//! A book's availability moves Available -> Borrowed on borrow (requires
//! prior status Available) and Borrowed -> Available on return (requires an
//! existing lending pair). No other transitions exist.

use validator::Validate;

use crate::{
    models::{
        book::{BookDto, BookStatus},
        user::UserDto,
    },
    repository::Repository,
};

use super::{append_error, validation_messages};

const USER_FIELDS: &[&str] = &["name"];

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    detailed_errors: bool,
}

impl UsersService {
    pub fn new(repository: Repository, detailed_errors: bool) -> Self {
        Self {
            repository,
            detailed_errors,
        }
    }

    /// Add a new library user
    pub async fn add_user(&self, mut dto: UserDto) -> UserDto {
        dto.errors.clear();

        if let Err(report) = dto.validate() {
            dto.errors = validation_messages(&report, USER_FIELDS);
            return dto;
        }

        match self.repository.users.create(&dto).await {
            Ok(user) => UserDto::from_record(user, Vec::new()),
            Err(err) => {
                append_error(
                    &mut dto.errors,
                    &err,
                    "An error occurred when adding the user",
                    self.detailed_errors,
                );
                dto
            }
        }
    }

    /// Update an existing user
    pub async fn update_user(&self, id: i32, mut dto: UserDto) -> UserDto {
        dto.errors.clear();

        if let Err(report) = dto.validate() {
            dto.errors = validation_messages(&report, USER_FIELDS);
            return dto;
        }

        match self.repository.users.update(id, &dto).await {
            Ok(user) => UserDto::from_record(user, Vec::new()),
            Err(err) => {
                append_error(
                    &mut dto.errors,
                    &err,
                    "An error occurred when updating the user",
                    self.detailed_errors,
                );
                dto
            }
        }
    }

    /// Delete a user by id
    pub async fn delete_user(&self, id: i32) -> UserDto {
        let mut dto = UserDto::default();

        if let Err(err) = self.repository.users.delete(id).await {
            append_error(
                &mut dto.errors,
                &err,
                "An error occurred when deleting the user",
                self.detailed_errors,
            );
        }

        dto
    }

    /// Get a user together with their currently-borrowed books
    pub async fn get_user_by_id(&self, id: i32) -> UserDto {
        let mut dto = UserDto::default();

        let user = match self.repository.users.get_by_id(id).await {
            Ok(user) => user,
            Err(err) => {
                append_error(
                    &mut dto.errors,
                    &err,
                    "An error occurred when getting user by id",
                    self.detailed_errors,
                );
                return dto;
            }
        };

        match self.repository.loans.books_for_user(id).await {
            Ok(books) => {
                UserDto::from_record(user, books.into_iter().map(BookDto::from).collect())
            }
            Err(err) => {
                // Best-effort payload: the user fields still come back
                let mut dto = UserDto::from_record(user, Vec::new());
                append_error(
                    &mut dto.errors,
                    &err,
                    "An error occurred when getting user by id",
                    self.detailed_errors,
                );
                dto
            }
        }
    }

    /// Lend a book to a user. Resolution failures for either id accumulate
    /// before the availability check; on success the refreshed user (with
    /// borrowed books) is returned.
    pub async fn borrow_book(&self, user_id: i32, book_id: i32) -> UserDto {
        let mut dto = UserDto::default();

        let user = self.repository.users.get_by_id(user_id).await;
        let book = self.repository.books.get_by_id(book_id).await;

        if let Err(err) = &user {
            append_error(
                &mut dto.errors,
                err,
                "An error occurred when borrowing the book",
                self.detailed_errors,
            );
        }
        if let Err(err) = &book {
            append_error(
                &mut dto.errors,
                err,
                "An error occurred when borrowing the book",
                self.detailed_errors,
            );
        }

        let (Ok(_), Ok(book)) = (user, book) else {
            return dto;
        };

        if book.status == BookStatus::Borrowed {
            dto.errors.push(format!("BookId {} not available", book_id));
            return dto;
        }

        match self.repository.loans.borrow(user_id, book_id).await {
            Ok(()) => self.get_user_by_id(user_id).await,
            Err(err) => {
                append_error(
                    &mut dto.errors,
                    &err,
                    "An error occurred when borrowing the book",
                    self.detailed_errors,
                );
                dto
            }
        }
    }

    /// Take a book back from a user. Fails if the user does not resolve, if
    /// the book is not currently lent to that user, or if the book record
    /// itself is gone; errors accumulate.
    pub async fn return_book(&self, user_id: i32, book_id: i32) -> UserDto {
        let mut dto = UserDto::default();

        let user = self.repository.users.get_by_id(user_id).await;
        if let Err(err) = &user {
            append_error(
                &mut dto.errors,
                err,
                "An error occurred when returning the book",
                self.detailed_errors,
            );
        }

        // The lending pair is only checkable once the user resolves
        if user.is_ok() {
            match self.repository.loans.is_borrowed_by(user_id, book_id).await {
                Ok(true) => {}
                Ok(false) => {
                    dto.errors.push(format!(
                        "BookId {} not found for UserId {}",
                        book_id, user_id
                    ));
                }
                Err(err) => {
                    append_error(
                        &mut dto.errors,
                        &err,
                        "An error occurred when returning the book",
                        self.detailed_errors,
                    );
                }
            }
        }

        if let Err(err) = self.repository.books.get_by_id(book_id).await {
            append_error(
                &mut dto.errors,
                &err,
                "An error occurred when returning the book",
                self.detailed_errors,
            );
        }

        if !dto.errors.is_empty() {
            return dto;
        }

        match self.repository.loans.return_book(user_id, book_id).await {
            Ok(()) => self.get_user_by_id(user_id).await,
            Err(err) => {
                append_error(
                    &mut dto.errors,
                    &err,
                    "An error occurred when returning the book",
                    self.detailed_errors,
                );
                dto
            }
        }
    }
}

//! Loans repository: the (user, book) lending relation.
//!
//! Borrow and return each run as a single transaction. The status flip on
//! borrow is a compare-and-swap on `status = 'Available'`, so two concurrent
//! borrow attempts on the same book cannot both commit; the loans table
//! additionally carries a uniqueness constraint on `book_id`.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookStatus},
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Check whether the given book is currently lent to the given user
    pub async fn is_borrowed_by(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM loans WHERE user_id = $1 AND book_id = $2)",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Books currently borrowed by a user, ordered by title
    pub async fn books_for_user(&self, user_id: i32) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.*
            FROM books b
            JOIN loans l ON l.book_id = b.id
            WHERE l.user_id = $1
            ORDER BY b.title
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Lend a book to a user: flip the status Available -> Borrowed and
    /// record the (user, book) pair, atomically.
    pub async fn borrow(&self, user_id: i32, book_id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let flipped = sqlx::query(
            "UPDATE books SET status = $1, updated_at = NOW() WHERE id = $2 AND status = $3",
        )
        .bind(BookStatus::Borrowed)
        .bind(book_id)
        .bind(BookStatus::Available)
        .execute(&mut *tx)
        .await?;

        // Zero rows means another borrow won the race or the book vanished
        if flipped.rows_affected() == 0 {
            return Err(AppError::Conflict(format!(
                "BookId {} not available",
                book_id
            )));
        }

        sqlx::query("INSERT INTO loans (user_id, book_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Return a borrowed book: remove the (user, book) pair and flip the
    /// status back to Available, atomically.
    pub async fn return_book(&self, user_id: i32, book_id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM loans WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        if removed.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "BookId {} not found for UserId {}",
                book_id, user_id
            )));
        }

        let flipped = sqlx::query(
            "UPDATE books SET status = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(BookStatus::Available)
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        if flipped.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("BookId {} not found", book_id)));
        }

        tx.commit().await?;

        Ok(())
    }
}

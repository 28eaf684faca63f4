//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDto},
};

/// Maximum number of rows returned by a catalog search
pub const SEARCH_LIMIT: i64 = 20;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("BookId {} not found", id)))
    }

    /// Insert a new book, status defaulted by the caller
    pub async fn create(&self, book: &BookDto) -> AppResult<Book> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, author, isbn, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.status)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Overwrite all fields of an existing book, status included
    pub async fn update(&self, id: i32, book: &BookDto) -> AppResult<Book> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $1, author = $2, isbn = $3, status = $4, updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("BookId {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Delete a book. Loan rows referencing it go away through the FK cascade.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("BookId {} not found", id)));
        }

        Ok(())
    }

    /// Substring search over title, author and ISBN, ordered by title.
    /// Case sensitivity follows the store's default collation.
    pub async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let pattern = like_pattern(query);

        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE title LIKE $1 OR author LIKE $1 OR isbn LIKE $1
            ORDER BY title
            LIMIT $2
            "#,
        )
        .bind(&pattern)
        .bind(SEARCH_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }
}

/// Build a LIKE pattern that matches the query as a literal substring.
/// `%`, `_` and `\` in the query are escaped (Postgres default escape is `\`).
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_query_is_wrapped_in_wildcards() {
        assert_eq!(like_pattern("Luca"), "%Luca%");
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(like_pattern("100%"), r"%100\%%");
        assert_eq!(like_pattern("my_book"), r"%my\_book%");
        assert_eq!(like_pattern(r"back\slash"), r"%back\\slash%");
    }
}

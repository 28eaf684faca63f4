//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserDto},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("UserId {} not found", id)))
    }

    /// Insert a new user
    pub async fn create(&self, user: &UserDto) -> AppResult<User> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO users (name) VALUES ($1) RETURNING id",
        )
        .bind(&user.name)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Overwrite the fields of an existing user
    pub async fn update(&self, id: i32, user: &UserDto) -> AppResult<User> {
        let result = sqlx::query("UPDATE users SET name = $1, updated_at = NOW() WHERE id = $2")
            .bind(&user.name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("UserId {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Delete a user. Outstanding loans go away through the FK cascade.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("UserId {} not found", id)));
        }

        Ok(())
    }
}

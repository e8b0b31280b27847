//! Copies repository

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::copy::{Copy, CopyStatus},
};

#[derive(Clone)]
pub struct CopiesRepository {
    pool: Pool<Postgres>,
}

impl CopiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all copies (no ordering guarantee)
    pub async fn list(&self) -> AppResult<Vec<Copy>> {
        let rows = sqlx::query_as::<_, Copy>("SELECT * FROM copies")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get copy by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Copy> {
        sqlx::query_as::<_, Copy>("SELECT * FROM copies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copy {} not found", id)))
    }

    /// Copies referencing the given book
    pub async fn find_by_book(&self, book_id: i32) -> AppResult<Vec<Copy>> {
        let rows = sqlx::query_as::<_, Copy>("SELECT * FROM copies WHERE book_id = $1")
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Create a new copy
    pub async fn create(
        &self,
        book_id: i32,
        imprint: &str,
        status: CopyStatus,
        due_back: Option<NaiveDate>,
    ) -> AppResult<Copy> {
        let row = sqlx::query_as::<_, Copy>(
            r#"
            INSERT INTO copies (book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(imprint)
        .bind(i16::from(status))
        .bind(due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace a copy record in full
    pub async fn update(
        &self,
        id: i32,
        book_id: i32,
        imprint: &str,
        status: CopyStatus,
        due_back: Option<NaiveDate>,
    ) -> AppResult<Copy> {
        sqlx::query_as::<_, Copy>(
            r#"
            UPDATE copies
            SET book_id = $1, imprint = $2, status = $3, due_back = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(imprint)
        .bind(i16::from(status))
        .bind(due_back)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Copy {} not found", id)))
    }

    /// Delete a copy. Deleting an absent ID is a no-op.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM copies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Count all copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM copies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count copies currently available for loan
    pub async fn count_available(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM copies WHERE status = $1")
            .bind(i16::from(CopyStatus::Available))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

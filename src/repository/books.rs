//! Books repository, including the book-genre link table

use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookListEntry},
        genre::Genre,
    },
};

#[derive(FromRow)]
struct BookListRow {
    id: i32,
    title: String,
    first_name: Option<String>,
    family_name: Option<String>,
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books with author names resolved, title ascending
    pub async fn list(&self) -> AppResult<Vec<BookListEntry>> {
        let rows = sqlx::query_as::<_, BookListRow>(
            r#"
            SELECT b.id, b.title, a.first_name, a.family_name
            FROM books b
            LEFT JOIN authors a ON a.id = b.author_id
            ORDER BY b.title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| BookListEntry {
                id: r.id,
                title: r.title,
                author_name: match (r.family_name, r.first_name) {
                    (Some(family), Some(first)) => Some(format!("{}, {}", family, first)),
                    _ => None,
                },
            })
            .collect())
    }

    /// All book records, title ascending (selection controls)
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Get book by ID, None when absent (for resolving copy references)
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Books referencing the given author
    pub async fn find_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE author_id = $1")
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Books tagged with the given genre
    pub async fn find_by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.* FROM books b
            JOIN book_genres bg ON bg.book_id = b.id
            WHERE bg.genre_id = $1
            "#,
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Genres associated with a book, name ascending
    pub async fn genres_for(&self, book_id: i32) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.* FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a new book and its genre links
    pub async fn create(
        &self,
        title: &str,
        author_id: i32,
        summary: &str,
        isbn: &str,
        genre_ids: &[i32],
    ) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author_id, summary, isbn)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(author_id)
        .bind(summary)
        .bind(isbn)
        .fetch_one(&self.pool)
        .await?;

        self.sync_genres(book.id, genre_ids).await?;
        Ok(book)
    }

    /// Replace a book record in full, genre links included
    pub async fn update(
        &self,
        id: i32,
        title: &str,
        author_id: i32,
        summary: &str,
        isbn: &str,
        genre_ids: &[i32],
    ) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, author_id = $2, summary = $3, isbn = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(author_id)
        .bind(summary)
        .bind(isbn)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        self.sync_genres(book.id, genre_ids).await?;
        Ok(book)
    }

    /// Replace the genre link set for a book
    async fn sync_genres(&self, book_id: i32, genre_ids: &[i32]) -> AppResult<()> {
        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        for genre_id in genre_ids {
            sqlx::query(
                "INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(book_id)
            .bind(genre_id)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    /// Delete a book and its genre links. Deleting an absent ID is a no-op.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

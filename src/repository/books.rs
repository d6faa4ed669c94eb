//! Books table access on Repository

use async_trait::async_trait;

use super::{BookStore, Repository};
use crate::{
    error::AppResult,
    models::{book::BOOK_COLUMNS, Availability, Book, BookDraft},
};

#[async_trait]
impl BookStore for Repository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM books ORDER BY isbn", BOOK_COLUMNS);
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, isbn: &str) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM books WHERE isbn = $1", BOOK_COLUMNS);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, draft: &BookDraft) -> AppResult<Book> {
        let query = format!(
            "INSERT INTO books (isbn, title, author, price) VALUES ($1, $2, $3, $4) RETURNING {}",
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(&draft.isbn)
            .bind(&draft.title)
            .bind(&draft.author)
            .bind(draft.price)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, draft: &BookDraft) -> AppResult<Option<Book>> {
        let query = format!(
            r#"
            UPDATE books SET title = $2, author = $3, price = $4
            WHERE isbn = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(&draft.isbn)
            .bind(&draft.title)
            .bind(&draft.author)
            .bind(draft.price)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn set_availability(
        &self,
        isbn: &str,
        state: Availability,
        require_change: bool,
    ) -> AppResult<Option<Book>> {
        let guard = if require_change {
            " AND is_available <> $2"
        } else {
            ""
        };
        let query = format!(
            "UPDATE books SET is_available = $2 WHERE isbn = $1{} RETURNING {}",
            guard, BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(isbn)
            .bind(state.is_available())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, isbn: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

//! Repository layer for database operations

pub mod books;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Availability, Book, BookDraft},
};

/// Persistence operations on the `books` table.
///
/// Every method issues at most one SQL statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, ordered by isbn
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn find(&self, isbn: &str) -> AppResult<Option<Book>>;

    /// Insert a new book; availability takes the column default.
    /// A duplicate isbn fails like any other statement.
    async fn insert(&self, draft: &BookDraft) -> AppResult<Book>;

    /// Overwrite title, author and price of the book keyed by `draft.isbn`.
    /// Returns `None` when no such book exists.
    async fn update(&self, draft: &BookDraft) -> AppResult<Option<Book>>;

    /// Set availability of a book.
    ///
    /// With `require_change` the row is only touched when its current state
    /// differs from `state`; `None` then also covers "already in that state".
    async fn set_availability(
        &self,
        isbn: &str,
        state: Availability,
        require_change: bool,
    ) -> AppResult<Option<Book>>;

    /// Delete a book, returning the number of rows removed
    async fn delete(&self, isbn: &str) -> AppResult<u64>;

    /// Round-trip to the backing store
    async fn ping(&self) -> AppResult<()>;
}

/// PostgreSQL-backed store holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

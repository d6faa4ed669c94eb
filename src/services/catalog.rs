//! Catalog management service

use std::sync::Arc;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{Book, BookForm, Transition},
    repository::BookStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
    strict_availability: bool,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>, config: &CatalogConfig) -> Self {
        Self {
            store,
            strict_availability: config.strict_availability,
        }
    }

    /// List the whole catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.store.list().await
    }

    /// Get a book by ISBN
    pub async fn get_book(&self, isbn: &str) -> AppResult<Book> {
        self.store
            .find(isbn)
            .await?
            .ok_or_else(|| not_found(isbn))
    }

    /// Validate a submitted form and insert the book
    pub async fn create_book(&self, form: BookForm) -> AppResult<Book> {
        let draft = form.into_draft()?;
        let book = self.store.insert(&draft).await?;
        tracing::info!(isbn = %book.isbn, "Book created");
        Ok(book)
    }

    /// Validate a submitted form and overwrite the book it names.
    /// The ISBN only selects the row; it is never rewritten.
    pub async fn update_book(&self, form: BookForm) -> AppResult<Book> {
        let draft = form.into_draft()?;
        let book = self
            .store
            .update(&draft)
            .await?
            .ok_or_else(|| not_found(&draft.isbn))?;
        tracing::info!(isbn = %book.isbn, "Book updated");
        Ok(book)
    }

    pub async fn borrow_book(&self, isbn: &str) -> AppResult<Book> {
        self.apply(isbn, Transition::Borrow).await
    }

    pub async fn return_book(&self, isbn: &str) -> AppResult<Book> {
        self.apply(isbn, Transition::Return).await
    }

    /// Delete a book. Missing books are not an error; returns whether a row went away.
    pub async fn delete_book(&self, isbn: &str) -> AppResult<bool> {
        let removed = self.store.delete(isbn).await? > 0;
        if removed {
            tracing::info!(isbn = %isbn, "Book deleted");
        } else {
            tracing::debug!(isbn = %isbn, "Delete matched no book");
        }
        Ok(removed)
    }

    /// Check the backing store is reachable
    pub async fn ready(&self) -> AppResult<()> {
        self.store.ping().await
    }

    async fn apply(&self, isbn: &str, transition: Transition) -> AppResult<Book> {
        let target = transition.target();
        if let Some(book) = self
            .store
            .set_availability(isbn, target, self.strict_availability)
            .await?
        {
            tracing::info!(isbn = %isbn, state = target.label(), "Availability changed");
            return Ok(book);
        }

        if !self.strict_availability {
            return Err(not_found(isbn));
        }

        // Strict mode: the guarded update matched nothing, find out why
        match self.store.find(isbn).await? {
            Some(book) if !transition.changes(book.availability()) => Err(AppError::Conflict(
                format!("Book {} is already {}", isbn, target.label()),
            )),
            Some(_) => Err(AppError::Internal(format!(
                "Availability update for {} matched no row",
                isbn
            ))),
            None => Err(not_found(isbn)),
        }
    }
}

fn not_found(isbn: &str) -> AppError {
    AppError::NotFound(format!("No book with ISBN {}", isbn))
}

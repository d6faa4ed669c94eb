//! Shared helpers for router tests: in-memory stores and request builders

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use bookshelf::{
    api,
    config::CatalogConfig,
    models::{Availability, Book, BookDraft},
    repository::BookStore,
    views::Views,
    AppError, AppResult, AppState,
};

/// Store keeping books in a map, with the same contract as the PostgreSQL one
#[derive(Default)]
pub struct MemoryStore {
    books: Mutex<BTreeMap<String, Book>>,
}

impl MemoryStore {
    pub fn snapshot(&self) -> Vec<Book> {
        self.books.lock().unwrap().values().cloned().collect()
    }

    pub fn get(&self, isbn: &str) -> Option<Book> {
        self.books.lock().unwrap().get(isbn).cloned()
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.snapshot())
    }

    async fn find(&self, isbn: &str) -> AppResult<Option<Book>> {
        Ok(self.get(isbn))
    }

    async fn insert(&self, draft: &BookDraft) -> AppResult<Book> {
        let mut books = self.books.lock().unwrap();
        if books.contains_key(&draft.isbn) {
            return Err(AppError::Database(sqlx::Error::Protocol(format!(
                "duplicate key value violates unique constraint \"books_pkey\": {}",
                draft.isbn
            ))));
        }
        let book = Book {
            isbn: draft.isbn.clone(),
            title: draft.title.clone(),
            author: draft.author.clone(),
            price: draft.price,
            is_available: true,
        };
        books.insert(book.isbn.clone(), book.clone());
        Ok(book)
    }

    async fn update(&self, draft: &BookDraft) -> AppResult<Option<Book>> {
        let mut books = self.books.lock().unwrap();
        Ok(books.get_mut(&draft.isbn).map(|book| {
            book.title = draft.title.clone();
            book.author = draft.author.clone();
            book.price = draft.price;
            book.clone()
        }))
    }

    async fn set_availability(
        &self,
        isbn: &str,
        state: Availability,
        require_change: bool,
    ) -> AppResult<Option<Book>> {
        let mut books = self.books.lock().unwrap();
        let Some(book) = books.get_mut(isbn) else {
            return Ok(None);
        };
        if require_change && book.availability() == state {
            return Ok(None);
        }
        book.is_available = state.is_available();
        Ok(Some(book.clone()))
    }

    async fn delete(&self, isbn: &str) -> AppResult<u64> {
        Ok(self.books.lock().unwrap().remove(isbn).map_or(0, |_| 1))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Store whose every call fails like a lost database
pub struct FailingStore;

fn unreachable_db() -> AppError {
    AppError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl BookStore for FailingStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        Err(unreachable_db())
    }

    async fn find(&self, _isbn: &str) -> AppResult<Option<Book>> {
        Err(unreachable_db())
    }

    async fn insert(&self, _draft: &BookDraft) -> AppResult<Book> {
        Err(unreachable_db())
    }

    async fn update(&self, _draft: &BookDraft) -> AppResult<Option<Book>> {
        Err(unreachable_db())
    }

    async fn set_availability(
        &self,
        _isbn: &str,
        _state: Availability,
        _require_change: bool,
    ) -> AppResult<Option<Book>> {
        Err(unreachable_db())
    }

    async fn delete(&self, _isbn: &str) -> AppResult<u64> {
        Err(unreachable_db())
    }

    async fn ping(&self) -> AppResult<()> {
        Err(unreachable_db())
    }
}

pub fn app_with(store: Arc<dyn BookStore>, strict_availability: bool) -> Router {
    let catalog = CatalogConfig {
        strict_availability,
    };
    let views = Views::new(None).expect("embedded templates compile");
    api::router(AppState::new(&catalog, store, views))
}

/// Router over a fresh in-memory store
pub fn app(strict_availability: bool) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (app_with(store.clone(), strict_availability), store)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

/// Create a book through the router, asserting success
pub async fn create(app: &Router, isbn: &str, price: &str) {
    let response = send(
        app,
        post_form(
            "/books/create/process",
            &format!("isbn={}&title=T&author=A&price={}", isbn, price),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
}

//! Bookshelf
//!
//! A server-rendered book inventory manager: list, create, show, update,
//! delete, borrow and return books kept in a PostgreSQL table, with HTML
//! pages rendered from handlebars templates.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
    pub views: Arc<views::Views>,
}

impl AppState {
    /// Wire services and views over a store
    pub fn new(
        catalog: &config::CatalogConfig,
        store: Arc<dyn repository::BookStore>,
        views: views::Views,
    ) -> Self {
        let services = services::Services::new(store, catalog);
        Self {
            services: Arc::new(services),
            views: Arc::new(views),
        }
    }
}

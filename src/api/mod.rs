//! HTTP handlers and routing for the Bookshelf server

pub mod books;
pub mod health;

use axum::{
    extract::{Form, Query},
    handler::Handler,
    response::Redirect,
    routing::{get, post, MethodRouter},
    Router,
};
use axum_extra::extract::WithRejection;
use tower_http::trace::TraceLayer;

use crate::{error::AppError, AppState};

/// Form body whose rejections surface as `AppError` (400)
pub type FormFields<T> = WithRejection<Form<T>, AppError>;

/// Query string whose rejections surface as `AppError` (400)
pub type QueryParams<T> = WithRejection<Query<T>, AppError>;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", only_get(|| async { Redirect::to("/books") }))
        .route("/health", only_get(health::health_check))
        .route("/ready", only_get(health::readiness_check))
        .route("/books", only_get(books::list_books))
        .route("/books/show", only_get(books::show_book))
        .route("/books/create", only_get(books::create_form))
        .route("/books/create/process", only_post(books::create_process))
        .route("/books/update", only_get(books::update_form))
        .route("/books/update/process", only_post(books::update_process))
        .route("/books/borrow", only_get(books::borrow_form))
        .route("/books/borrow-book/process", only_post(books::borrow_process))
        .route("/books/return", only_get(books::return_form))
        .route("/books/return-book/process", only_post(books::return_process))
        .route("/books/delete/process", only_get(books::delete_process))
        .fallback(|| async { AppError::NotFound("No such page".to_string()) })
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// GET route answering every other method with 405
fn only_get<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).fallback(|| async { AppError::MethodNotAllowed("GET") })
}

/// POST route answering every other method with 405
fn only_post<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    post(handler).fallback(|| async { AppError::MethodNotAllowed("POST") })
}

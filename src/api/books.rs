//! Book catalog pages

use axum::{
    extract::{Form, Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::WithRejection;

use super::{FormFields, QueryParams};
use crate::{
    error::AppResult,
    models::{BookForm, IsbnParams},
    views::View,
    AppState,
};

/// List the whole catalog
pub async fn list_books(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.catalog.list_books().await?;
    state.views.render(View::Books, &books)
}

/// Book details
pub async fn show_book(
    State(state): State<AppState>,
    WithRejection(Query(params), _): QueryParams<IsbnParams>,
) -> AppResult<Html<String>> {
    lookup(&state, params, View::Show).await
}

/// Empty creation form
pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.views.render(View::Create, &())
}

/// Create a book from the submitted form
pub async fn create_process(
    State(state): State<AppState>,
    WithRejection(Form(form), _): FormFields<BookForm>,
) -> AppResult<Html<String>> {
    let book = state.services.catalog.create_book(form).await?;
    state.views.render(View::Created, &book)
}

/// Edit form pre-filled with the current values
pub async fn update_form(
    State(state): State<AppState>,
    WithRejection(Query(params), _): QueryParams<IsbnParams>,
) -> AppResult<Html<String>> {
    lookup(&state, params, View::Update).await
}

/// Apply an edit; the ISBN selects the book and is not changed
pub async fn update_process(
    State(state): State<AppState>,
    WithRejection(Form(form), _): FormFields<BookForm>,
) -> AppResult<Html<String>> {
    let book = state.services.catalog.update_book(form).await?;
    state.views.render(View::Updated, &book)
}

pub async fn borrow_form(
    State(state): State<AppState>,
    WithRejection(Query(params), _): QueryParams<IsbnParams>,
) -> AppResult<Html<String>> {
    lookup(&state, params, View::Borrow).await
}

/// Mark a book as borrowed
pub async fn borrow_process(
    State(state): State<AppState>,
    WithRejection(Form(params), _): FormFields<IsbnParams>,
) -> AppResult<Html<String>> {
    let isbn = params.into_isbn()?;
    let book = state.services.catalog.borrow_book(&isbn).await?;
    state.views.render(View::Borrowed, &book)
}

pub async fn return_form(
    State(state): State<AppState>,
    WithRejection(Query(params), _): QueryParams<IsbnParams>,
) -> AppResult<Html<String>> {
    lookup(&state, params, View::Return).await
}

/// Mark a book as available again
pub async fn return_process(
    State(state): State<AppState>,
    WithRejection(Form(params), _): FormFields<IsbnParams>,
) -> AppResult<Html<String>> {
    let isbn = params.into_isbn()?;
    let book = state.services.catalog.return_book(&isbn).await?;
    state.views.render(View::Returned, &book)
}

/// Delete a book and go back to the list, whether or not it existed
pub async fn delete_process(
    State(state): State<AppState>,
    WithRejection(Query(params), _): QueryParams<IsbnParams>,
) -> AppResult<Redirect> {
    let isbn = params.into_isbn()?;
    state.services.catalog.delete_book(&isbn).await?;
    Ok(Redirect::to("/books"))
}

async fn lookup(state: &AppState, params: IsbnParams, view: View) -> AppResult<Html<String>> {
    let isbn = params.into_isbn()?;
    let book = state.services.catalog.get_book(&isbn).await?;
    state.views.render(view, &book)
}

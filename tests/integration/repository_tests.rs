//! Repository tests against a live PostgreSQL
//!
//! Run with: DATABASE_URL=postgres://... cargo test --test repository_tests -- --ignored

use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;

use bookshelf::{
    models::{Availability, BookDraft},
    repository::{BookStore, Repository},
};

async fn repository() -> Repository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Repository::new(pool)
}

fn draft(isbn: &str) -> BookDraft {
    BookDraft {
        isbn: isbn.to_string(),
        title: "Repository Title".to_string(),
        author: "Repository Author".to_string(),
        price: Decimal::new(999, 2),
    }
}

#[tokio::test]
#[ignore]
async fn test_guarded_availability_only_touches_changed_rows() {
    let repo = repository().await;
    let isbn = "repo-guard-0001";
    repo.delete(isbn).await.unwrap();
    repo.insert(&draft(isbn)).await.unwrap();

    // already available
    let unchanged = repo
        .set_availability(isbn, Availability::Available, true)
        .await
        .unwrap();
    assert!(unchanged.is_none());
    assert!(repo.find(isbn).await.unwrap().unwrap().is_available);

    let borrowed = repo
        .set_availability(isbn, Availability::Borrowed, true)
        .await
        .unwrap()
        .expect("available book can be borrowed");
    assert!(!borrowed.is_available);

    let again = repo
        .set_availability(isbn, Availability::Borrowed, true)
        .await
        .unwrap();
    assert!(again.is_none());
    assert!(!repo.find(isbn).await.unwrap().unwrap().is_available);

    // unguarded writes succeed regardless of current state
    let forced = repo
        .set_availability(isbn, Availability::Borrowed, false)
        .await
        .unwrap();
    assert!(forced.is_some_and(|b| !b.is_available));

    let missing = repo
        .set_availability("repo-guard-missing", Availability::Borrowed, true)
        .await
        .unwrap();
    assert!(missing.is_none());

    assert_eq!(repo.delete(isbn).await.unwrap(), 1);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_insert_fails_and_keeps_row() {
    let repo = repository().await;
    let isbn = "repo-duplicate-0001";
    repo.delete(isbn).await.unwrap();
    let original = repo.insert(&draft(isbn)).await.unwrap();

    let mut other = draft(isbn);
    other.title = "Other".to_string();
    assert!(repo.insert(&other).await.is_err());
    assert_eq!(repo.find(isbn).await.unwrap(), Some(original));

    repo.delete(isbn).await.unwrap();
}

//! Runs against a real database only when `HOTELHUB_TEST_DSN` is set, e.g.
//! `HOTELHUB_TEST_DSN=postgres://postgres@localhost/hotelhub cargo test`.

#![allow(clippy::unwrap_used)]

use hotelhub::hotelhub::storage::{PgUserStore, StoreError, UserStore};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::OnceCell;
use ulid::Ulid;

static SCHEMA: OnceCell<()> = OnceCell::const_new();

async fn store() -> Option<PgUserStore> {
    let Ok(dsn) = std::env::var("HOTELHUB_TEST_DSN") else {
        eprintln!("Skipping Postgres store tests: HOTELHUB_TEST_DSN is not set");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&dsn)
        .await
        .unwrap();
    SCHEMA
        .get_or_init(|| async {
            sqlx::raw_sql(include_str!("../sql/schema.sql"))
                .execute(&pool)
                .await
                .unwrap();
        })
        .await;

    Some(PgUserStore::new(pool))
}

fn unique_email() -> String {
    format!("{}@hotel.test", Ulid::new().to_string().to_lowercase())
}

#[tokio::test]
async fn create_and_find_user() {
    let Some(store) = store().await else { return };
    let email = unique_email();

    let created = store.create_user(&email, "guest", "$argon2id$hash").await.unwrap();
    assert_eq!(created.email, email);
    assert_eq!(created.username, "guest");

    let found = store.find_user_by_email(&email).await.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.password_hash, "$argon2id$hash");
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let Some(store) = store().await else { return };
    let email = unique_email();

    store.create_user(&email, "first", "h1").await.unwrap();
    let err = store.create_user(&email, "second", "h2").await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate));

    let found = store.find_user_by_email(&email).await.unwrap();
    assert_eq!(found.username, "first");
}

#[tokio::test]
async fn unknown_email_is_not_found() {
    let Some(store) = store().await else { return };

    let err = store.find_user_by_email(&unique_email()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
    store.ping().await.unwrap();
}

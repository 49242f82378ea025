//! End-to-end resolver tests against a real PostgreSQL database
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p bookshelf-server -- --ignored

use std::sync::atomic::{AtomicU32, Ordering};

use bookshelf_server::db::{BookChanges, BookRepo};
use bookshelf_server::models::BookId;
use bookshelf_server::{build_schema, initialize, BookSchema, DbError};
use serde_json::{json, Value};
use sqlx::PgPool;

static ISBN_COUNTER: AtomicU32 = AtomicU32::new(0);

/// ISBN that no other test run has used
fn fresh_isbn() -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let n = ISBN_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("test-{nanos}-{n}")
}

async fn setup() -> (PgPool, BookSchema) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = initialize(&url, 5).await.expect("database initialization failed");
    (pool.clone(), build_schema(pool))
}

async fn execute(schema: &BookSchema, query: &str, variables: Value) -> Value {
    let request = async_graphql::Request::new(query)
        .variables(async_graphql::Variables::from_json(variables));
    serde_json::to_value(schema.execute(request).await).unwrap()
}

fn error_code(response: &Value) -> &str {
    response["errors"][0]["extensions"]["code"].as_str().unwrap_or_default()
}

const CREATE: &str = r#"
    mutation ($input: CreateBookInput!) {
        createBook(input: $input) { id title author isbn publishedAt createdAt updatedAt }
    }
"#;

const UPDATE: &str = r#"
    mutation ($id: ID!, $input: UpdateBookInput!) {
        updateBook(id: $id, input: $input) { id title author isbn publishedAt createdAt updatedAt }
    }
"#;

const GET: &str = r#"
    query ($id: ID!) { book(id: $id) { id title author isbn publishedAt } }
"#;

const DELETE: &str = r#"mutation ($id: ID!) { deleteBook(id: $id) }"#;

const LIST: &str = r#"{ books { id isbn } }"#;

async fn create(schema: &BookSchema, title: &str, isbn: &str) -> Value {
    let response = execute(
        schema,
        CREATE,
        json!({ "input": {
            "title": title,
            "author": "Test Author",
            "isbn": isbn,
            "publishedAt": "2001-02-03",
        }}),
    )
    .await;
    assert!(response["errors"].is_null(), "create failed: {response}");
    response["data"]["createBook"].clone()
}

/// Live rows holding `isbn`; unaffected by tests running alongside.
async fn live_count_for(pool: &PgPool, isbn: &str) -> i64 {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM books WHERE isbn = $1 AND deleted_at IS NULL")
            .bind(isbn)
            .fetch_one(pool)
            .await
            .unwrap();
    count
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_returns_boundary_formats() {
    let (_pool, schema) = setup().await;
    let isbn = fresh_isbn();

    let response = execute(
        &schema,
        CREATE,
        json!({ "input": {
            "title": "Dune",
            "author": "Frank Herbert",
            "isbn": isbn,
            "publishedAt": "1965-08-01",
        }}),
    )
    .await;

    let book = &response["data"]["createBook"];
    assert_eq!(book["publishedAt"], "1965-08-01");
    assert_eq!(book["title"], "Dune");
    assert!(book["id"].as_str().unwrap().parse::<i64>().is_ok());
    assert_eq!(book["createdAt"], book["updatedAt"]);

    let created_at = book["createdAt"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
    assert!(created_at.ends_with('Z'));
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_isbn_on_create_adds_nothing() {
    let (pool, schema) = setup().await;
    let isbn = fresh_isbn();
    create(&schema, "Original", &isbn).await;

    assert_eq!(live_count_for(&pool, &isbn).await, 1);
    let response = execute(
        &schema,
        CREATE,
        json!({ "input": {
            "title": "Copy",
            "author": "Someone Else",
            "isbn": isbn,
            "publishedAt": "2020-01-01",
        }}),
    )
    .await;

    assert!(response["data"].is_null());
    assert_eq!(error_code(&response), "DUPLICATE_KEY");
    assert_eq!(
        response["errors"][0]["message"],
        "a book with this ISBN already exists"
    );
    assert_eq!(live_count_for(&pool, &isbn).await, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn partial_update_keeps_other_fields() {
    let (_pool, schema) = setup().await;
    let isbn = fresh_isbn();
    let book = create(&schema, "First Title", &isbn).await;

    let response = execute(
        &schema,
        UPDATE,
        json!({ "id": book["id"], "input": { "title": "Second Title" } }),
    )
    .await;

    let updated = &response["data"]["updateBook"];
    assert_eq!(updated["title"], "Second Title");
    assert_eq!(updated["author"], "Test Author");
    assert_eq!(updated["isbn"], isbn.as_str());
    assert_eq!(updated["publishedAt"], "2001-02-03");
    assert_eq!(updated["createdAt"], book["createdAt"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_to_taken_isbn_leaves_record_unchanged() {
    let (_pool, schema) = setup().await;
    let taken = fresh_isbn();
    create(&schema, "Holder", &taken).await;
    let own = fresh_isbn();
    let book = create(&schema, "Mover", &own).await;

    let response = execute(
        &schema,
        UPDATE,
        json!({ "id": book["id"], "input": { "isbn": taken, "title": "Renamed" } }),
    )
    .await;
    assert_eq!(error_code(&response), "DUPLICATE_KEY");

    let current = execute(&schema, GET, json!({ "id": book["id"] })).await;
    assert_eq!(current["data"]["book"]["isbn"], own.as_str());
    assert_eq!(current["data"]["book"]["title"], "Mover");
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_missing_book_is_not_found() {
    let (_pool, schema) = setup().await;

    let response = execute(
        &schema,
        UPDATE,
        json!({ "id": i64::MAX.to_string(), "input": { "title": "Ghost" } }),
    )
    .await;

    assert!(response["data"].is_null());
    assert_eq!(error_code(&response), "NOT_FOUND");
    assert_eq!(response["errors"][0]["message"], "book not found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_hides_book_and_second_delete_fails() {
    let (_pool, schema) = setup().await;
    let isbn = fresh_isbn();
    let book = create(&schema, "Short Lived", &isbn).await;
    let id = book["id"].clone();

    let first = execute(&schema, DELETE, json!({ "id": id })).await;
    assert_eq!(first["data"]["deleteBook"], true);

    let get = execute(&schema, GET, json!({ "id": id })).await;
    assert_eq!(error_code(&get), "NOT_FOUND");

    let list = execute(&schema, LIST, json!({})).await;
    let ids: Vec<&Value> = list["data"]["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| &b["id"])
        .collect();
    assert!(!ids.contains(&&id));

    let update = execute(&schema, UPDATE, json!({ "id": id, "input": { "title": "Back" } })).await;
    assert_eq!(error_code(&update), "NOT_FOUND");

    let second = execute(&schema, DELETE, json!({ "id": id })).await;
    assert!(second["data"].is_null());
    assert_eq!(error_code(&second), "NOT_FOUND");
}

#[tokio::test]
#[ignore = "requires database"]
async fn deleted_isbn_can_be_reused() {
    let (_pool, schema) = setup().await;
    let isbn = fresh_isbn();
    let book = create(&schema, "Old Edition", &isbn).await;

    execute(&schema, DELETE, json!({ "id": book["id"] })).await;
    let replacement = create(&schema, "New Edition", &isbn).await;
    assert_ne!(replacement["id"], book["id"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn books_are_listed_by_id() {
    let (_pool, schema) = setup().await;
    create(&schema, "A", &fresh_isbn()).await;
    create(&schema, "B", &fresh_isbn()).await;

    let list = execute(&schema, LIST, json!({})).await;
    let ids: Vec<i64> = list["data"]["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap().parse().unwrap())
        .collect();

    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[tokio::test]
#[ignore = "requires database"]
async fn seeded_books_exist() {
    let (pool, _schema) = setup().await;
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books WHERE isbn = '0132350882'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(count >= 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn repo_empty_update_returns_current_row() {
    let (pool, schema) = setup().await;
    let book = create(&schema, "Untouched", &fresh_isbn()).await;
    let id = BookId::parse(book["id"].as_str().unwrap()).unwrap();

    let repo = BookRepo::new(&pool);
    let before = repo.find_by_id(id).await.unwrap();
    let after = repo.update_partial(id, BookChanges::default()).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
#[ignore = "requires database"]
async fn repo_soft_delete_missing_is_not_found() {
    let (pool, _schema) = setup().await;
    let err = BookRepo::new(&pool)
        .soft_delete(BookId::from(i64::MAX))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "book", .. }));
}

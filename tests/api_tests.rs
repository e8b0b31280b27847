//! API integration tests
//!
//! Expect a running server with a reachable, migrated database:
//! `cargo test -- --ignored`

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique suffix so tests can run repeatedly against the same database
fn unique(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}{}", tag, nanos)
}

async fn create_author(client: &Client, first: &str, family: &str) -> Value {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "first_name": first,
            "family_name": family,
            "date_of_birth": "1920-01-02"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn create_book(client: &Client, author_id: i64, genre: Value) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": unique("Book"),
            "author": author_id,
            "summary": "A test summary",
            "isbn": "9780000000000",
            "genre": genre
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn create_copy(client: &Client, book_id: i64, status: Option<&str>) -> Value {
    let mut body = json!({
        "book": book_id,
        "imprint": unique("Imprint")
    });
    if let Some(status) = status {
        body["status"] = json!(status);
    }

    let response = client
        .post(format!("{}/copies", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_home_summary_has_all_counts() {
    let client = Client::new();

    let response = client
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    for field in [
        "book_count",
        "copy_count",
        "available_copy_count",
        "author_count",
        "genre_count",
    ] {
        assert!(body[field].is_number(), "missing count {}", field);
    }
}

#[tokio::test]
#[ignore]
async fn test_author_create_requires_first_name() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({"first_name": "", "family_name": "Smith"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["field"], "first_name");
    assert_eq!(body["errors"][0]["message"], "First name must be specified.");
    // Sanitized values come back for form re-presentation
    assert_eq!(body["values"]["family_name"], "Smith");
}

#[tokio::test]
#[ignore]
async fn test_author_create_rejects_digits_in_name() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({"first_name": "John1", "family_name": "Smith"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["field"], "first_name");
    assert_eq!(
        body["errors"][0]["message"],
        "First name has non alphanumeric characters."
    );
}

#[tokio::test]
#[ignore]
async fn test_author_create_rejects_malformed_dates() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "first_name": "John",
            "family_name": "Smith",
            "date_of_birth": "2020-13-40"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["field"], "date_of_birth");
    assert_eq!(body["errors"][0]["message"], "Invalid date of birth");
}

#[tokio::test]
#[ignore]
async fn test_author_detail_missing_returns_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/authors/99999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_author_update_missing_returns_404() {
    let client = Client::new();

    let response = client
        .put(format!("{}/authors/99999999", BASE_URL))
        .json(&json!({"first_name": "John", "family_name": "Smith"}))
        .send()
        .await
        .expect("Failed to send request");

    // No accidental insert-on-update
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_author_update_replaces_record() {
    let client = Client::new();
    let author = create_author(&client, "Updatable", &unique("Family")).await;
    let id = author["id"].as_i64().expect("author id");

    let response = client
        .put(format!("{}/authors/{}", BASE_URL, id))
        .json(&json!({"first_name": "Renamed", "family_name": "Person"}))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"].as_i64(), Some(id));
    assert_eq!(body["first_name"], "Renamed");
    // Full-record replace: the unsubmitted birth date is gone
    assert!(body["date_of_birth"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_delete_missing_author_is_idempotent() {
    let client = Client::new();

    let response = client
        .delete(format!("{}/authors/99999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    // Idempotent delete: absent id commits as a no-op, not a 404
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore]
async fn test_author_delete_blocked_by_book_then_committed() {
    let client = Client::new();
    let author = create_author(&client, "Blocked", &unique("Family")).await;
    let author_id = author["id"].as_i64().expect("author id");

    let book = create_book(&client, author_id, json!([])).await;
    let book_id = book["id"].as_i64().expect("book id");

    // Blocked: the dependent book comes back in the composite
    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    let blocking: Vec<i64> = body["books"]
        .as_array()
        .expect("books array")
        .iter()
        .map(|b| b["id"].as_i64().expect("book id"))
        .collect();
    assert!(blocking.contains(&book_id));

    // Clear the dependent, then retry
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone for reads
    let response = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_book_delete_blocked_by_copy() {
    let client = Client::new();
    let author = create_author(&client, "Copied", &unique("Family")).await;
    let book = create_book(&client, author["id"].as_i64().unwrap(), json!([])).await;
    let book_id = book["id"].as_i64().expect("book id");

    let copy = create_copy(&client, book_id, None).await;
    let copy_id = copy["id"].as_i64().expect("copy id");

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(!body["copies"].as_array().expect("copies array").is_empty());

    // Copy delete is unconditional
    let response = client
        .delete(format!("{}/copies/{}", BASE_URL, copy_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore]
async fn test_genre_create_reuses_existing_name() {
    let client = Client::new();
    let name = unique("Genre");

    let first: Value = client
        .post(format!("{}/genres", BASE_URL))
        .json(&json!({"name": name}))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let second_response = client
        .post(format!("{}/genres", BASE_URL))
        .json(&json!({"name": name}))
        .send()
        .await
        .expect("Failed to send request");

    // Second create succeeds and yields the same record identity
    assert_eq!(second_response.status(), StatusCode::CREATED);
    let second: Value = second_response.json().await.expect("Failed to parse response");
    assert_eq!(first["id"], second["id"]);

    // Exactly one persisted record with that name
    let genres: Value = client
        .get(format!("{}/genres", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let matching = genres
        .as_array()
        .expect("genre list")
        .iter()
        .filter(|g| g["name"] == json!(name))
        .count();
    assert_eq!(matching, 1);
}

#[tokio::test]
#[ignore]
async fn test_genre_name_required() {
    let client = Client::new();

    let response = client
        .post(format!("{}/genres", BASE_URL))
        .json(&json!({"name": "   "}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0]["field"], "name");
    assert_eq!(body["errors"][0]["message"], "Genre name required");
}

#[tokio::test]
#[ignore]
async fn test_book_single_genre_coerces_to_singleton() {
    let client = Client::new();
    let author = create_author(&client, "Single", &unique("Family")).await;

    let genre: Value = client
        .post(format!("{}/genres", BASE_URL))
        .json(&json!({"name": unique("Genre")}))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let genre_id = genre["id"].as_i64().expect("genre id");

    // Scalar genre value, not a list
    let book = create_book(&client, author["id"].as_i64().unwrap(), json!(genre_id)).await;

    let detail: Value = client
        .get(format!("{}/books/{}", BASE_URL, book["id"].as_i64().unwrap()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let genres = detail["book"]["genres"].as_array().expect("genres array");
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0]["id"].as_i64(), Some(genre_id));
}

#[tokio::test]
#[ignore]
async fn test_book_without_genre_gets_empty_set() {
    let client = Client::new();
    let author = create_author(&client, "Empty", &unique("Family")).await;
    let book = create_book(&client, author["id"].as_i64().unwrap(), json!([])).await;

    let detail: Value = client
        .get(format!("{}/books/{}", BASE_URL, book["id"].as_i64().unwrap()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert!(detail["book"]["genres"].as_array().expect("genres array").is_empty());
    // The resolved author rides along in the detail composite
    assert_eq!(detail["book"]["author"]["id"], author["id"]);
}

#[tokio::test]
#[ignore]
async fn test_book_create_reports_all_missing_fields() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({"title": "", "summary": "", "isbn": ""}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|e| e["field"].as_str().expect("field name"))
        .collect();
    assert_eq!(fields, ["title", "author", "summary", "isbn"]);
    // The rejected submission still carries the form lists
    assert!(body["form"]["authors"].is_array());
    assert!(body["form"]["genres"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_copy_status_defaults_to_maintenance() {
    let client = Client::new();
    let author = create_author(&client, "Status", &unique("Family")).await;
    let book = create_book(&client, author["id"].as_i64().unwrap(), json!([])).await;

    let copy = create_copy(&client, book["id"].as_i64().unwrap(), None).await;
    assert_eq!(copy["status"].as_i64(), Some(0));

    let available = create_copy(&client, book["id"].as_i64().unwrap(), Some("Available")).await;
    assert_eq!(available["status"].as_i64(), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_copy_update_form_includes_book_list() {
    let client = Client::new();
    let author = create_author(&client, "Form", &unique("Family")).await;
    let book = create_book(&client, author["id"].as_i64().unwrap(), json!([])).await;
    let copy = create_copy(&client, book["id"].as_i64().unwrap(), None).await;

    let response = client
        .get(format!("{}/copies/{}/edit", BASE_URL, copy["id"].as_i64().unwrap()))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["copy"]["book"]["id"], book["id"]);
    assert!(!body["book_list"].as_array().expect("book list").is_empty());
}

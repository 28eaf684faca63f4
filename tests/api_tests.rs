//! API integration tests.
//!
//! These run against a live server with its database migrated.
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Per-run marker so tests do not collide with existing rows
fn nonce() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos()
}

async fn create_book(client: &Client, title: &str, author: &str, isbn: &str) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": title, "author": author, "isbn": isbn }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(0));
    body["id"].as_i64().expect("No book ID")
}

async fn create_user(client: &Client, name: &str) -> i64 {
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(0));
    body["id"].as_i64().expect("No user ID")
}

async fn get_book(client: &Client, id: i64) -> Value {
    client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response")
}

#[tokio::test]
#[ignore]
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
async fn test_add_book_assigns_retrievable_id() {
    let client = Client::new();
    let n = nonce();

    let title = format!("My Book {}", n);
    let isbn = format!("XSD-{}", n);
    let book_id = create_book(&client, &title, "Luca", &isbn).await;

    let book = get_book(&client, book_id).await;
    assert_eq!(book["errors"].as_array().map(Vec::len), Some(0));
    assert_eq!(book["title"], title.as_str());
    assert_eq!(book["author"], "Luca");
    assert_eq!(book["isbn"], isbn.as_str());
    assert_eq!(book["status"], "Available");
}

#[tokio::test]
#[ignore]
async fn test_add_book_missing_fields_collects_all_errors() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("No errors array");
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0], "Please insert Author");
    assert_eq!(errors[1], "Please insert Title");
    assert_eq!(errors[2], "Please insert ISBN");
    assert!(body["id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_add_user_requires_name() {
    let client = Client::new();

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": "" }))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("No errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0], "Please insert Name");
}

#[tokio::test]
#[ignore]
async fn test_update_nonexistent_book_reports_not_found() {
    let client = Client::new();

    let response = client
        .put(format!("{}/books/{}", BASE_URL, i32::MAX))
        .json(&json!({ "title": "T", "author": "A", "isbn": "I" }))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("No errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0], format!("BookId {} not found", i32::MAX));

    // The failed operation still echoes the input fields back
    assert_eq!(body["title"], "T");
    assert_eq!(body["author"], "A");
    assert_eq!(body["isbn"], "I");
}

#[tokio::test]
#[ignore]
async fn test_search_returns_matches_ordered_by_title() {
    let client = Client::new();
    let n = nonce();

    let author = format!("Luca-{}", n);
    create_book(&client, &format!("My Book C {}", n), &author, &format!("X{}C", n)).await;
    create_book(&client, &format!("My Book A {}", n), &format!("{}1", author), &format!("X{}A", n)).await;
    create_book(&client, &format!("My Book B {}", n), &format!("{}2", author), &format!("X{}B", n)).await;

    let response = client
        .get(format!("{}/books", BASE_URL))
        .query(&[("q", author.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(0));

    let books = body["books"].as_array().expect("No books array");
    assert_eq!(books.len(), 3);

    let titles: Vec<&str> = books.iter().map(|b| b["title"].as_str().unwrap()).collect();
    let mut sorted = titles.clone();
    sorted.sort();
    assert_eq!(titles, sorted);
}

#[tokio::test]
#[ignore]
async fn test_search_with_empty_query_returns_validation_error() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["books"].as_array().map(Vec::len), Some(0));

    let errors = body["errors"].as_array().expect("No errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0], "Please insert a string to search");
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_lifecycle() {
    let client = Client::new();
    let n = nonce();

    let user_id = create_user(&client, &format!("Reader {}", n)).await;
    let book_id = create_book(&client, &format!("Loanable {}", n), "Luca", &format!("L{}", n)).await;

    // Borrow: the returned user lists the book as Borrowed
    let response = client
        .post(format!("{}/users/{}/borrow/{}", BASE_URL, user_id, book_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(0));

    let books = body["books"].as_array().expect("No books array");
    let borrowed = books
        .iter()
        .find(|b| b["id"].as_i64() == Some(book_id))
        .expect("Borrowed book missing from user");
    assert_eq!(borrowed["status"], "Borrowed");

    // Direct fetch agrees
    let book = get_book(&client, book_id).await;
    assert_eq!(book["status"], "Borrowed");

    // A second borrow attempt conflicts
    let other_user = create_user(&client, &format!("Second Reader {}", n)).await;
    let response = client
        .post(format!("{}/users/{}/borrow/{}", BASE_URL, other_user, book_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("No errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0], format!("BookId {} not available", book_id));

    // Return: the book leaves the user's list and becomes Available
    let response = client
        .post(format!("{}/users/{}/return/{}", BASE_URL, user_id, book_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(0));
    let books = body["books"].as_array().expect("No books array");
    assert!(books.iter().all(|b| b["id"].as_i64() != Some(book_id)));

    let book = get_book(&client, book_id).await;
    assert_eq!(book["status"], "Available");
}

#[tokio::test]
#[ignore]
async fn test_return_of_unlinked_book_is_rejected() {
    let client = Client::new();
    let n = nonce();

    let user_id = create_user(&client, &format!("Empty-handed {}", n)).await;
    let book_id = create_book(&client, &format!("Shelf {}", n), "Luca", &format!("S{}", n)).await;

    let response = client
        .post(format!("{}/users/{}/return/{}", BASE_URL, user_id, book_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("No errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0],
        format!("BookId {} not found for UserId {}", book_id, user_id)
    );

    // Status untouched
    let book = get_book(&client, book_id).await;
    assert_eq!(book["status"], "Available");
}

#[tokio::test]
#[ignore]
async fn test_borrow_accumulates_resolution_errors() {
    let client = Client::new();

    let response = client
        .post(format!("{}/users/{}/borrow/{}", BASE_URL, i32::MAX, i32::MAX - 1))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("No errors array");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], format!("UserId {} not found", i32::MAX));
    assert_eq!(errors[1], format!("BookId {} not found", i32::MAX - 1));
}

#[tokio::test]
#[ignore]
async fn test_delete_book_then_fetch_reports_not_found() {
    let client = Client::new();
    let n = nonce();

    let book_id = create_book(&client, &format!("Ephemeral {}", n), "Luca", &format!("E{}", n)).await;

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(0));

    let book = get_book(&client, book_id).await;
    let errors = book["errors"].as_array().expect("No errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0], format!("BookId {} not found", book_id));

    // Deleting again is a not-found error, not a silent success
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_delete_user_then_fetch_reports_not_found() {
    let client = Client::new();
    let n = nonce();

    let user_id = create_user(&client, &format!("Visitor {}", n)).await;

    let response = client
        .delete(format!("{}/users/{}", BASE_URL, user_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(0));

    let response = client
        .get(format!("{}/users/{}", BASE_URL, user_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("No errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0], format!("UserId {} not found", user_id));
}

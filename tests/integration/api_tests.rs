//! API integration tests against a running server
//!
//! Run with: cargo test --test api_tests -- --ignored

use chrono::Utc;
use fintrack_server::models::UserClaims;
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Sign a token for a fresh user so every run starts from an empty ledger
fn auth_token() -> String {
    let secret = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "change-this-secret-in-production".to_string());
    let now = Utc::now();
    let claims = UserClaims {
        sub: "integration".to_string(),
        user_id: (now.timestamp_micros() % 1_000_000_000) as i32,
        iat: now.timestamp(),
        exp: now.timestamp() + 600,
    };
    claims.create_token(&secret).expect("Failed to sign token")
}

async fn post(client: &Client, token: &str, path: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
}

async fn create_id(client: &Client, token: &str, path: &str, body: Value) -> i64 {
    let response = post(client, token, path, body).await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No id in response")
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
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_requires_token() {
    let client = Client::new();

    let response = client
        .get(format!("{}/entries", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_category_conflicts() {
    let client = Client::new();
    let token = auth_token();

    let category = json!({ "keyword": "food", "name": "Food", "is_income": false });
    create_id(&client, &token, "/categories", category).await;

    let response = post(
        &client,
        &token,
        "/categories",
        json!({ "keyword": "FOOD", "name": "Groceries", "is_income": false }),
    )
    .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_entry_rejects_foreign_category() {
    let client = Client::new();
    let token = auth_token();

    let response = post(
        &client,
        &token,
        "/entries",
        json!({ "category_id": -1, "date": "2022-05-12T09:00:00Z", "value": "10.00" }),
    )
    .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_statistics_by_entry_type() {
    let client = Client::new();
    let token = auth_token();

    let salary = create_id(
        &client,
        &token,
        "/categories",
        json!({ "keyword": "salary", "name": "Salary", "is_income": true }),
    )
    .await;
    let food = create_id(
        &client,
        &token,
        "/categories",
        json!({ "keyword": "food", "name": "Food", "is_income": false }),
    )
    .await;
    let family = create_id(&client, &token, "/tags", json!({ "name": "Family" })).await;

    for (category, date, value, tags) in [
        (salary, "2022-05-12T09:00:00Z", "3200.00", vec![]),
        (food, "2022-05-14T18:30:00Z", "60.45", vec![family]),
        (food, "2022-06-03T12:00:00Z", "17.65", vec![]),
    ] {
        create_id(
            &client,
            &token,
            "/entries",
            json!({ "category_id": category, "date": date, "value": value, "tag_ids": tags }),
        )
        .await;
    }

    let response = post(
        &client,
        &token,
        "/statistics",
        json!({
            "group_by": ["entry_type"],
            "select_values": ["count", "sum"]
        }),
    )
    .await;
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["entries_count"], 3);
    assert_eq!(body["rows"][0]["entry_type"], "cost");
    assert_eq!(body["rows"][0]["values"]["sum"], "78.10");
    assert_eq!(body["rows"][1]["entry_type"], "income");
    assert_eq!(body["rows"][1]["values"]["count"], "1");
}

#[tokio::test]
#[ignore]
async fn test_statistics_rejects_empty_selection() {
    let client = Client::new();
    let token = auth_token();

    let response = post(&client, &token, "/statistics", json!({ "select_values": [] })).await;
    assert_eq!(response.status(), 400);
}

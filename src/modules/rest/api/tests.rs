// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use poem::http::StatusCode;
use poem::test::{TestClient, TestResponse};
use serde_json::{json, Value};

use crate::modules::database::manager::DatabaseManager;
use crate::modules::error::code::ErrorCode;
use crate::modules::rest::create_app;

async fn body(resp: TestResponse) -> Value {
    resp.0.into_body().into_json::<Value>().await.unwrap()
}

fn new_email(n: u32, message: &str) -> Value {
    json!({
        "messageId": format!("<{n}@mail.example.com>"),
        "senderEmail": format!("sender{n}@example.com"),
        "recipientEmail": "inbox@example.com",
        "message": message,
        "size": 100 * n,
        "categoryId": 1,
        "date": format!("2024-02-{:02}T08:30:00Z", n),
    })
}

#[tokio::test]
async fn search_with_no_filters_returns_envelope() {
    let db = DatabaseManager::in_memory().await.unwrap();
    let cli = TestClient::new(create_app(db.pool().clone()));

    for n in 1..=3 {
        let resp = cli
            .post("/api/email/insert")
            .body_json(&new_email(n, "weekly report"))
            .send()
            .await;
        resp.assert_status_is_ok();
    }

    let resp = cli.get("/api/email/search").send().await;
    resp.assert_status_is_ok();
    let value = body(resp).await;
    assert_eq!(value["success"], json!(true));
    assert_eq!(value["total"], json!(3));
    assert_eq!(value["page"], json!(1));
    assert_eq!(value["totalPages"], json!(1));
    let emails = value["emails"].as_array().unwrap();
    assert_eq!(emails.len(), 3);
    assert_eq!(emails[0]["date"], json!("2024-02-03 08:30:00"));
    assert_eq!(emails[0]["categoryName"], json!("purchases"));
    assert_eq!(emails[0]["senderEmail"], json!("sender3@example.com"));
}

#[tokio::test]
async fn query_parameters_are_applied() {
    let db = DatabaseManager::in_memory().await.unwrap();
    let cli = TestClient::new(create_app(db.pool().clone()));
    for n in 1..=12 {
        cli.post("/api/email/insert")
            .body_json(&new_email(n, if n % 2 == 0 { "Invoice due" } else { "hello" }))
            .send()
            .await
            .assert_status_is_ok();
    }

    let resp = cli
        .get("/api/email/search")
        .query("q", &"INVOICE")
        .query("size", &"400")
        .query("dateTo", &"2024-02-10")
        .query("category", &"abc")
        .query("page", &"2")
        .query("limit", &"2")
        .send()
        .await;
    resp.assert_status_is_ok();
    let value = body(resp).await;
    // Even n in 4..=10: 4, 6, 8, 10.
    assert_eq!(value["total"], json!(4));
    assert_eq!(value["totalPages"], json!(2));
    assert_eq!(value["page"], json!(2));
    let ids: Vec<&str> = value["emails"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["messageId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["<6@mail.example.com>", "<4@mail.example.com>"]);
}

#[tokio::test]
async fn lenient_paging_values_fall_back_to_defaults() {
    let db = DatabaseManager::in_memory().await.unwrap();
    let cli = TestClient::new(create_app(db.pool().clone()));
    let resp = cli
        .get("/api/email/search")
        .query("page", &"first")
        .query("limit", &"0")
        .send()
        .await;
    resp.assert_status_is_ok();
    let value = body(resp).await;
    assert_eq!(value["page"], json!(1));
    assert_eq!(value["total"], json!(0));
    assert_eq!(value["totalPages"], json!(0));
    assert_eq!(value["emails"], json!([]));
}

#[tokio::test]
async fn categories_are_listed() {
    let db = DatabaseManager::in_memory().await.unwrap();
    let cli = TestClient::new(create_app(db.pool().clone()));
    let resp = cli.get("/api/email/category").send().await;
    resp.assert_status_is_ok();
    let value = body(resp).await;
    assert_eq!(value["success"], json!(true));
    let categories = value["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 9);
    assert_eq!(
        categories[0],
        json!({ "categoryId": 1, "categoryName": "purchases" })
    );
}

#[tokio::test]
async fn insert_reports_the_new_id() {
    let db = DatabaseManager::in_memory().await.unwrap();
    let cli = TestClient::new(create_app(db.pool().clone()));
    let resp = cli
        .post("/api/email/insert")
        .body_json(&new_email(1, "hi"))
        .send()
        .await;
    resp.assert_status_is_ok();
    let value = body(resp).await;
    assert_eq!(value["success"], json!(true));
    assert_eq!(value["message"], json!("Email added successfully."));
    assert!(value["emailId"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn insert_without_every_field_is_rejected() {
    let db = DatabaseManager::in_memory().await.unwrap();
    let cli = TestClient::new(create_app(db.pool().clone()));
    let mut incomplete = new_email(1, "hi");
    incomplete["recipientEmail"] = json!("");
    let resp = cli
        .post("/api/email/insert")
        .body_json(&incomplete)
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let value = body(resp).await;
    assert_eq!(value["success"], json!(false));
    assert_eq!(value["message"], json!("All fields are required."));
    assert_eq!(value["code"], json!(ErrorCode::MissingRequiredField as u32));
}

#[tokio::test]
async fn insert_into_unknown_category_is_rejected() {
    let db = DatabaseManager::in_memory().await.unwrap();
    let cli = TestClient::new(create_app(db.pool().clone()));
    let mut email = new_email(1, "hi");
    email["categoryId"] = json!(999);
    let resp = cli.post("/api/email/insert").body_json(&email).send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let value = body(resp).await;
    assert_eq!(value["success"], json!(false));
    assert_eq!(value["code"], json!(ErrorCode::ConstraintViolation as u32));
}

#[tokio::test]
async fn storage_failure_becomes_500_envelope() {
    let db = DatabaseManager::in_memory().await.unwrap();
    let cli = TestClient::new(create_app(db.pool().clone()));
    db.close().await;

    let resp = cli.get("/api/email/search").query("q", &"x").send().await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let value = body(resp).await;
    assert_eq!(value["success"], json!(false));
    assert_eq!(value["message"], json!("Failed to search emails."));
    assert!(!value["error"].as_str().unwrap().is_empty());

    let resp = cli.get("/api/email/category").send().await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let value = body(resp).await;
    assert_eq!(value["message"], json!("Failed to fetch categories."));
}

#[tokio::test]
async fn unknown_route_uses_the_error_envelope() {
    let db = DatabaseManager::in_memory().await.unwrap();
    let cli = TestClient::new(create_app(db.pool().clone()));
    let resp = cli.get("/api/email/nowhere").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
    let value = body(resp).await;
    assert_eq!(value["success"], json!(false));
    assert_eq!(value["code"], json!(ErrorCode::ResourceNotFound as u32));
}

#[tokio::test]
async fn status_and_metrics_are_served() {
    let db = DatabaseManager::in_memory().await.unwrap();
    let cli = TestClient::new(create_app(db.pool().clone()));

    let resp = cli.get("/api/status").send().await;
    resp.assert_status_is_ok();
    let value = body(resp).await;
    assert_eq!(value["version"], json!(env!("CARGO_PKG_VERSION")));

    cli.get("/api/email/category")
        .send()
        .await
        .assert_status_is_ok();
    let resp = cli.get("/metrics").send().await;
    resp.assert_status_is_ok();
    let text = resp.0.into_body().into_string().await.unwrap();
    assert!(text.contains("mailsift_request_total_by_method_and_operation"));
}

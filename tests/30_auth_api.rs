mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn login_with_a_malformed_body_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message_type"], "error");
    assert!(body["data"].is_null());

    Ok(())
}

#[tokio::test]
async fn sign_up_with_an_invalid_email_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/sign-up", server.base_url))
        .json(&json!({ "email": "not-an-email", "password": "secret" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Field validation failures carry per-field details in `data`.
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message_type"], "error");
    assert!(body["data"]["email"].is_string(), "body: {}", body);

    Ok(())
}

#[tokio::test]
async fn sign_up_with_an_empty_password_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/sign-up", server.base_url))
        .json(&json!({ "email": "new@clinic.test", "password": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

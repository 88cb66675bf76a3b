mod common;

use common::{TestApp, unique_name};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_then_login() {
    let app = TestApp::spawn().await;
    let username = unique_name("alice");

    let user = app.register_user(&username).await;
    assert!(!user.token.is_empty());

    let resp = app.login(&username, "password12345").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["user"]["username"], username);
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = TestApp::spawn().await;
    let username = unique_name("alice");
    app.register_user(&username).await;

    let resp = app
        .client
        .post(format!("{}/v1/users", app.server_url))
        .json(&json!({ "username": username, "password": "password12345" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::spawn().await;
    let username = unique_name("alice");
    app.register_user(&username).await;

    let resp = app.login(&username, "not_the_password").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn short_password_is_rejected() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(format!("{}/v1/users", app.server_url))
        .json(&json!({ "username": unique_name("alice"), "password": "short" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn conversations_require_a_token() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(format!("{}/v1/conversations", app.server_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .client
        .get(format!("{}/v1/conversations", app.server_url))
        .header("Authorization", "Bearer not.a.jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn management_probes_respond() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(format!("{}/livez", app.mgmt_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

use serde_json::json;

use crate::helpers::{COOKIE_NAME, TestApp, json_body, service_config};

#[tokio::test]
async fn sign_in_sets_cookie_and_returns_claims() {
    let app = TestApp::new().await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;
    app.verify("alice").await;

    let response = app
        .post_sign_in(&json!({ "email": "alice@x.com", "password": "pw123456" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let cookie = response
        .cookies()
        .find(|cookie| cookie.name() == COOKIE_NAME)
        .expect("session cookie should be set");
    assert!(cookie.http_only());
    assert!(!cookie.value().is_empty());

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["isVerified"], true);
    assert_eq!(body["user"]["isAcceptingMessages"], true);
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let app = TestApp::new().await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;

    let wrong_password = app
        .post_sign_in(&json!({ "email": "alice@x.com", "password": "wrong-pw" }))
        .await;
    let unknown_email = app
        .post_sign_in(&json!({ "email": "bob@x.com", "password": "pw123456" }))
        .await;

    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(unknown_email.status().as_u16(), 401);
    assert_eq!(
        json_body(wrong_password).await["message"],
        json_body(unknown_email).await["message"]
    );
}

#[tokio::test]
async fn unverified_user_may_sign_in_by_default() {
    let app = TestApp::new().await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;

    let response = app
        .post_sign_in(&json!({ "email": "alice@x.com", "password": "pw123456" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(json_body(response).await["user"]["isVerified"], false);
}

#[tokio::test]
async fn unverified_user_is_refused_when_verification_is_required() {
    let app = TestApp::with_config(service_config(true)).await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;

    let response = app
        .post_sign_in(&json!({ "email": "alice@x.com", "password": "pw123456" }))
        .await;

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn session_cookie_authenticates_requests() {
    let app = TestApp::new().await;
    let token = app
        .signed_in_user("alice", "alice@x.com", "pw123456")
        .await;

    let response = app
        .http_client
        .get(format!("{}/get-messages", &app.address))
        .header("Cookie", format!("{COOKIE_NAME}={token}"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

use serde_json::json;
use whisper_core::{UserStore, Username};

use crate::helpers::{TestApp, json_body};

async fn is_verified(app: &TestApp, username: &str) -> bool {
    app.user_store
        .find_by_username(&Username::parse(username).unwrap())
        .await
        .unwrap()
        .is_verified()
}

fn wrong_code(code: &str) -> String {
    if code == "000000" {
        "111111".to_owned()
    } else {
        "000000".to_owned()
    }
}

#[tokio::test]
async fn correct_code_verifies_the_account() {
    let app = TestApp::new().await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;
    let code = app.stored_code("alice").await;

    let response = app
        .post_verify_code(&json!({ "username": "alice", "code": code }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(json_body(response).await["success"], true);
    assert!(is_verified(&app, "alice").await);
}

#[tokio::test]
async fn verification_is_idempotent() {
    let app = TestApp::new().await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;
    let code = app.stored_code("alice").await;
    app.verify("alice").await;

    let again = app
        .post_verify_code(&json!({ "username": "alice", "code": code }))
        .await;
    let stale = app
        .post_verify_code(&json!({ "username": "alice", "code": wrong_code(&code) }))
        .await;

    assert_eq!(again.status().as_u16(), 200);
    assert_eq!(stale.status().as_u16(), 200);
    assert!(is_verified(&app, "alice").await);
}

#[tokio::test]
async fn wrong_code_is_rejected_and_leaves_the_account_unverified() {
    let app = TestApp::new().await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;
    let code = app.stored_code("alice").await;

    let response = app
        .post_verify_code(&json!({ "username": "alice", "code": wrong_code(&code) }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Verification code is invalid");
    assert!(!is_verified(&app, "alice").await);
}

#[tokio::test]
async fn expired_code_is_rejected() {
    let mut config = crate::helpers::service_config(false);
    config.verification_code_ttl = chrono::Duration::seconds(-1);
    let app = TestApp::with_config(config).await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;
    let code = app.stored_code("alice").await;

    let response = app
        .post_verify_code(&json!({ "username": "alice", "code": code }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("expired"));
    assert!(!is_verified(&app, "alice").await);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .post_verify_code(&json!({ "username": "nobody", "code": "123456" }))
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn percent_encoded_username_is_decoded() {
    let app = TestApp::new().await;
    app.sign_up("alice_1", "alice@x.com", "pw123456").await;
    let code = app.stored_code("alice_1").await;

    let response = app
        .post_verify_code(&json!({ "username": "alice%5F1", "code": code }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(is_verified(&app, "alice_1").await);
}

#[tokio::test]
async fn malformed_code_is_an_invalid_code_for_an_unverified_user() {
    let app = TestApp::new().await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;

    let response = app
        .post_verify_code(&json!({ "username": "alice", "code": "12345" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Verification code is invalid");
    assert!(body.get("field").is_none());
    assert!(!is_verified(&app, "alice").await);
}

#[tokio::test]
async fn malformed_code_is_a_no_op_for_a_verified_user() {
    let app = TestApp::new().await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;
    app.verify("alice").await;

    let response = app
        .post_verify_code(&json!({ "username": "alice", "code": "abc" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(json_body(response).await["success"], true);
}

#[tokio::test]
async fn malformed_code_for_an_unknown_user_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .post_verify_code(&json!({ "username": "nobody", "code": "abc" }))
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

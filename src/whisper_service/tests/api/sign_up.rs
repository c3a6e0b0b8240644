use serde_json::json;
use whisper_core::UserStore;

use crate::helpers::{TestApp, json_body};

#[tokio::test]
async fn sign_up_returns_201_and_mails_the_code() {
    let app = TestApp::new().await;

    let response = app
        .post_sign_up(&json!({
            "username": "alice",
            "email": "alice@x.com",
            "password": "pw123456",
        }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);

    let code = app.stored_code("alice").await;
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    let sent = app.email_client.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "alice@x.com");
    assert!(sent[0].content.contains(&code));
}

#[tokio::test]
async fn sign_up_rejects_malformed_fields_with_their_name() {
    let app = TestApp::new().await;

    let cases = [
        (json!({ "username": "a", "email": "a@x.com", "password": "pw123456" }), "username"),
        (json!({ "username": "al ice", "email": "a@x.com", "password": "pw123456" }), "username"),
        (json!({ "username": "alice", "email": "not-an-email", "password": "pw123456" }), "email"),
        (json!({ "username": "alice", "email": "a@x.com", "password": "short" }), "password"),
    ];

    for (body, field) in cases {
        let response = app.post_sign_up(&body).await;
        assert_eq!(response.status().as_u16(), 400, "input: {body}");
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["field"], field);
    }
}

#[tokio::test]
async fn sign_up_rejects_a_missing_field() {
    let app = TestApp::new().await;

    let response = app
        .post_sign_up(&json!({ "username": "alice", "password": "pw123456" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test]
async fn verified_username_cannot_be_registered_again() {
    let app = TestApp::new().await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;
    app.verify("alice").await;

    let response = app
        .post_sign_up(&json!({
            "username": "alice",
            "email": "other@x.com",
            "password": "pw123456",
        }))
        .await;

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn repeated_unverified_sign_up_replaces_the_code() {
    let app = TestApp::new().await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;
    let first_id = *app
        .user_store
        .find_by_username(&whisper_core::Username::parse("alice").unwrap())
        .await
        .unwrap()
        .id();

    app.sign_up("alice", "alice@x.com", "pw654321").await;

    let user = app
        .user_store
        .find_by_username(&whisper_core::Username::parse("alice").unwrap())
        .await
        .unwrap();
    assert_eq!(user.id(), &first_id);
    assert!(!user.is_verified());
    assert_eq!(app.email_client.sent.lock().await.len(), 2);

    // The latest password is the one that works.
    let response = app
        .post_sign_in(&json!({ "email": "alice@x.com", "password": "pw654321" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

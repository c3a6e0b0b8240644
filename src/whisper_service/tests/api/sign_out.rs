use whisper_core::BannedTokenStore;

use crate::helpers::{TestApp, json_body};

#[tokio::test]
async fn sign_out_revokes_the_token() {
    let app = TestApp::new().await;
    let token = app
        .signed_in_user("alice", "alice@x.com", "pw123456")
        .await;

    let response = app.post_sign_out(&token).await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(app.banned_token_store.contains_token(&token).await.unwrap());

    let after = app.get_messages(&token).await;
    assert_eq!(after.status().as_u16(), 401);
    assert_eq!(json_body(after).await["success"], false);
}

#[tokio::test]
async fn sign_out_without_a_session_is_401() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(format!("{}/sign-out", &app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

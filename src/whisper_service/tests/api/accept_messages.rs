use crate::helpers::{TestApp, json_body};

#[tokio::test]
async fn new_accounts_accept_messages() {
    let app = TestApp::new().await;
    let token = app
        .signed_in_user("alice", "alice@x.com", "pw123456")
        .await;

    let response = app.get_accept_messages(&token).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(json_body(response).await["isAcceptingMessages"], true);
}

#[tokio::test]
async fn flag_can_be_toggled_either_way() {
    let app = TestApp::new().await;
    let token = app
        .signed_in_user("alice", "alice@x.com", "pw123456")
        .await;

    for value in [false, false, true, false] {
        let response = app.post_accept_messages(&token, value).await;
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(json_body(response).await["isAcceptingMessages"], value);

        let current = json_body(app.get_accept_messages(&token).await).await;
        assert_eq!(current["isAcceptingMessages"], value);
    }
}

#[tokio::test]
async fn flag_is_read_from_the_store_not_the_token() {
    let app = TestApp::new().await;
    let token = app
        .signed_in_user("alice", "alice@x.com", "pw123456")
        .await;

    app.post_accept_messages(&token, false).await;

    // The token still carries the snapshot taken at sign-in.
    let current = json_body(app.get_accept_messages(&token).await).await;
    assert_eq!(current["isAcceptingMessages"], false);
}

#[tokio::test]
async fn malformed_body_is_400() {
    let app = TestApp::new().await;
    let token = app
        .signed_in_user("alice", "alice@x.com", "pw123456")
        .await;

    let response = app
        .http_client
        .post(format!("{}/accept-messages", &app.address))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "acceptMessages": "sometimes" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn flag_requires_a_session() {
    let app = TestApp::new().await;

    let response = app.get_accept_messages("not-a-token").await;

    assert_eq!(response.status().as_u16(), 401);
}

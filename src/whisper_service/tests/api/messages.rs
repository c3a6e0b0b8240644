use serde_json::{Value, json};

use crate::helpers::{TestApp, json_body};

async fn inbox(app: &TestApp, token: &str) -> Vec<Value> {
    let response = app.get_messages(token).await;
    assert_eq!(response.status().as_u16(), 200);
    json_body(response).await["messages"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

#[tokio::test]
async fn alice_receives_and_deletes_a_message() {
    let app = TestApp::new().await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;
    app.verify("alice").await;

    let response = app.post_send_message("alice", "hi there").await;
    assert_eq!(response.status().as_u16(), 201);

    let token = app.sign_in("alice@x.com", "pw123456").await;
    let messages = inbox(&app, &token).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["content"], "hi there");
    assert!(messages[0]["createdAt"].is_string());

    let message_id = messages[0]["id"].as_str().unwrap().to_owned();
    let response = app.delete_message(&token, &message_id).await;
    assert_eq!(response.status().as_u16(), 200);

    assert!(inbox(&app, &token).await.is_empty());
}

#[tokio::test]
async fn inbox_is_newest_first() {
    let app = TestApp::new().await;
    let token = app
        .signed_in_user("alice", "alice@x.com", "pw123456")
        .await;

    for content in ["first", "second", "third"] {
        app.post_send_message("alice", content).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let contents: Vec<_> = inbox(&app, &token)
        .await
        .iter()
        .map(|m| m["content"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(contents, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn sending_to_an_unknown_user_is_404() {
    let app = TestApp::new().await;

    let response = app.post_send_message("nobody", "hello").await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test]
async fn sending_to_an_impossible_username_is_404() {
    let app = TestApp::new().await;

    for name in ["a", "has space", "this_name_is_far_too_long"] {
        let response = app.post_send_message(name, "hello").await;
        assert_eq!(response.status().as_u16(), 404, "{name}");
    }
}

#[tokio::test]
async fn blank_or_oversized_content_is_rejected() {
    let app = TestApp::new().await;
    app.sign_up("alice", "alice@x.com", "pw123456").await;

    let blank = app.post_send_message("alice", "   ").await;
    let oversized = app.post_send_message("alice", &"x".repeat(301)).await;

    assert_eq!(blank.status().as_u16(), 400);
    assert_eq!(json_body(blank).await["field"], "content");
    assert_eq!(oversized.status().as_u16(), 400);
}

#[tokio::test]
async fn messages_are_refused_while_disabled() {
    let app = TestApp::new().await;
    let token = app
        .signed_in_user("alice", "alice@x.com", "pw123456")
        .await;
    app.post_accept_messages(&token, false).await;

    let response = app.post_send_message("alice", "hello").await;

    assert_eq!(response.status().as_u16(), 403);
    assert!(inbox(&app, &token).await.is_empty());
}

#[tokio::test]
async fn owners_cannot_see_or_delete_each_others_messages() {
    let app = TestApp::new().await;
    let alice = app
        .signed_in_user("alice", "alice@x.com", "pw123456")
        .await;
    let bob = app.signed_in_user("bob", "bob@x.com", "pw123456").await;
    app.post_send_message("alice", "for alice").await;

    assert!(inbox(&app, &bob).await.is_empty());

    let alice_messages = inbox(&app, &alice).await;
    let message_id = alice_messages[0]["id"].as_str().unwrap();

    let response = app.delete_message(&bob, message_id).await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(inbox(&app, &alice).await.len(), 1);
}

#[tokio::test]
async fn deleting_with_a_malformed_id_is_400() {
    let app = TestApp::new().await;
    let token = app
        .signed_in_user("alice", "alice@x.com", "pw123456")
        .await;

    let response = app.delete_message(&token, "not-a-uuid").await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(json_body(response).await["field"], "messageId");
}

#[tokio::test]
async fn inbox_routes_require_a_session() {
    let app = TestApp::new().await;

    let list = app
        .http_client
        .get(format!("{}/get-messages", &app.address))
        .send()
        .await
        .unwrap();
    let delete = app
        .delete_message("garbage-token", "00000000-0000-0000-0000-000000000000")
        .await;

    assert_eq!(list.status().as_u16(), 401);
    assert_eq!(delete.status().as_u16(), 401);
}

#[tokio::test]
async fn concurrent_sends_are_all_delivered() {
    let app = TestApp::new().await;
    let token = app
        .signed_in_user("alice", "alice@x.com", "pw123456")
        .await;

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let client = app.http_client.clone();
            let url = format!("{}/send-message", &app.address);
            tokio::spawn(async move {
                client
                    .post(url)
                    .json(&json!({ "username": "alice", "content": format!("message {i}") }))
                    .send()
                    .await
                    .expect("Failed to execute request.")
                    .status()
                    .as_u16()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), 201);
    }

    assert_eq!(inbox(&app, &token).await.len(), 20);
}

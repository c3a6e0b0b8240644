use crate::helpers::{TestApp, json_body};

#[tokio::test]
async fn suggestions_are_public() {
    let app = TestApp::new().await;

    let response = app.get_suggest_messages().await;

    assert_eq!(response.status().as_u16(), 200);
    let body = json_body(response).await;
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 3);
    assert!(suggestions.iter().all(|s| !s.as_str().unwrap().is_empty()));
}

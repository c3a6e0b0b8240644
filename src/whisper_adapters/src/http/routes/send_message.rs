use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use whisper_application::{SendMessageError, SendMessageUseCase};
use whisper_core::{MessageContent, UserStore, Username};

use super::{MessageResponse, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub username: String,
    pub content: String,
}

/// Anonymous intake. Nothing about the sender is read or stored.
#[tracing::instrument(name = "Send message", skip_all)]
pub async fn send_message<U>(
    State(user_store): State<U>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let Json(request) = payload?;

    let content = MessageContent::parse(request.content)?;
    // No account can hold a name that fails to parse.
    let username =
        Username::parse(request.username).map_err(|_| SendMessageError::RecipientNotFound)?;

    SendMessageUseCase::new(&user_store)
        .execute(username, content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("Message sent successfully")),
    ))
}

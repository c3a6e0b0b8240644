use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use whisper_application::AcceptMessagesUseCase;
use whisper_core::{SessionClaims, UserStore};

use super::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptMessagesRequest {
    pub accept_messages: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptMessagesResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub is_accepting_messages: bool,
}

/// Reads the stored flag, not the snapshot in the session claims.
#[tracing::instrument(name = "Get accept messages", skip_all, fields(user_id = %claims.sub))]
pub async fn get_accept_messages<U>(
    State(user_store): State<U>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let accepting = AcceptMessagesUseCase::new(&user_store)
        .get(claims.user_id())
        .await?;

    Ok(Json(AcceptMessagesResponse {
        success: true,
        message: None,
        is_accepting_messages: accepting,
    }))
}

#[tracing::instrument(name = "Set accept messages", skip_all, fields(user_id = %claims.sub))]
pub async fn set_accept_messages<U>(
    State(user_store): State<U>,
    Extension(claims): Extension<SessionClaims>,
    payload: Result<Json<AcceptMessagesRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let Json(request) = payload?;

    let accepting = AcceptMessagesUseCase::new(&user_store)
        .set(claims.user_id(), request.accept_messages)
        .await?;

    Ok(Json(AcceptMessagesResponse {
        success: true,
        message: Some("Message acceptance status updated successfully".to_owned()),
        is_accepting_messages: accepting,
    }))
}

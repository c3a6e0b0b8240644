use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use whisper_application::ListMessagesUseCase;
use whisper_core::{Message, SessionClaims, UserStore};

use super::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub success: bool,
    pub messages: Vec<Message>,
}

#[tracing::instrument(name = "Get messages", skip_all, fields(user_id = %claims.sub))]
pub async fn get_messages<U>(
    State(user_store): State<U>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let messages = ListMessagesUseCase::new(&user_store)
        .execute(claims.user_id())
        .await?;

    Ok(Json(MessagesResponse {
        success: true,
        messages,
    }))
}

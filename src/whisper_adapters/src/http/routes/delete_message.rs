use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use whisper_application::DeleteMessageUseCase;
use whisper_core::{MessageId, SessionClaims, UserStore};

use super::{MessageResponse, error::ApiError};

#[tracing::instrument(name = "Delete message", skip_all, fields(user_id = %claims.sub))]
pub async fn delete_message<U>(
    State(user_store): State<U>,
    Extension(claims): Extension<SessionClaims>,
    Path(message_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let message_id = MessageId::parse(&message_id)?;

    DeleteMessageUseCase::new(&user_store)
        .execute(claims.user_id(), &message_id)
        .await?;

    Ok(Json(MessageResponse::ok("Message deleted")))
}

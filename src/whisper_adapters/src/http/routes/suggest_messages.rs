use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use whisper_application::SuggestMessagesUseCase;
use whisper_core::SuggestionClient;

use super::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub success: bool,
    pub suggestions: Vec<String>,
}

#[tracing::instrument(name = "Suggest messages", skip_all)]
pub async fn suggest_messages<S>(
    State(suggestion_client): State<S>,
) -> Result<impl IntoResponse, ApiError>
where
    S: SuggestionClient + Clone + 'static,
{
    let suggestions = SuggestMessagesUseCase::new(&suggestion_client)
        .execute()
        .await?;

    Ok(Json(SuggestionsResponse {
        success: true,
        suggestions,
    }))
}

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use serde::Deserialize;
use whisper_application::CheckUsernameUseCase;
use whisper_core::{UserStore, Username};

use super::{MessageResponse, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct CheckUsernameQuery {
    pub username: String,
}

#[tracing::instrument(name = "Check username", skip_all)]
pub async fn check_username_unique<U>(
    State(user_store): State<U>,
    query: Result<Query<CheckUsernameQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let Query(query) = query?;
    let username = Username::parse(query.username)?;

    CheckUsernameUseCase::new(&user_store)
        .execute(&username)
        .await?;

    Ok(Json(MessageResponse::ok("Username is unique")))
}

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use whisper_application::VerifyAccountUseCase;
use whisper_core::{UserError, UserStore, Username, VerificationDecision};

use super::{MessageResponse, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct VerifyCodeRequest {
    pub username: String,
    pub code: String,
}

/// Usernames arrive straight from the verification link, so they may still
/// be percent-encoded.
fn decode_username(raw: &str) -> Result<Username, ApiError> {
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| ApiError::InvalidInput(UserError::UsernameCharacters))?;
    Ok(Username::parse(decoded.into_owned())?)
}

#[tracing::instrument(name = "Verify code", skip_all)]
pub async fn verify_code<U>(
    State(user_store): State<U>,
    payload: Result<Json<VerifyCodeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let Json(request) = payload?;

    let username = decode_username(&request.username)?;

    let use_case = VerifyAccountUseCase::new(&user_store);

    let message = match use_case.execute(username, &request.code).await? {
        VerificationDecision::Verify => "Account verified successfully",
        VerificationDecision::AlreadyVerified => "Account is already verified",
    };

    Ok(Json(MessageResponse::ok(message)))
}

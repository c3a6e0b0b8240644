use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Duration;
use secrecy::Secret;
use serde::Deserialize;
use whisper_application::{RegisterOutcome, RegisterUseCase};
use whisper_core::{CredentialVerifier, Email, EmailClient, Password, UserStore, Username};

use super::{MessageResponse, error::ApiError};

#[derive(Debug, Clone)]
pub struct SignUpConfig {
    pub verification_code_ttl: Duration,
}

#[derive(Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Sign up", skip_all)]
pub async fn sign_up<U, H, E>(
    State((user_store, credential_verifier, email_client, config)): State<(U, H, E, SignUpConfig)>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    H: CredentialVerifier + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let Json(request) = payload?;

    let username = Username::parse(request.username)?;
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = RegisterUseCase::new(
        &user_store,
        &credential_verifier,
        &email_client,
        config.verification_code_ttl,
    );

    let message = match use_case.execute(username, email, password).await? {
        RegisterOutcome::Created => "User registered successfully. Please verify your account",
        RegisterOutcome::Refreshed => {
            "Registration refreshed. A new verification code has been sent"
        }
    };

    Ok((StatusCode::CREATED, Json(MessageResponse::ok(message))))
}

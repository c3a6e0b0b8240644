use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use whisper_application::LoginUseCase;
use whisper_core::{CredentialVerifier, Email, Password, SessionClaims, UserId, UserStore};

use super::error::ApiError;
use crate::auth_validation::{JwtAuthConfig, create_auth_cookie, generate_session_token};

#[derive(Clone)]
pub struct SignInConfig {
    pub jwt: JwtAuthConfig,
    pub require_verified: bool,
}

#[derive(Deserialize)]
pub struct SignInRequest {
    #[serde(alias = "identifier")]
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub username: String,
    pub is_verified: bool,
    pub is_accepting_messages: bool,
}

impl From<&SessionClaims> for SessionUser {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username.clone(),
            is_verified: claims.is_verified,
            is_accepting_messages: claims.is_accepting_messages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignInResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: SessionUser,
}

#[tracing::instrument(name = "Sign in", skip_all)]
pub async fn sign_in<U, H>(
    State((user_store, credential_verifier, config)): State<(U, H, SignInConfig)>,
    jar: CookieJar,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    H: CredentialVerifier + Clone + 'static,
{
    let Json(request) = payload?;

    // Malformed credentials get the same answer as wrong ones.
    let email = Email::try_from(request.email).map_err(|_| ApiError::AuthenticationFailed)?;
    let password =
        Password::try_from(request.password).map_err(|_| ApiError::AuthenticationFailed)?;

    let use_case = LoginUseCase::new(&user_store, &credential_verifier, config.jwt.token_ttl())
        .require_verified(config.require_verified);

    let claims = use_case.execute(email, password).await?;

    let token = generate_session_token(&claims, config.jwt.as_bytes())
        .map_err(|e| ApiError::UnexpectedError(e.to_string()))?;
    let jar = jar.add(create_auth_cookie(token.clone(), &config.jwt.jwt_cookie_name));

    Ok((
        jar,
        Json(SignInResponse {
            success: true,
            message: "Signed in successfully".to_owned(),
            token,
            user: SessionUser::from(&claims),
        }),
    ))
}

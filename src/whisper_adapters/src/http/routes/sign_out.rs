use axum::{Extension, Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use whisper_application::LogoutUseCase;
use whisper_core::BannedTokenStore;

use super::{MessageResponse, error::ApiError};
use crate::auth_validation::{JwtAuthConfig, create_removal_cookie};
use crate::http::middleware::SessionToken;

#[tracing::instrument(name = "Sign out", skip_all)]
pub async fn sign_out<B>(
    State((banned_token_store, config)): State<(B, JwtAuthConfig)>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    B: BannedTokenStore + Clone + 'static,
{
    LogoutUseCase::new(&banned_token_store).execute(token).await?;

    let jar = jar.remove(create_removal_cookie(&config.jwt_cookie_name));

    Ok((jar, Json(MessageResponse::ok("Signed out successfully"))))
}

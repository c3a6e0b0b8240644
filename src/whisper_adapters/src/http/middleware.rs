use axum::{
    extract::{Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use whisper_core::AuthValidator;

use super::routes::error::ApiError;
use crate::auth_validation::AuthenticatedSession;

/// The raw session token of the current request.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Rejects requests without a valid session with `401`.
///
/// On success the `SessionClaims` and the `SessionToken` are placed in the
/// request extensions for handlers to extract.
pub async fn require_session<V>(
    State(validator): State<V>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    V: AuthValidator<Claims = AuthenticatedSession, RequestParts = Parts>,
    ApiError: From<V::Error>,
{
    let (parts, body) = request.into_parts();

    let session = validator.validate(&parts).await?;

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(session.claims);
    request.extensions_mut().insert(SessionToken(session.token));

    Ok(next.run(request).await)
}

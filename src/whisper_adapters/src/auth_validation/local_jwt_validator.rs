use async_trait::async_trait;
use axum::http::{HeaderMap, header::AUTHORIZATION, request::Parts};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;
use whisper_core::{AuthValidator, BannedTokenStore, SessionClaims};

#[derive(Clone)]
pub struct JwtAuthConfig {
    pub jwt_cookie_name: String,
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtAuthConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.token_ttl_in_seconds)
    }
}

/// A validated session together with the raw token it came from, so that
/// sign-out can revoke exactly that token.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub claims: SessionClaims,
    pub token: String,
}

#[derive(Clone)]
pub struct LocalJwtValidator<B> {
    banned_token_store: B,
    config: JwtAuthConfig,
}

impl<B> LocalJwtValidator<B> {
    pub fn new(banned_token_store: B, config: JwtAuthConfig) -> Self {
        Self {
            banned_token_store,
            config,
        }
    }

    pub fn config(&self) -> &JwtAuthConfig {
        &self.config
    }
}

#[async_trait]
impl<B: BannedTokenStore + Clone + 'static> AuthValidator for LocalJwtValidator<B> {
    type Claims = AuthenticatedSession;
    type RequestParts = Parts;
    type Error = TokenAuthError;

    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let token = extract_token(&parts.headers, &self.config.jwt_cookie_name)?;

        let claims =
            validate_session_token(&token, &self.banned_token_store, &self.config).await?;

        Ok(AuthenticatedSession { claims, token })
    }
}

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Token is banned")]
    TokenIsBanned,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Session token from the cookie, falling back to `Authorization: Bearer`.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Result<String, TokenAuthError> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        if !cookie.value().is_empty() {
            return Ok(cookie.value().to_owned());
        }
    }

    let Some(header) = headers.get(AUTHORIZATION) else {
        return Err(TokenAuthError::MissingToken);
    };
    let header = header.to_str().map_err(|_| TokenAuthError::InvalidToken)?;
    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_owned()),
        _ => Err(TokenAuthError::InvalidToken),
    }
}

pub fn create_removal_cookie(cookie_name: &str) -> Cookie<'static> {
    let mut cookie = create_auth_cookie(String::new(), cookie_name);
    cookie.make_removal();
    cookie
}

pub fn create_auth_cookie(token: String, cookie_name: &str) -> Cookie<'static> {
    Cookie::build((cookie_name.to_owned(), token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Sign `claims` with HS256.
pub fn generate_session_token(
    claims: &SessionClaims,
    secret: &[u8],
) -> Result<String, TokenAuthError> {
    encode(
        &jsonwebtoken::Header::default(),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(TokenAuthError::TokenError)
}

/// Check signature and expiry, then reject tokens on the revocation list.
pub async fn validate_session_token(
    token: &str,
    banned_token_store: &dyn BannedTokenStore,
    config: &JwtAuthConfig,
) -> Result<SessionClaims, TokenAuthError> {
    let claims = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(TokenAuthError::TokenError)?;

    let is_banned = banned_token_store
        .contains_token(token)
        .await
        .map_err(|e| TokenAuthError::UnexpectedError(e.to_string()))?;

    if is_banned {
        return Err(TokenAuthError::TokenIsBanned);
    }

    Ok(claims)
}

use async_trait::async_trait;

/// Trait for validating session tokens in middleware.
///
/// Validators extract the token from the request parts, verify it and
/// produce the claims that protected handlers receive.
///
/// # Implementation Note
///
/// The validator receives `RequestParts` (headers, method, URI, extensions) rather
/// than the full `Request` to avoid issues with non-`Sync` request bodies.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    /// The claims extracted from a valid token.
    type Claims: Clone + Send + Sync + 'static;

    /// Typically `http::request::Parts`.
    type RequestParts;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Validate authentication from the request parts.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No token is present
    /// - The token is invalid or expired
    /// - The token has been revoked
    /// - The revocation list cannot be consulted
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error>;
}

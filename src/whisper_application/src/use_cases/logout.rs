use whisper_core::{BannedTokenStore, BannedTokenStoreError};

/// Error types for logout use case
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Banned token store error: {0}")]
    BannedTokenStoreError(#[from] BannedTokenStoreError),
}

/// Logout use case - revokes a session token until it would have expired.
pub struct LogoutUseCase<'a, B>
where
    B: BannedTokenStore,
{
    banned_token_store: &'a B,
}

impl<'a, B> LogoutUseCase<'a, B>
where
    B: BannedTokenStore,
{
    pub fn new(banned_token_store: &'a B) -> Self {
        Self { banned_token_store }
    }

    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute(&self, token: String) -> Result<(), LogoutError> {
        self.banned_token_store.ban_token(token).await?;
        Ok(())
    }
}

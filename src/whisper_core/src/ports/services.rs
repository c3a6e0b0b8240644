use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::{HashedPassword, Password},
};

#[derive(Debug, Error)]
pub enum EmailClientError {
    #[error("Failed to send email: {0}")]
    SendFailed(String),
    /// The provider refused the message itself, e.g. an inactive recipient.
    #[error("Email rejected by provider ({code}): {message}")]
    Rejected { code: i64, message: String },
    #[error("Email client misconfigured: {0}")]
    InvalidConfiguration(String),
}

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), EmailClientError>;
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Hashes passwords and checks candidates against stored hashes.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn hash(&self, password: Password) -> Result<HashedPassword, CredentialError>;

    /// `Ok(false)` for a wrong password; `Err` only for a broken hash or
    /// hasher failure.
    async fn verify(
        &self,
        candidate: Password,
        expected: HashedPassword,
    ) -> Result<bool, CredentialError>;
}

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("Suggestion service unavailable: {0}")]
    Unavailable(String),
}

/// Source of conversation-starter suggestions shown to anonymous senders.
#[async_trait]
pub trait SuggestionClient: Send + Sync {
    async fn suggest(&self) -> Result<Vec<String>, SuggestionError>;
}

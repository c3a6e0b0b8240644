use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    email::Email,
    ids::{MessageId, UserId},
    message::Message,
    user::{Registration, User},
    username::Username,
    verify_code::VerifyCode,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("User is already verified")]
    AlreadyVerified,
    #[error("User is not accepting messages")]
    NotAcceptingMessages,
    #[error("Message not found")]
    MessageNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::AlreadyVerified, Self::AlreadyVerified)
                | (Self::NotAcceptingMessages, Self::NotAcceptingMessages)
                | (Self::MessageNotFound, Self::MessageNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistence port for user documents.
///
/// Every mutating method is a single atomic operation on the store. None of
/// them may be implemented as read, modify in memory, write back.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Fails with `UserAlreadyExists` if the username or
    /// email is already held.
    async fn insert_user(&self, user: User) -> Result<(), UserStoreError>;

    /// Overwrite the sign-up fields of `id`, only while it is unverified.
    /// Fails with `AlreadyVerified` otherwise.
    async fn replace_unverified(
        &self,
        id: &UserId,
        registration: Registration,
    ) -> Result<(), UserStoreError>;

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError>;
    async fn find_by_username(&self, username: &Username) -> Result<User, UserStoreError>;
    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError>;

    /// Flip `id` to verified, only while it is unverified, still holds `code`
    /// and that code expires after `now`. Returns `false` when the condition
    /// no longer holds, e.g. a re-registration replaced the code.
    async fn mark_verified(
        &self,
        id: &UserId,
        code: &VerifyCode,
        now: DateTime<Utc>,
    ) -> Result<bool, UserStoreError>;

    async fn set_accepting_messages(
        &self,
        id: &UserId,
        accepting: bool,
    ) -> Result<(), UserStoreError>;

    /// Append a message to the recipient's inbox, only while the recipient
    /// accepts messages.
    async fn push_message(
        &self,
        recipient: &Username,
        message: Message,
    ) -> Result<(), UserStoreError>;

    /// All messages owned by `owner`, newest first.
    async fn list_messages(&self, owner: &UserId) -> Result<Vec<Message>, UserStoreError>;

    /// Remove one message from `owner`'s inbox. Fails with `MessageNotFound`
    /// if `owner` holds no message with that id.
    async fn pull_message(
        &self,
        owner: &UserId,
        message_id: &MessageId,
    ) -> Result<(), UserStoreError>;
}

// BannedTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum BannedTokenStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait BannedTokenStore: Send + Sync {
    async fn ban_token(&self, token: String) -> Result<(), BannedTokenStoreError>;
    async fn contains_token(&self, token: &str) -> Result<bool, BannedTokenStoreError>;
}

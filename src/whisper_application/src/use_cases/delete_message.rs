use whisper_core::{MessageId, UserId, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum DeleteMessageError {
    #[error("Message not found")]
    MessageNotFound,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

impl From<UserStoreError> for DeleteMessageError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::MessageNotFound | UserStoreError::UserNotFound => {
                DeleteMessageError::MessageNotFound
            }
            other => DeleteMessageError::UserStoreError(other),
        }
    }
}

/// Delete message use case - always scoped by the owner, never by message id
/// alone.
pub struct DeleteMessageUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> DeleteMessageUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "DeleteMessageUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        owner: &UserId,
        message_id: &MessageId,
    ) -> Result<(), DeleteMessageError> {
        self.user_store.pull_message(owner, message_id).await?;
        Ok(())
    }
}

use whisper_core::{Message, MessageContent, UserStore, UserStoreError, Username};

#[derive(Debug, thiserror::Error)]
pub enum SendMessageError {
    #[error("User not found")]
    RecipientNotFound,
    #[error("User is not accepting messages")]
    MessagesDisabled,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

impl From<UserStoreError> for SendMessageError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => SendMessageError::RecipientNotFound,
            UserStoreError::NotAcceptingMessages => SendMessageError::MessagesDisabled,
            other => SendMessageError::UserStoreError(other),
        }
    }
}

/// Send message use case - anonymous intake into a named user's inbox.
///
/// No sender identity is recorded.
pub struct SendMessageUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> SendMessageUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "SendMessageUseCase::execute", skip(self, content))]
    pub async fn execute(
        &self,
        recipient: Username,
        content: MessageContent,
    ) -> Result<Message, SendMessageError> {
        let message = Message::new(content);
        self.user_store
            .push_message(&recipient, message.clone())
            .await?;
        Ok(message)
    }
}

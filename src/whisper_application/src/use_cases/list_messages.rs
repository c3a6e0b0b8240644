use whisper_core::{Message, UserId, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum ListMessagesError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// List messages use case - the owner's inbox, newest first.
pub struct ListMessagesUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> ListMessagesUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ListMessagesUseCase::execute", skip(self))]
    pub async fn execute(&self, owner: &UserId) -> Result<Vec<Message>, ListMessagesError> {
        Ok(self.user_store.list_messages(owner).await?)
    }
}

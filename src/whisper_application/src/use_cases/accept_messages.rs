use whisper_core::{UserId, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum AcceptMessagesError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Reads and overwrites the owner's accept-messages flag.
///
/// Both operations are idempotent and any value may follow any other.
pub struct AcceptMessagesUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> AcceptMessagesUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "AcceptMessagesUseCase::get", skip(self))]
    pub async fn get(&self, owner: &UserId) -> Result<bool, AcceptMessagesError> {
        let user = self.user_store.find_by_id(owner).await?;
        Ok(user.is_accepting_messages())
    }

    #[tracing::instrument(name = "AcceptMessagesUseCase::set", skip(self))]
    pub async fn set(&self, owner: &UserId, accepting: bool) -> Result<bool, AcceptMessagesError> {
        self.user_store
            .set_accepting_messages(owner, accepting)
            .await?;
        Ok(accepting)
    }
}

use whisper_core::{UserStore, UserStoreError, Username};

#[derive(Debug, thiserror::Error)]
pub enum CheckUsernameError {
    #[error("Username is already taken")]
    UsernameTaken,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Reports whether a username is still available for sign-up.
///
/// Names held by unverified accounts count as available, matching the
/// sign-up policy that lets a new registration reclaim them.
pub struct CheckUsernameUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> CheckUsernameUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "CheckUsernameUseCase::execute", skip(self))]
    pub async fn execute(&self, username: &Username) -> Result<(), CheckUsernameError> {
        match self.user_store.find_by_username(username).await {
            Ok(user) if user.is_verified() => Err(CheckUsernameError::UsernameTaken),
            Ok(_) | Err(UserStoreError::UserNotFound) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

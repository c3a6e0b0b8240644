use chrono::Utc;
use whisper_core::{UserStore, UserStoreError, Username, VerificationDecision, VerificationError};

/// Reads before giving up when the stored code keeps changing underneath us.
const MAX_ATTEMPTS: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum VerifyAccountError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("{0}")]
    VerificationError(#[from] VerificationError),
}

/// Verify account use case - drives the Unverified -> Verified transition.
pub struct VerifyAccountUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> VerifyAccountUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    /// Execute the verify account use case
    ///
    /// `code` is the raw submission. The transition is written conditionally
    /// on the code that was checked, so a re-registration racing with this
    /// call can never be verified by the old code. Safe to retry: once
    /// verified, any further submission succeeds without touching the store.
    #[tracing::instrument(name = "VerifyAccountUseCase::execute", skip(self, code))]
    pub async fn execute(
        &self,
        username: Username,
        code: &str,
    ) -> Result<VerificationDecision, VerifyAccountError> {
        let mut user = self.user_store.find_by_username(&username).await?;

        for _ in 0..MAX_ATTEMPTS {
            let now = Utc::now();
            let decision = user.decide_verification(code, now)?;
            if decision == VerificationDecision::AlreadyVerified {
                return Ok(decision);
            }

            if self
                .user_store
                .mark_verified(user.id(), user.verify_code(), now)
                .await?
            {
                tracing::info!(user_id = %user.id(), "account verified");
                return Ok(decision);
            }

            tracing::debug!(user_id = %user.id(), "record changed before verification, re-reading");
            user = self.user_store.find_by_id(user.id()).await?;
        }

        Err(VerificationError::InvalidCode.into())
    }
}

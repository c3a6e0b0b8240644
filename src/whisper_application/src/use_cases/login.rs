use chrono::{Duration, Utc};
use whisper_core::{
    CredentialError, CredentialVerifier, Email, Password, SessionClaims, UserStore,
    UserStoreError,
};

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Deliberately the same for unknown email and wrong password.
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Please verify your account before logging in")]
    Unverified,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),
}

impl From<UserStoreError> for LoginError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => LoginError::InvalidCredentials,
            other => LoginError::UserStoreError(other),
        }
    }
}

/// Login use case - checks credentials and issues the session claim set.
pub struct LoginUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialVerifier,
{
    user_store: &'a U,
    credential_verifier: &'a H,
    session_ttl: Duration,
    require_verified: bool,
}

impl<'a, U, H> LoginUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialVerifier,
{
    pub fn new(user_store: &'a U, credential_verifier: &'a H, session_ttl: Duration) -> Self {
        Self {
            user_store,
            credential_verifier,
            session_ttl,
            require_verified: false,
        }
    }

    /// Refuse sessions to accounts that have not confirmed their email.
    pub fn require_verified(mut self, require: bool) -> Self {
        self.require_verified = require;
        self
    }

    /// Execute the login use case
    ///
    /// # Returns
    /// The claims to sign into a session token, snapshotting the user's
    /// flags at issuance time.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<SessionClaims, LoginError> {
        let user = match self.user_store.find_by_email(&email).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                // Spend the same hashing work as a real check so timing does
                // not reveal which emails are registered.
                self.credential_verifier.hash(password).await?;
                return Err(LoginError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        let matches = self
            .credential_verifier
            .verify(password, user.password_hash().clone())
            .await?;
        if !matches {
            return Err(LoginError::InvalidCredentials);
        }

        if self.require_verified && !user.is_verified() {
            return Err(LoginError::Unverified);
        }

        Ok(SessionClaims::for_user(&user, Utc::now(), self.session_ttl))
    }
}

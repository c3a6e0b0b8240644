use chrono::{Duration, Utc};
use whisper_core::{
    CredentialError, CredentialVerifier, Email, EmailClient, EmailClientError, Password,
    Registration, User, UserId, UserStore, UserStoreError, Username, VerifyCode,
};

/// Whether a sign-up created an account or refreshed an abandoned one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created,
    Refreshed,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Username is already taken")]
    UsernameTaken,
    #[error("User already exists with this email")]
    EmailTaken,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),
    #[error("Failed to send verification email: {0}")]
    EmailError(#[from] EmailClientError),
}

/// Register use case - creates or refreshes an unverified account and mails
/// its verification code.
pub struct RegisterUseCase<'a, U, H, E>
where
    U: UserStore,
    H: CredentialVerifier,
    E: EmailClient,
{
    user_store: &'a U,
    credential_verifier: &'a H,
    email_client: &'a E,
    code_ttl: Duration,
}

impl<'a, U, H, E> RegisterUseCase<'a, U, H, E>
where
    U: UserStore,
    H: CredentialVerifier,
    E: EmailClient,
{
    pub fn new(
        user_store: &'a U,
        credential_verifier: &'a H,
        email_client: &'a E,
        code_ttl: Duration,
    ) -> Self {
        Self {
            user_store,
            credential_verifier,
            email_client,
            code_ttl,
        }
    }

    /// Execute the register use case
    ///
    /// A verified holder of the username or the email blocks the sign-up.
    /// An unverified account with the same email (or, failing that, the same
    /// username) is overwritten in place, so the last registration wins.
    /// Exactly one write reaches the store.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, email, password))]
    pub async fn execute(
        &self,
        username: Username,
        email: Email,
        password: Password,
    ) -> Result<RegisterOutcome, RegisterError> {
        let by_username = optional(self.user_store.find_by_username(&username).await)?;
        if by_username.as_ref().is_some_and(User::is_verified) {
            return Err(RegisterError::UsernameTaken);
        }

        let by_email = optional(self.user_store.find_by_email(&email).await)?;
        if by_email.as_ref().is_some_and(User::is_verified) {
            return Err(RegisterError::EmailTaken);
        }

        let password_hash = self.credential_verifier.hash(password).await?;
        let verify_code = VerifyCode::generate();
        let registration = Registration {
            username,
            email: email.clone(),
            password_hash,
            verify_code: verify_code.clone(),
            verify_code_expiry: Utc::now() + self.code_ttl,
        };

        let outcome = match (by_email, by_username) {
            (Some(existing), Some(holder)) if holder.id() != existing.id() => {
                // The name belongs to another abandoned sign-up; reclaiming it
                // would take a second write.
                return Err(RegisterError::UsernameTaken);
            }
            (Some(existing), _) => {
                self.replace(existing.id(), registration, RegisterError::EmailTaken)
                    .await?
            }
            (None, Some(holder)) => {
                self.replace(holder.id(), registration, RegisterError::UsernameTaken)
                    .await?
            }
            (None, None) => {
                self.user_store
                    .insert_user(User::register(UserId::new(), registration))
                    .await
                    .map_err(|e| match e {
                        UserStoreError::UserAlreadyExists => RegisterError::UsernameTaken,
                        other => other.into(),
                    })?;
                RegisterOutcome::Created
            }
        };

        self.email_client
            .send_email(
                &email,
                "Verification code",
                &format!(
                    "Your verification code is {verify_code}. It expires in {} minutes.",
                    self.code_ttl.num_minutes()
                ),
            )
            .await?;

        Ok(outcome)
    }

    async fn replace(
        &self,
        id: &UserId,
        registration: Registration,
        on_verified: RegisterError,
    ) -> Result<RegisterOutcome, RegisterError> {
        match self.user_store.replace_unverified(id, registration).await {
            Ok(()) => Ok(RegisterOutcome::Refreshed),
            // Verified between lookup and write.
            Err(UserStoreError::AlreadyVerified) => Err(on_verified),
            Err(UserStoreError::UserAlreadyExists) => Err(RegisterError::UsernameTaken),
            Err(e) => Err(e.into()),
        }
    }
}

fn optional(result: Result<User, UserStoreError>) -> Result<Option<User>, UserStoreError> {
    match result {
        Ok(user) => Ok(Some(user)),
        Err(UserStoreError::UserNotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

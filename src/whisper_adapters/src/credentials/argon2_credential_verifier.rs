use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};
use whisper_core::{CredentialError, CredentialVerifier, HashedPassword, Password};

/// Argon2id hasher. Hashing and verification run on the blocking pool.
#[derive(Debug, Default, Clone)]
pub struct Argon2CredentialVerifier;

impl Argon2CredentialVerifier {
    pub fn new() -> Self {
        Self
    }
}

fn hasher() -> Result<Argon2<'static>, CredentialError> {
    let params = Params::new(15000, 2, 1, None)
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[async_trait::async_trait]
impl CredentialVerifier for Argon2CredentialVerifier {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<HashedPassword, CredentialError> {
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                hasher()?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| HashedPassword::new(Secret::new(h.to_string())))
                    .map_err(|e| CredentialError::Hashing(e.to_string()))
            })
        })
        .await
        .map_err(|e| CredentialError::Hashing(e.to_string()))?
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        candidate: Password,
        expected: HashedPassword,
    ) -> Result<bool, CredentialError> {
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected_password_hash: PasswordHash<'_> =
                    PasswordHash::new(expected.as_ref().expose_secret())
                        .map_err(|e| CredentialError::Hashing(e.to_string()))?;

                match hasher()?.verify_password(
                    candidate.as_ref().expose_secret().as_bytes(),
                    &expected_password_hash,
                ) {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(CredentialError::Hashing(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| CredentialError::Hashing(e.to_string()))?
    }
}

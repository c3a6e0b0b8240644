use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{
    email::Email, ids::UserId, password::HashedPassword, username::Username,
    verify_code::VerifyCode,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("Username must be between 2 and 20 characters")]
    UsernameLength,
    #[error("Username must only contain letters, numbers and underscores")]
    UsernameCharacters,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Verification code must be 6 digits")]
    InvalidVerifyCode,
    #[error("Message content must not be empty")]
    EmptyContent,
    #[error("Message content must be no longer than 300 characters")]
    ContentTooLong,
    #[error("Invalid message id")]
    InvalidMessageId,
}

impl UserError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::UsernameLength | Self::UsernameCharacters => "username",
            Self::InvalidEmail => "email",
            Self::PasswordTooShort => "password",
            Self::InvalidVerifyCode => "code",
            Self::EmptyContent | Self::ContentTooLong => "content",
            Self::InvalidMessageId => "messageId",
        }
    }
}

/// The fields written by a sign-up.
///
/// A fresh sign-up inserts a user built from it, and a repeated sign-up for
/// an unverified account overwrites that account with it.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: Username,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub verify_code: VerifyCode,
    pub verify_code_expiry: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    password_hash: HashedPassword,
    verify_code: VerifyCode,
    verify_code_expiry: DateTime<Utc>,
    is_verified: bool,
    is_accepting_messages: bool,
}

impl User {
    /// A newly registered, unverified user that accepts messages.
    pub fn register(id: UserId, registration: Registration) -> Self {
        Self::restore(id, registration, false, true)
    }

    /// Rebuild a user from persisted state.
    pub fn restore(
        id: UserId,
        registration: Registration,
        is_verified: bool,
        is_accepting_messages: bool,
    ) -> Self {
        let Registration {
            username,
            email,
            password_hash,
            verify_code,
            verify_code_expiry,
        } = registration;

        Self {
            id,
            username,
            email,
            password_hash,
            verify_code,
            verify_code_expiry,
            is_verified,
            is_accepting_messages,
        }
    }

    /// Overwrite the sign-up fields, keeping identity and flags.
    pub fn apply_registration(&mut self, registration: Registration) {
        self.username = registration.username;
        self.email = registration.email;
        self.password_hash = registration.password_hash;
        self.verify_code = registration.verify_code;
        self.verify_code_expiry = registration.verify_code_expiry;
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }

    pub fn verify_code(&self) -> &VerifyCode {
        &self.verify_code
    }

    pub fn verify_code_expiry(&self) -> DateTime<Utc> {
        self.verify_code_expiry
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn is_accepting_messages(&self) -> bool {
        self.is_accepting_messages
    }

    /// Flip to verified if this account is unverified and `code` is its
    /// current, unexpired code. Returns whether the flip happened.
    pub fn confirm_code(&mut self, code: &VerifyCode, now: DateTime<Utc>) -> bool {
        if self.is_verified || &self.verify_code != code || self.verify_code_expiry <= now {
            return false;
        }
        self.is_verified = true;
        true
    }

    pub fn set_accepting_messages(&mut self, accepting: bool) {
        self.is_accepting_messages = accepting;
    }
}

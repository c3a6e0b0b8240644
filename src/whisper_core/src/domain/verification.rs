//! Account verification state machine.
//!
//! ```text
//!   Unverified ──(matching, unexpired code)──▶ Verified
//! ```
//!
//! `Verified` is terminal. Expired codes are only discovered here, lazily,
//! when a code is submitted.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationState {
    Unverified,
    Verified,
}

/// What the caller must do after a code was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationDecision {
    /// Persist the transition to `Verified`.
    Verify,
    /// The account is already verified; nothing to write.
    AlreadyVerified,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Verification code has expired. Please sign up again to get a new code")]
    Expired,
    #[error("Verification code is invalid")]
    InvalidCode,
}

impl User {
    pub fn verification_state(&self) -> VerificationState {
        if self.is_verified() {
            VerificationState::Verified
        } else {
            VerificationState::Unverified
        }
    }

    /// Decide the outcome of submitting `code` at time `now`.
    ///
    /// | code matches | not expired | outcome |
    /// |---|---|---|
    /// | yes | yes | `Verify` |
    /// | yes | no  | `Expired` |
    /// | no  | any | `InvalidCode` |
    ///
    /// `code` is the raw submission and is compared for exact equality, so a
    /// malformed submission is simply a mismatch. A verified account accepts
    /// any submission as a no-op.
    pub fn decide_verification(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<VerificationDecision, VerificationError> {
        if self.verification_state() == VerificationState::Verified {
            return Ok(VerificationDecision::AlreadyVerified);
        }

        if self.verify_code().as_str() != code {
            return Err(VerificationError::InvalidCode);
        }

        if self.verify_code_expiry() <= now {
            return Err(VerificationError::Expired);
        }

        Ok(VerificationDecision::Verify)
    }
}

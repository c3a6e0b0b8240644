use std::fmt;

use rand::Rng;

use super::user::UserError;

pub const VERIFY_CODE_LEN: usize = 6;

/// Fixed-length numeric code mailed to a user to prove ownership of an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCode(String);

impl VerifyCode {
    /// Draw a fresh random code.
    pub fn generate() -> Self {
        let code: u32 = rand::rng().random_range(100_000..1_000_000);
        Self(code.to_string())
    }

    pub fn parse(raw: impl Into<String>) -> Result<Self, UserError> {
        let raw = raw.into();
        if raw.len() != VERIFY_CODE_LEN || !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(UserError::InvalidVerifyCode);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VerifyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerifyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

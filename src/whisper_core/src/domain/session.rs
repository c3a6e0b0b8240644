use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{ids::UserId, user::User};

/// Fixed claim set carried by a session token.
///
/// The verification and accept-messages flags are a snapshot taken at
/// issuance; handlers that need the current value read the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: UserId,
    pub username: String,
    pub is_verified: bool,
    pub is_accepting_messages: bool,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn for_user(user: &User, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: *user.id(),
            username: user.username().to_string(),
            is_verified: user.is_verified(),
            is_accepting_messages: user.is_accepting_messages(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.sub
    }
}

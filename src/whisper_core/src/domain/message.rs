use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ids::MessageId, user::UserError};

pub const MESSAGE_MAX_LEN: usize = 300;

/// Validated body of an anonymous message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn parse(raw: impl Into<String>) -> Result<Self, UserError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserError::EmptyContent);
        }
        if trimmed.chars().count() > MESSAGE_MAX_LEN {
            return Err(UserError::ContentTooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for MessageContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A message in a user's inbox. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Stamp a new message with a fresh id and the current server time.
    pub fn new(content: MessageContent) -> Self {
        Self {
            id: MessageId::new(),
            content,
            created_at: Utc::now(),
        }
    }
}

/// Orders an inbox newest-first. The sort is stable, so messages sharing a
/// timestamp keep their insertion order.
pub fn sort_newest_first(messages: &mut [Message]) {
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

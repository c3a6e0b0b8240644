pub mod accept_messages;
pub mod check_username;
pub mod delete_message;
pub mod error;
pub mod get_messages;
pub mod send_message;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod suggest_messages;
pub mod verify_code;

use serde::{Deserialize, Serialize};

pub use accept_messages::{
    AcceptMessagesRequest, AcceptMessagesResponse, get_accept_messages, set_accept_messages,
};
pub use check_username::{CheckUsernameQuery, check_username_unique};
pub use delete_message::delete_message;
pub use error::{ApiError, ErrorResponse};
pub use get_messages::{MessagesResponse, get_messages};
pub use send_message::{SendMessageRequest, send_message};
pub use sign_in::{SignInConfig, SignInRequest, SignInResponse, SessionUser, sign_in};
pub use sign_out::sign_out;
pub use sign_up::{SignUpConfig, SignUpRequest, sign_up};
pub use suggest_messages::{SuggestionsResponse, suggest_messages};
pub use verify_code::{VerifyCodeRequest, verify_code};

/// Success body shared by routes that only report an outcome.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

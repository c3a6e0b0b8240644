use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use whisper_application::{
    AcceptMessagesError, CheckUsernameError, DeleteMessageError, ListMessagesError, LoginError,
    LogoutError, RegisterError, SendMessageError, SuggestMessagesError, VerifyAccountError,
};
use whisper_core::{BannedTokenStoreError, UserError, UserStoreError, VerificationError};

use crate::auth_validation::TokenAuthError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(UserError),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Incorrect email or password")]
    AuthenticationFailed,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Verification(VerificationError),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let field = match &self {
            ApiError::InvalidInput(e) => Some(e.field().to_owned()),
            _ => None,
        };

        let (status_code, message) = match self {
            ApiError::InvalidInput(_)
            | ApiError::MalformedRequest(_)
            | ApiError::Verification(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),

            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),

            ApiError::AuthenticationFailed | ApiError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),

            ApiError::UnexpectedError(e) => {
                tracing::error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            field,
        });

        (status_code, body).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        ApiError::InvalidInput(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists | UserStoreError::AlreadyVerified => {
                ApiError::Conflict(error.to_string())
            }
            UserStoreError::UserNotFound | UserStoreError::MessageNotFound => {
                ApiError::NotFound(error.to_string())
            }
            UserStoreError::NotAcceptingMessages => ApiError::Forbidden(error.to_string()),
            UserStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<TokenAuthError> for ApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken
            | TokenAuthError::InvalidToken
            | TokenAuthError::TokenError(_)
            | TokenAuthError::TokenIsBanned => {
                tracing::debug!(reason = %error, "session rejected");
                ApiError::Unauthenticated
            }
            TokenAuthError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<BannedTokenStoreError> for ApiError {
    fn from(error: BannedTokenStoreError) -> Self {
        ApiError::UnexpectedError(error.to_string())
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::UsernameTaken | RegisterError::EmailTaken => {
                ApiError::Conflict(error.to_string())
            }
            RegisterError::UserStoreError(e) => e.into(),
            RegisterError::CredentialError(e) => ApiError::UnexpectedError(e.to_string()),
            RegisterError::EmailError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<VerifyAccountError> for ApiError {
    fn from(error: VerifyAccountError) -> Self {
        match error {
            VerifyAccountError::UserStoreError(e) => e.into(),
            VerifyAccountError::VerificationError(e) => ApiError::Verification(e),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::AuthenticationFailed,
            LoginError::Unverified => ApiError::Forbidden(error.to_string()),
            LoginError::UserStoreError(e) => e.into(),
            LoginError::CredentialError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<LogoutError> for ApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::BannedTokenStoreError(e) => e.into(),
        }
    }
}

impl From<SendMessageError> for ApiError {
    fn from(error: SendMessageError) -> Self {
        match error {
            SendMessageError::RecipientNotFound => ApiError::NotFound(error.to_string()),
            SendMessageError::MessagesDisabled => ApiError::Forbidden(error.to_string()),
            SendMessageError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ListMessagesError> for ApiError {
    fn from(error: ListMessagesError) -> Self {
        match error {
            ListMessagesError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<DeleteMessageError> for ApiError {
    fn from(error: DeleteMessageError) -> Self {
        match error {
            DeleteMessageError::MessageNotFound => ApiError::NotFound(error.to_string()),
            DeleteMessageError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<AcceptMessagesError> for ApiError {
    fn from(error: AcceptMessagesError) -> Self {
        match error {
            AcceptMessagesError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<CheckUsernameError> for ApiError {
    fn from(error: CheckUsernameError) -> Self {
        match error {
            CheckUsernameError::UsernameTaken => ApiError::Conflict(error.to_string()),
            CheckUsernameError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<SuggestMessagesError> for ApiError {
    fn from(error: SuggestMessagesError) -> Self {
        ApiError::UnexpectedError(error.to_string())
    }
}

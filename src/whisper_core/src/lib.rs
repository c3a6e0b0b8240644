pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    ids::{MessageId, UserId},
    message::{Message, MessageContent},
    password::{HashedPassword, Password},
    session::SessionClaims,
    user::{Registration, User, UserError},
    username::Username,
    verification::{VerificationDecision, VerificationError, VerificationState},
    verify_code::VerifyCode,
};

pub use ports::{
    repositories::{BannedTokenStore, BannedTokenStoreError, UserStore, UserStoreError},
    services::{
        CredentialError, CredentialVerifier, EmailClient, EmailClientError, SuggestionClient,
        SuggestionError,
    },
};

pub use strategies::auth_validator::AuthValidator;

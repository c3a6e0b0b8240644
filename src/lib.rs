//! # Whisper - Anonymous Messaging Service Library
//!
//! This is a facade crate that re-exports all public APIs from the whisper components.
//! Use this crate to get access to the whole service in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! whisper = { path = "../whisper" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Username`, `Email`, `User`, `Message`, `SessionClaims`, etc.
//! - **Port traits**: `UserStore`, `BannedTokenStore`, `CredentialVerifier`, `EmailClient`
//! - **Use cases**: `RegisterUseCase`, `VerifyAccountUseCase`, `SendMessageUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `RedisBannedTokenStore`, `PostmarkEmailClient`, etc.
//! - **Service**: `WhisperService` - The main entry point for the HTTP service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use whisper_core::*;
}

pub use whisper_core::{
    Email, HashedPassword, Message, MessageContent, MessageId, Password, SessionClaims, User,
    UserError, UserId, Username, VerificationDecision, VerificationError, VerificationState,
    VerifyCode,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use whisper_core::{
        BannedTokenStore, BannedTokenStoreError, UserStore, UserStoreError,
    };
}

pub use whisper_core::{
    BannedTokenStore, BannedTokenStoreError, CredentialVerifier, EmailClient, SuggestionClient,
    UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use whisper_application::*;
}

pub use whisper_application::{
    AcceptMessagesUseCase, CheckUsernameUseCase, DeleteMessageUseCase, ListMessagesUseCase,
    LoginUseCase, LogoutUseCase, RegisterUseCase, SendMessageUseCase, SuggestMessagesUseCase,
    VerifyAccountUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use whisper_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use whisper_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use whisper_adapters::email::*;
    }

    /// JWT session utilities
    pub mod auth {
        pub use whisper_adapters::auth_validation::*;
    }

    /// Configuration
    pub mod config {
        pub use whisper_adapters::config::*;
    }
}

pub use whisper_adapters::{
    credentials::Argon2CredentialVerifier,
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{
        HashMapUserStore, HashSetBannedTokenStore, PostgresUserStore, RedisBannedTokenStore,
    },
    suggestions::StaticSuggestionClient,
};

// ============================================================================
// Whisper Service (Main Entry Point)
// ============================================================================

pub use whisper_service::{ServiceConfig, WhisperService};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;

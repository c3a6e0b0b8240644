pub mod auth_validation;
pub mod config;
pub mod credentials;
pub mod email;
pub mod http;
pub mod persistence;
pub mod suggestions;

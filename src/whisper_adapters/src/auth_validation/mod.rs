pub mod local_jwt_validator;

pub use local_jwt_validator::{
    AuthenticatedSession, JwtAuthConfig, LocalJwtValidator, TokenAuthError, create_auth_cookie,
    create_removal_cookie, extract_token, generate_session_token, validate_session_token,
};

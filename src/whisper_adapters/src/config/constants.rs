pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    pub const CONFIG_DIR_ENV_VAR: &str = "WHISPER_CONFIG_DIR";
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "WHISPER_ALLOWED_ORIGINS";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const REDIS_HOST_NAME_ENV_VAR: &str = "REDIS_HOST_NAME";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "POSTMARK_AUTH_TOKEN";
}

pub const ENV_PREFIX: &str = "WHISPER";
pub const DEFAULT_ENVIRONMENT: &str = "local";
pub const DEFAULT_CONFIG_DIR: &str = "config";

pub const DEFAULT_JWT_COOKIE_NAME: &str = "whisper_session";
pub const DEFAULT_VERIFICATION_CODE_TTL_SECONDS: i64 = 3600;

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT: Duration = std::time::Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}

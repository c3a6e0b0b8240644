use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
        request,
    },
    middleware,
    routing::{delete, get, post},
};
use chrono::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use whisper_adapters::{
    auth_validation::{JwtAuthConfig, LocalJwtValidator},
    config::{AllowedOrigins, Settings},
    http::{
        require_session,
        routes::{
            SignInConfig, SignUpConfig, check_username_unique, delete_message,
            get_accept_messages, get_messages, send_message, set_accept_messages, sign_in,
            sign_out, sign_up, suggest_messages, verify_code,
        },
    },
};
use whisper_core::{BannedTokenStore, CredentialVerifier, EmailClient, SuggestionClient, UserStore};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// Runtime knobs the routes need beyond their ports.
#[derive(Clone)]
pub struct ServiceConfig {
    pub jwt: JwtAuthConfig,
    pub require_verified_login: bool,
    pub verification_code_ttl: Duration,
}

impl ServiceConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            jwt: JwtAuthConfig {
                jwt_cookie_name: settings.auth.jwt.cookie_name.clone(),
                jwt_secret: settings.auth.jwt.secret.clone(),
                token_ttl_in_seconds: settings.auth.jwt.time_to_live,
            },
            require_verified_login: settings.auth.require_verified_login,
            verification_code_ttl: Duration::seconds(settings.auth.verification_code_ttl_seconds),
        }
    }
}

/// The anonymous-messaging HTTP service.
pub struct WhisperService {
    router: Router,
}

impl WhisperService {
    /// Wire every route to the ports it needs.
    ///
    /// Public routes get their own state. Inbox and account routes sit
    /// behind `require_session`, which hands them the validated claims.
    pub fn new<U, H, E, B, S>(
        user_store: U,
        credential_verifier: H,
        email_client: E,
        banned_token_store: B,
        suggestion_client: S,
        config: ServiceConfig,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        H: CredentialVerifier + Clone + 'static,
        E: EmailClient + Clone + 'static,
        B: BannedTokenStore + Clone + 'static,
        S: SuggestionClient + Clone + 'static,
    {
        let validator = LocalJwtValidator::new(banned_token_store.clone(), config.jwt.clone());

        let public = Router::new()
            .route("/sign-up", post(sign_up::<U, H, E>))
            .with_state((
                user_store.clone(),
                credential_verifier.clone(),
                email_client,
                SignUpConfig {
                    verification_code_ttl: config.verification_code_ttl,
                },
            ))
            .route("/sign-in", post(sign_in::<U, H>))
            .with_state((
                user_store.clone(),
                credential_verifier,
                SignInConfig {
                    jwt: config.jwt.clone(),
                    require_verified: config.require_verified_login,
                },
            ))
            .route("/verify-code", post(verify_code::<U>))
            .route("/check-username-unique", get(check_username_unique::<U>))
            .route("/send-message", post(send_message::<U>))
            .with_state(user_store.clone())
            .route("/suggest-messages", get(suggest_messages::<S>))
            .with_state(suggestion_client);

        let protected = Router::new()
            .route("/sign-out", post(sign_out::<B>))
            .with_state((banned_token_store, config.jwt))
            .route(
                "/accept-messages",
                get(get_accept_messages::<U>).post(set_accept_messages::<U>),
            )
            .route("/get-messages", get(get_messages::<U>))
            .route("/delete-message/{message_id}", delete(delete_message::<U>))
            .with_state(user_store)
            .route_layer(middleware::from_fn_with_state(
                validator,
                require_session::<LocalJwtValidator<B>>,
            ));

        Self {
            router: public.merge(protected),
        }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be mounted on another router.
    ///
    /// CORS is only applied when `allowed_origins` is given.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers([CONTENT_TYPE, AUTHORIZATION])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Whisper listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

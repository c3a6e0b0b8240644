use color_eyre::eyre::{Result, eyre};
use reqwest::Client as HttpClient;
use secrecy::Secret;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use whisper_adapters::{
    config::{BannedTokenBackend, EmailBackend, Settings, StoreBackend},
    credentials::Argon2CredentialVerifier,
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{
        HashMapUserStore, HashSetBannedTokenStore, PostgresUserStore, RedisBannedTokenStore,
    },
    suggestions::StaticSuggestionClient,
};
use whisper_core::{BannedTokenStore, Email, EmailClient, UserStore};
use whisper_service::{ServiceConfig, WhisperService};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;

    match settings.store.backend {
        StoreBackend::Memory => with_user_store(settings, HashMapUserStore::new()).await,
        StoreBackend::Postgres => {
            let postgres = settings
                .postgres
                .as_ref()
                .ok_or_else(|| eyre!("store.backend is postgres but postgres.url is not set"))?;
            let user_store = PostgresUserStore::connect(&postgres.url).await?;
            with_user_store(settings, user_store).await
        }
    }
}

async fn with_user_store<U>(settings: Settings, user_store: U) -> Result<()>
where
    U: UserStore + Clone + 'static,
{
    match settings.banned_tokens.backend {
        BannedTokenBackend::Memory => {
            with_stores(settings, user_store, HashSetBannedTokenStore::new()).await
        }
        BannedTokenBackend::Redis => {
            let redis = settings
                .redis
                .as_ref()
                .ok_or_else(|| eyre!("banned_tokens.backend is redis but redis is not set"))?;
            let ttl = u64::try_from(settings.auth.jwt.time_to_live)?;
            let banned_token_store = RedisBannedTokenStore::connect(&redis.host_name, ttl).await?;
            with_stores(settings, user_store, banned_token_store).await
        }
    }
}

async fn with_stores<U, B>(settings: Settings, user_store: U, banned_token_store: B) -> Result<()>
where
    U: UserStore + Clone + 'static,
    B: BannedTokenStore + Clone + 'static,
{
    match settings.email_client.backend {
        EmailBackend::Mock => {
            serve(settings, user_store, banned_token_store, MockEmailClient::new()).await
        }
        EmailBackend::Postmark => {
            let http_client = HttpClient::builder()
                .timeout(settings.email_client.timeout())
                .build()?;

            let email_client = PostmarkEmailClient::new(
                &settings.email_client.base_url,
                Email::try_from(Secret::new(settings.email_client.sender.clone()))?,
                settings.email_client.auth_token.clone(),
                http_client,
            )?;
            serve(settings, user_store, banned_token_store, email_client).await
        }
    }
}

async fn serve<U, B, E>(
    settings: Settings,
    user_store: U,
    banned_token_store: B,
    email_client: E,
) -> Result<()>
where
    U: UserStore + Clone + 'static,
    B: BannedTokenStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let service = WhisperService::new(
        user_store,
        Argon2CredentialVerifier::new(),
        email_client,
        banned_token_store,
        StaticSuggestionClient::default(),
        ServiceConfig::from_settings(&settings),
    );

    let allowed_origins = settings.auth.allowed_origins.clone();
    let allowed_origins = (!allowed_origins.is_empty()).then_some(allowed_origins);

    let listener = tokio::net::TcpListener::bind(&settings.application.address).await?;
    tracing::info!(
        store = ?settings.store.backend,
        banned_tokens = ?settings.banned_tokens.backend,
        email = ?settings.email_client.backend,
        "Starting whisper"
    );

    service.run_standalone(listener, allowed_origins).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

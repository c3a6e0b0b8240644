use redis::{AsyncCommands, aio::MultiplexedConnection};
use whisper_core::{BannedTokenStore, BannedTokenStoreError};

/// Revocation list shared across instances through Redis.
///
/// Each entry expires together with the session it revokes, so the set never
/// holds tokens that would fail validation anyway.
#[derive(Clone)]
pub struct RedisBannedTokenStore {
    conn: MultiplexedConnection,
    token_ttl: u64,
}

impl RedisBannedTokenStore {
    pub fn new(conn: MultiplexedConnection, token_ttl: u64) -> Self {
        Self { conn, token_ttl }
    }

    pub async fn connect(host_name: &str, token_ttl: u64) -> Result<Self, BannedTokenStoreError> {
        let client = redis::Client::open(format!("redis://{host_name}/"))
            .map_err(|e| BannedTokenStoreError::DatabaseError(e.to_string()))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| BannedTokenStoreError::DatabaseError(e.to_string()))?;
        Ok(Self::new(conn, token_ttl))
    }
}

#[async_trait::async_trait]
impl BannedTokenStore for RedisBannedTokenStore {
    #[tracing::instrument(name = "Banning session token in Redis", skip_all)]
    async fn ban_token(&self, token: String) -> Result<(), BannedTokenStoreError> {
        let key = get_key(&token);

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, true, self.token_ttl)
            .await
            .map_err(|e| BannedTokenStoreError::DatabaseError(e.to_string()))
    }

    #[tracing::instrument(name = "Checking session token in Redis", skip_all)]
    async fn contains_token(&self, token: &str) -> Result<bool, BannedTokenStoreError> {
        let key = get_key(token);

        let mut conn = self.conn.clone();
        conn.exists(&key)
            .await
            .map_err(|e| BannedTokenStoreError::DatabaseError(e.to_string()))
    }
}

const BANNED_TOKEN_KEY_PREFIX: &str = "whisper:banned_token:";

fn get_key(token: &str) -> String {
    format!("{}{}", BANNED_TOKEN_KEY_PREFIX, token)
}

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use whisper_core::{BannedTokenStore, BannedTokenStoreError};

/// Process-local revocation list. Revocations are lost on restart.
#[derive(Debug, Default, Clone)]
pub struct HashSetBannedTokenStore {
    banned_tokens: Arc<RwLock<HashSet<String>>>,
}

impl HashSetBannedTokenStore {
    pub fn new() -> Self {
        Self {
            banned_tokens: Arc::new(RwLock::new(HashSet::new())),
        }
    }
}

#[async_trait::async_trait]
impl BannedTokenStore for HashSetBannedTokenStore {
    async fn ban_token(&self, token: String) -> Result<(), BannedTokenStoreError> {
        let mut banned_tokens = self.banned_tokens.write().await;
        banned_tokens.insert(token);
        Ok(())
    }

    async fn contains_token(&self, token: &str) -> Result<bool, BannedTokenStoreError> {
        let banned_tokens = self.banned_tokens.read().await;
        Ok(banned_tokens.contains(token))
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use whisper_core::domain::message::sort_newest_first;
use whisper_core::{
    Email, Message, MessageId, Registration, User, UserId, UserStore, UserStoreError, Username,
    VerifyCode,
};

#[derive(Debug)]
struct Account {
    user: User,
    inbox: Vec<Message>,
}

/// In-memory user store.
///
/// Every operation holds the write lock for its whole duration, which makes
/// the conditional writes (`replace_unverified`, `push_message`) atomic.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    accounts: Arc<RwLock<HashMap<UserId, Account>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn holds_identity(
    accounts: &HashMap<UserId, Account>,
    except: Option<&UserId>,
    username: &Username,
    email: &Email,
) -> bool {
    accounts.values().any(|account| {
        Some(account.user.id()) != except
            && (account.user.username() == username || account.user.email() == email)
    })
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn insert_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(user.id())
            || holds_identity(&accounts, None, user.username(), user.email())
        {
            return Err(UserStoreError::UserAlreadyExists);
        }
        accounts.insert(
            *user.id(),
            Account {
                user,
                inbox: Vec::new(),
            },
        );
        Ok(())
    }

    async fn replace_unverified(
        &self,
        id: &UserId,
        registration: Registration,
    ) -> Result<(), UserStoreError> {
        let mut accounts = self.accounts.write().await;
        if holds_identity(
            &accounts,
            Some(id),
            &registration.username,
            &registration.email,
        ) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let account = accounts.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        if account.user.is_verified() {
            return Err(UserStoreError::AlreadyVerified);
        }
        account.user.apply_registration(registration);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .get(id)
            .map(|account| account.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_username(&self, username: &Username) -> Result<User, UserStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|account| account.user.username() == username)
            .map(|account| account.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|account| account.user.email() == email)
            .map(|account| account.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn mark_verified(
        &self,
        id: &UserId,
        code: &VerifyCode,
        now: DateTime<Utc>,
    ) -> Result<bool, UserStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        Ok(account.user.confirm_code(code, now))
    }

    async fn set_accepting_messages(
        &self,
        id: &UserId,
        accepting: bool,
    ) -> Result<(), UserStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        account.user.set_accepting_messages(accepting);
        Ok(())
    }

    async fn push_message(
        &self,
        recipient: &Username,
        message: Message,
    ) -> Result<(), UserStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .values_mut()
            .find(|account| account.user.username() == recipient)
            .ok_or(UserStoreError::UserNotFound)?;
        if !account.user.is_accepting_messages() {
            return Err(UserStoreError::NotAcceptingMessages);
        }
        account.inbox.push(message);
        Ok(())
    }

    async fn list_messages(&self, owner: &UserId) -> Result<Vec<Message>, UserStoreError> {
        let accounts = self.accounts.read().await;
        let account = accounts.get(owner).ok_or(UserStoreError::UserNotFound)?;
        let mut messages = account.inbox.clone();
        sort_newest_first(&mut messages);
        Ok(messages)
    }

    async fn pull_message(
        &self,
        owner: &UserId,
        message_id: &MessageId,
    ) -> Result<(), UserStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(owner)
            .ok_or(UserStoreError::MessageNotFound)?;
        let position = account
            .inbox
            .iter()
            .position(|message| &message.id == message_id)
            .ok_or(UserStoreError::MessageNotFound)?;
        account.inbox.remove(position);
        Ok(())
    }
}

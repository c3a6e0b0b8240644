//! In-memory port doubles shared by the use case tests.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::{Mutex, RwLock};
use whisper_core::{
    BannedTokenStore, BannedTokenStoreError, CredentialError, CredentialVerifier, Email,
    EmailClient, EmailClientError, HashedPassword, Message, MessageId, Password, Registration,
    User, UserId, UserStore, UserStoreError, Username, VerifyCode,
};

#[derive(Default, Clone)]
pub struct MockUserStore {
    pub users: Arc<RwLock<HashMap<UserId, (User, Vec<Message>)>>>,
}

impl MockUserStore {
    pub async fn seed(&self, user: User) {
        self.users
            .write()
            .await
            .insert(*user.id(), (user, Vec::new()));
    }

    pub async fn get(&self, id: &UserId) -> User {
        self.users.read().await[id].0.clone()
    }

    pub async fn inbox_len(&self, id: &UserId) -> usize {
        self.users.read().await[id].1.len()
    }
}

#[async_trait::async_trait]
impl UserStore for MockUserStore {
    async fn insert_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let taken = users
            .values()
            .any(|(u, _)| u.username() == user.username() || u.email() == user.email());
        if taken {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(*user.id(), (user, Vec::new()));
        Ok(())
    }

    async fn replace_unverified(
        &self,
        id: &UserId,
        registration: Registration,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let (user, _) = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        if user.is_verified() {
            return Err(UserStoreError::AlreadyVerified);
        }
        user.apply_registration(registration);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(id)
            .map(|(u, _)| u.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_username(&self, username: &Username) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|(u, _)| u.username() == username)
            .map(|(u, _)| u.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|(u, _)| u.email() == email)
            .map(|(u, _)| u.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn mark_verified(
        &self,
        id: &UserId,
        code: &VerifyCode,
        now: DateTime<Utc>,
    ) -> Result<bool, UserStoreError> {
        let mut users = self.users.write().await;
        let (user, _) = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        Ok(user.confirm_code(code, now))
    }

    async fn set_accepting_messages(
        &self,
        id: &UserId,
        accepting: bool,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let (user, _) = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        user.set_accepting_messages(accepting);
        Ok(())
    }

    async fn push_message(
        &self,
        recipient: &Username,
        message: Message,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let (user, inbox) = users
            .values_mut()
            .find(|(u, _)| u.username() == recipient)
            .ok_or(UserStoreError::UserNotFound)?;
        if !user.is_accepting_messages() {
            return Err(UserStoreError::NotAcceptingMessages);
        }
        inbox.push(message);
        Ok(())
    }

    async fn list_messages(&self, owner: &UserId) -> Result<Vec<Message>, UserStoreError> {
        let users = self.users.read().await;
        let (_, inbox) = users.get(owner).ok_or(UserStoreError::UserNotFound)?;
        let mut messages = inbox.clone();
        whisper_core::domain::message::sort_newest_first(&mut messages);
        Ok(messages)
    }

    async fn pull_message(
        &self,
        owner: &UserId,
        message_id: &MessageId,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let (_, inbox) = users.get_mut(owner).ok_or(UserStoreError::MessageNotFound)?;
        let before = inbox.len();
        inbox.retain(|m| &m.id != message_id);
        if inbox.len() == before {
            return Err(UserStoreError::MessageNotFound);
        }
        Ok(())
    }
}

/// Reversible stand-in for a real password hasher.
#[derive(Default, Clone)]
pub struct MockCredentialVerifier;

#[async_trait::async_trait]
impl CredentialVerifier for MockCredentialVerifier {
    async fn hash(&self, password: Password) -> Result<HashedPassword, CredentialError> {
        Ok(HashedPassword::new(Secret::new(format!(
            "hashed:{}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(
        &self,
        candidate: Password,
        expected: HashedPassword,
    ) -> Result<bool, CredentialError> {
        Ok(expected.as_ref().expose_secret()
            == &format!("hashed:{}", candidate.as_ref().expose_secret()))
    }
}

#[derive(Default, Clone)]
pub struct RecordingEmailClient {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingEmailClient {
    pub async fn last_content(&self) -> Option<String> {
        self.sent.lock().await.last().map(|(_, c)| c.clone())
    }
}

#[async_trait::async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        _subject: &str,
        content: &str,
    ) -> Result<(), EmailClientError> {
        self.sent.lock().await.push((
            recipient.as_ref().expose_secret().clone(),
            content.to_owned(),
        ));
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MockBannedTokenStore {
    pub tokens: Arc<RwLock<Vec<String>>>,
}

#[async_trait::async_trait]
impl BannedTokenStore for MockBannedTokenStore {
    async fn ban_token(&self, token: String) -> Result<(), BannedTokenStoreError> {
        self.tokens.write().await.push(token);
        Ok(())
    }

    async fn contains_token(&self, token: &str) -> Result<bool, BannedTokenStoreError> {
        Ok(self.tokens.read().await.iter().any(|t| t == token))
    }
}

pub fn username(raw: &str) -> Username {
    Username::parse(raw).unwrap()
}

pub fn email(raw: &str) -> Email {
    Email::parse(Secret::new(raw.to_owned())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::parse(Secret::new(raw.to_owned())).unwrap()
}

/// A stored user whose password is `pw123456` and whose code is `code`.
pub fn stored_user(
    name: &str,
    mail: &str,
    code: &str,
    expiry: DateTime<Utc>,
    verified: bool,
    accepting: bool,
) -> User {
    let registration = Registration {
        username: username(name),
        email: email(mail),
        password_hash: HashedPassword::new(Secret::new("hashed:pw123456".to_owned())),
        verify_code: VerifyCode::parse(code).unwrap(),
        verify_code_expiry: expiry,
    };
    User::restore(UserId::new(), registration, verified, accepting)
}

pub fn in_one_hour() -> DateTime<Utc> {
    Utc::now() + Duration::hours(1)
}

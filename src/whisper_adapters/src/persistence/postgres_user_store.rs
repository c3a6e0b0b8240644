use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool, postgres::PgPoolOptions};
use uuid::Uuid;
use whisper_core::{
    Email, HashedPassword, Message, MessageContent, MessageId, Registration, User, UserId,
    UserStore, UserStoreError, Username, VerifyCode,
};

const USER_COLUMNS: &str = "id, username, email, password_hash, verify_code, verify_code_expiry, \
     is_verified, is_accepting_messages";

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }

    /// Open a pool against `url` and bring the schema up to date.
    pub async fn connect(url: &Secret<String>) -> Result<Self, UserStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url.expose_secret())
            .await
            .map_err(unexpected)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        Ok(Self::new(pool))
    }

    async fn user_exists(&self, id: &UserId) -> Result<bool, UserStoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<User, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        row.try_into()
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    verify_code: String,
    verify_code_expiry: DateTime<Utc>,
    is_verified: bool,
    is_accepting_messages: bool,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let registration = Registration {
            username: Username::parse(row.username).map_err(corrupt)?,
            email: Email::parse(Secret::new(row.email)).map_err(corrupt)?,
            password_hash: HashedPassword::new(Secret::new(row.password_hash)),
            verify_code: VerifyCode::parse(row.verify_code).map_err(corrupt)?,
            verify_code_expiry: row.verify_code_expiry,
        };

        Ok(User::restore(
            UserId::from(row.id),
            registration,
            row.is_verified,
            row.is_accepting_messages,
        ))
    }
}

#[derive(FromRow)]
struct MessageRow {
    id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = UserStoreError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        Ok(Message {
            id: MessageId::from(row.id),
            content: MessageContent::parse(row.content).map_err(corrupt)?,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct PushOutcome {
    recipients: i64,
    inserted: i64,
}

fn unexpected(e: sqlx::Error) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

fn corrupt(e: whisper_core::UserError) -> UserStoreError {
    UserStoreError::UnexpectedError(format!("corrupt row: {e}"))
}

fn unique_violation_or_unexpected(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return UserStoreError::UserAlreadyExists;
        }
    }
    UserStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn insert_user(&self, user: User) -> Result<(), UserStoreError> {
        sqlx::query(
            r#"
                INSERT INTO users (id, username, email, password_hash, verify_code,
                                   verify_code_expiry, is_verified, is_accepting_messages)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username().as_ref())
        .bind(user.email().as_ref().expose_secret())
        .bind(user.password_hash().as_ref().expose_secret())
        .bind(user.verify_code().as_str())
        .bind(user.verify_code_expiry())
        .bind(user.is_verified())
        .bind(user.is_accepting_messages())
        .execute(&self.pool)
        .await
        .map_err(unique_violation_or_unexpected)?;

        Ok(())
    }

    #[tracing::instrument(name = "Replacing unverified registration", skip_all)]
    async fn replace_unverified(
        &self,
        id: &UserId,
        registration: Registration,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET username = $2, email = $3, password_hash = $4,
                    verify_code = $5, verify_code_expiry = $6
                WHERE id = $1 AND is_verified = FALSE
            "#,
        )
        .bind(id.as_uuid())
        .bind(registration.username.as_ref())
        .bind(registration.email.as_ref().expose_secret())
        .bind(registration.password_hash.as_ref().expose_secret())
        .bind(registration.verify_code.as_str())
        .bind(registration.verify_code_expiry)
        .execute(&self.pool)
        .await
        .map_err(unique_violation_or_unexpected)?;

        if result.rows_affected() == 0 {
            return if self.user_exists(id).await? {
                Err(UserStoreError::AlreadyVerified)
            } else {
                Err(UserStoreError::UserNotFound)
            };
        }

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        row.try_into()
    }

    #[tracing::instrument(name = "Retrieving user by username from PostgreSQL", skip_all)]
    async fn find_by_username(&self, username: &Username) -> Result<User, UserStoreError> {
        self.find_one("username", username.as_ref()).await
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.find_one("email", email.as_ref().expose_secret()).await
    }

    #[tracing::instrument(name = "Marking user verified", skip_all)]
    async fn mark_verified(
        &self,
        id: &UserId,
        code: &VerifyCode,
        now: DateTime<Utc>,
    ) -> Result<bool, UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users SET is_verified = TRUE
                WHERE id = $1 AND is_verified = FALSE
                  AND verify_code = $2 AND verify_code_expiry > $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(code.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 && !self.user_exists(id).await? {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(result.rows_affected() == 1)
    }

    #[tracing::instrument(name = "Updating message acceptance", skip_all)]
    async fn set_accepting_messages(
        &self,
        id: &UserId,
        accepting: bool,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query("UPDATE users SET is_accepting_messages = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(accepting)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Delivering message in PostgreSQL", skip_all)]
    async fn push_message(
        &self,
        recipient: &Username,
        message: Message,
    ) -> Result<(), UserStoreError> {
        // The acceptance check and the insert run as one statement.
        let outcome = sqlx::query_as::<_, PushOutcome>(
            r#"
                WITH recipient AS (
                    SELECT id, is_accepting_messages FROM users WHERE username = $1
                ),
                inserted AS (
                    INSERT INTO messages (id, owner_id, content, created_at)
                    SELECT $2, id, $3, $4 FROM recipient WHERE is_accepting_messages
                    RETURNING 1
                )
                SELECT (SELECT COUNT(*) FROM recipient) AS recipients,
                       (SELECT COUNT(*) FROM inserted) AS inserted
            "#,
        )
        .bind(recipient.as_ref())
        .bind(message.id.as_uuid())
        .bind(message.content.as_ref())
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        match (outcome.recipients, outcome.inserted) {
            (0, _) => Err(UserStoreError::UserNotFound),
            (_, 0) => Err(UserStoreError::NotAcceptingMessages),
            _ => Ok(()),
        }
    }

    #[tracing::instrument(name = "Listing messages from PostgreSQL", skip_all)]
    async fn list_messages(&self, owner: &UserId) -> Result<Vec<Message>, UserStoreError> {
        if !self.user_exists(owner).await? {
            return Err(UserStoreError::UserNotFound);
        }

        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
                SELECT id, content, created_at
                FROM messages
                WHERE owner_id = $1
                ORDER BY created_at DESC, seq ASC
            "#,
        )
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.into_iter().map(Message::try_from).collect()
    }

    #[tracing::instrument(name = "Deleting message from PostgreSQL", skip_all)]
    async fn pull_message(
        &self,
        owner: &UserId,
        message_id: &MessageId,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1 AND owner_id = $2")
            .bind(message_id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::MessageNotFound);
        }

        Ok(())
    }
}

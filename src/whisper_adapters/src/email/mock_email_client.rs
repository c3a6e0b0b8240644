use whisper_core::{Email, EmailClient, EmailClientError};

/// Logs outgoing mail instead of delivering it. Used for local runs.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient;

impl MockEmailClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), EmailClientError> {
        tracing::debug!(?recipient, subject, content, "Email delivery suppressed");
        Ok(())
    }
}

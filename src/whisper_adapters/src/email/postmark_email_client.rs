use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use whisper_core::{Email, EmailClient, EmailClientError};

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";
const SEND_PATH: &str = "/email";

/// Postmark "single email" client.
///
/// The endpoint is resolved once at construction, so a bad base url fails
/// at startup instead of on the first sign-up.
#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    endpoint: Url,
    sender: Email,
    server_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: &str,
        sender: Email,
        server_token: Secret<String>,
        http_client: Client,
    ) -> Result<Self, EmailClientError> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(SEND_PATH))
            .map_err(|e| EmailClientError::InvalidConfiguration(format!("{base_url}: {e}")))?;

        Ok(Self {
            http_client,
            endpoint,
            sender,
            server_token,
        })
    }
}

/// Outgoing message. The text part is sent as written, the html part is the
/// same text escaped and split into paragraphs.
#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct PostmarkMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: String,
    text_body: &'a str,
    message_stream: &'static str,
}

/// Body Postmark returns alongside any non-2xx status.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct PostmarkErrorBody {
    error_code: i64,
    message: String,
}

fn html_paragraphs(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("<p>{}</p>", escape_html(line)))
        .collect()
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Map a failed delivery onto the port error. Postmark reports refusals
/// (bad recipient, suppressed address, ...) as an `ErrorCode` in the body.
fn delivery_error(status: StatusCode, body: &[u8]) -> EmailClientError {
    match serde_json::from_slice::<PostmarkErrorBody>(body) {
        Ok(error) if status == StatusCode::UNPROCESSABLE_ENTITY => EmailClientError::Rejected {
            code: error.error_code,
            message: error.message,
        },
        Ok(error) => EmailClientError::SendFailed(format!(
            "{status} ({}): {}",
            error.error_code, error.message
        )),
        Err(_) => EmailClientError::SendFailed(status.to_string()),
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending email via Postmark", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), EmailClientError> {
        let message = PostmarkMessage {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject,
            html_body: html_paragraphs(content),
            text_body: content,
            message_stream: MESSAGE_STREAM,
        };

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(POSTMARK_AUTH_HEADER, self.server_token.expose_secret())
            .json(&message)
            .send()
            .await
            .map_err(|e| EmailClientError::SendFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.bytes().await.unwrap_or_default();
        let error = delivery_error(status, &body);
        tracing::warn!(%status, error = %error, "postmark refused the message");
        Err(error)
    }
}

use whisper_core::{SuggestionClient, SuggestionError};

#[derive(Debug, thiserror::Error)]
pub enum SuggestMessagesError {
    #[error("{0}")]
    SuggestionError(#[from] SuggestionError),
}

/// Conversation starters offered on the public send page.
pub struct SuggestMessagesUseCase<'a, S>
where
    S: SuggestionClient,
{
    suggestion_client: &'a S,
}

impl<'a, S> SuggestMessagesUseCase<'a, S>
where
    S: SuggestionClient,
{
    pub fn new(suggestion_client: &'a S) -> Self {
        Self { suggestion_client }
    }

    #[tracing::instrument(name = "SuggestMessagesUseCase::execute", skip(self))]
    pub async fn execute(&self) -> Result<Vec<String>, SuggestMessagesError> {
        let suggestions = self
            .suggestion_client
            .suggest()
            .await?
            .into_iter()
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(suggestions)
    }
}

use whisper_core::{SuggestionClient, SuggestionError};

const DEFAULT_SUGGESTIONS: &str =
    "What's your favorite movie?||Do you have any pets?||What's your dream job?";
const SEPARATOR: &str = "||";

/// Serves a fixed, `||`-separated list of conversation starters.
#[derive(Debug, Clone)]
pub struct StaticSuggestionClient {
    suggestions: String,
}

impl StaticSuggestionClient {
    pub fn new(suggestions: impl Into<String>) -> Self {
        Self {
            suggestions: suggestions.into(),
        }
    }
}

impl Default for StaticSuggestionClient {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTIONS)
    }
}

#[async_trait::async_trait]
impl SuggestionClient for StaticSuggestionClient {
    async fn suggest(&self) -> Result<Vec<String>, SuggestionError> {
        Ok(self
            .suggestions
            .split(SEPARATOR)
            .map(str::to_owned)
            .collect())
    }
}

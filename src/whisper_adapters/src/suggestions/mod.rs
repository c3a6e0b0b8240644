pub mod static_suggestion_client;

pub use static_suggestion_client::StaticSuggestionClient;

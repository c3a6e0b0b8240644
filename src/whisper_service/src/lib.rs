mod telemetry;
mod whisper_service;

pub use whisper_service::{ServiceConfig, WhisperService};

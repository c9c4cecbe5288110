//! Request-scoped value objects shared between handlers and prompt builders.
//! Everything here is transient: created on request receipt, discarded after
//! the response is sent.

use serde::Deserialize;

/// One turn of the career-coach conversation, passed wholesale to the model.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// A tracked job application for the progress-tracker feature.
/// All fields are optional; the prompt builder fills placeholders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobApplication {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

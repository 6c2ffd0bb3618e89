//! AI-assisted monster drafting: a Gemini `generateContent` client plus the
//! defensive normalization applied to whatever comes back.

mod client;
mod normalize;
mod prompt;

pub use client::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use normalize::normalize_generated;
pub use prompt::{build_prompt, SCHEMA_PREAMBLE};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("API key is missing; set GEMINI_API_KEY")]
    MissingApiKey,
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generation endpoint returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("unexpected generation response: {0}")]
    InvalidResponse(String),
    #[error("Gemini returned invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("generated monster does not match the schema: {0}")]
    Schema(String),
}

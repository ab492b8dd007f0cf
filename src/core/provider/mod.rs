//! Provider seam for grounded text generation.
//!
//! Callers see a single narrow contract: one prompt in, free text plus
//! whatever citations the backend attached out. Everything about how the
//! reply is produced stays behind [`GroundedProvider`].

mod gemini;

pub use gemini::{GeminiClient, DEFAULT_MODEL};

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// A citation attached to a grounded reply. Either field may be absent;
/// filtering incomplete entries is the parser's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Citation {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// A model reply plus the grounding citations the backend supplied.
#[derive(Debug, Clone, Default)]
pub struct GroundedReply {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// A text-generation backend with web-search grounding enabled.
#[async_trait]
pub trait GroundedProvider: Send + Sync {
    /// Stable provider identifier for logs.
    fn id(&self) -> &str;

    /// Model identifier used for requests.
    fn model(&self) -> &str;

    /// Generate a grounded reply for a single prompt.
    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedReply>;
}

pub mod gemini;
pub mod json;

use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
}

/// Boundary to the external text-generation service: one prompt in, free
/// text out. All transport failures are pre-classified into the
/// `AnalysisError` taxonomy before they cross this trait.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    fn provider(&self) -> Provider;

    async fn generate_text(&self, prompt: &str) -> Result<String, AnalysisError>;
}

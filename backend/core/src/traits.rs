use async_trait::async_trait;

use crate::SightError;

/// Request to a multimodal vision provider.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub model: String,
    /// Optional system role content, sent as its own message.
    pub system_prompt: Option<String>,
    pub user_prompt: String,
    /// Canonical image reference: a `data:` URL or a remote URL.
    pub image_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Trait for multimodal inference backends.
///
/// The pipelines only ever talk to this trait, so the remote model can be
/// swapped or mocked without touching any pipeline logic.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider name (e.g. "groq").
    fn name(&self) -> &str;

    /// Send one chat completion with an image and return the reply text.
    async fn complete(&self, request: &VisionRequest) -> Result<String, SightError>;
}

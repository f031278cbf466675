use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sightgate_core::{SightError, VisionProvider, VisionRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_IMAGE_MODEL: &str = "llama-3.2-90b-vision-preview";
pub const DEFAULT_VIDEO_MODEL: &str = "llama-3.2-11b-vision-preview";

/// Groq multimodal chat-completions provider.
///
/// One blocking-style call per request: no retries, no caching, and no
/// timeout beyond the HTTP client default.
pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn inference_error(&self, message: String) -> SightError {
        SightError::Inference {
            provider: "groq".into(),
            message,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Message<'a> {
    Text { role: &'a str, content: &'a str },
    Parts { role: &'a str, content: Vec<ContentPart<'a>> },
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[async_trait]
impl VisionProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: &VisionRequest) -> Result<String, SightError> {
        let mut messages = Vec::new();
        if let Some(system) = &request.system_prompt {
            messages.push(Message::Text {
                role: "system",
                content: system,
            });
        }
        messages.push(Message::Parts {
            role: "user",
            content: vec![
                ContentPart::Text {
                    text: &request.user_prompt,
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: &request.image_url,
                    },
                },
            ],
        });

        let body = ChatRequest {
            model: &request.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(model = %request.model, "sending vision request to Groq");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.inference_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.inference_error(format!("{status}: {error_body}")));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.inference_error(format!("unparseable response: {e}")))?;

        Ok(chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }
}

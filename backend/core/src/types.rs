use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Canonical reference to an image, in the two forms the vision API accepts.
///
/// Exactly one variant is populated; an empty inline payload is rejected by
/// the normalizer before a reference is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    /// Inline image bytes together with their MIME type.
    Base64 { payload: Vec<u8>, mime_type: String },
    /// A remote image the provider fetches itself.
    Url(String),
}

impl ImageReference {
    /// Render the form embedded in a chat-completion `image_url` part:
    /// a `data:` URL for inline bytes, or the remote URL verbatim.
    pub fn as_content_url(&self) -> String {
        match self {
            Self::Base64 { payload, mime_type } => {
                format!("data:{};base64,{}", mime_type, STANDARD.encode(payload))
            }
            Self::Url(url) => url.clone(),
        }
    }
}

/// Structured result extracted from a model's free-text reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractedResult {
    /// A yes/no classification.
    Decision { yes: bool },
    /// A validated 12-digit numeric identifier.
    NumericId { digits: String },
    /// A short decoded code value, returned verbatim.
    CodeValue { text: String },
    /// The reply did not contain a valid answer. This is a sentinel, not an
    /// error: upstream failures use `SightError` instead.
    Unrecognized,
}

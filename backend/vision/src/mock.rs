//! Canned-response provider for tests and local development.

use std::sync::Mutex;

use async_trait::async_trait;

use sightgate_core::{SightError, VisionProvider, VisionRequest};

/// Returns a fixed reply and records every request it receives.
pub struct MockProvider {
    reply: Result<String, String>,
    requests: Mutex<Vec<VisionRequest>>,
}

impl MockProvider {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A provider whose every call fails with an inference error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<VisionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &VisionRequest) -> Result<String, SightError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(SightError::Inference {
                provider: "mock".into(),
                message: message.clone(),
            }),
        }
    }
}

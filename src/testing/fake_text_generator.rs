use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::{GenerationRequest, TextGenerator};

#[derive(Debug, Clone)]
enum Reply {
    Fixed(String),
    Echo,
}

/// Records every request; replies with fixed text or echoes the prompt.
#[derive(Debug, Clone)]
pub struct FakeTextGenerator {
    reply: Reply,
    denied: Option<String>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl FakeTextGenerator {
    pub fn replying(text: impl Into<String>) -> Self {
        Self { reply: Reply::Fixed(text.into()), denied: None, requests: Arc::default() }
    }

    /// Replies with `generated: <prompt>`.
    pub fn echoing() -> Self {
        Self { reply: Reply::Echo, denied: None, requests: Arc::default() }
    }

    /// Refuse prompts containing `needle` with a non-retryable error.
    pub fn denying(mut self, needle: impl Into<String>) -> Self {
        self.denied = Some(needle.into());
        self
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl TextGenerator for FakeTextGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(needle) = &self.denied
            && request.prompt.contains(needle.as_str())
        {
            return Err(AppError::GenerationDenied {
                message: "content policy refusal".to_string(),
                status: Some(400),
            });
        }

        Ok(match &self.reply {
            Reply::Fixed(text) => text.clone(),
            Reply::Echo => format!("generated: {}", request.prompt),
        })
    }
}

//! Text generation client implementation using reqwest.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, GeneratorProtocol, GeneratorSettings};
use crate::ports::{GenerationRequest, TextGenerator};

const X_API_KEY: &str = "x-api-key";
const ANTHROPIC_VERSION: &str = "anthropic-version";
const HUMAN_PREFIX: &str = "Human: ";
const DEFAULT_STATUS_MESSAGE: &str = "Text generation request failed";

/// HTTP transport for a messages-style text generation API.
///
/// This client performs a single request per call. Retry behavior is implemented
/// by a dedicated retry wrapper adapter.
#[derive(Clone)]
pub struct HttpTextGenerator {
    api_url: Url,
    api_key: Option<String>,
    protocol: GeneratorProtocol,
    model: String,
    version: String,
    max_tokens: u32,
    client: Client,
}

impl std::fmt::Debug for HttpTextGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTextGenerator")
            .field("api_url", &self.api_url)
            .field("protocol", &self.protocol)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpTextGenerator {
    pub fn new(settings: &GeneratorSettings) -> Result<Self, AppError> {
        let api_url = settings.api_url.clone().ok_or_else(|| {
            AppError::config_error(
                "Text generation requires generator.api_url or GENERATOR_API_URL",
            )
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_url,
            api_key: settings.api_key.clone(),
            protocol: settings.protocol,
            model: settings.model.clone(),
            version: settings.version().to_string(),
            max_tokens: settings.max_tokens,
            client,
        })
    }

    fn build_body(&self, prompt: &str) -> ApiRequest<'_> {
        let (model, anthropic_version) = match self.protocol {
            GeneratorProtocol::Messages => (Some(self.model.as_str()), None),
            GeneratorProtocol::Bedrock => (None, Some(self.version.as_str())),
        };
        let content = format!("{}{}", HUMAN_PREFIX, prompt);
        ApiRequest {
            model,
            anthropic_version,
            max_tokens: self.max_tokens,
            messages: vec![Message { role: "user", content }],
        }
    }

    fn send_request(&self, body: &ApiRequest<'_>) -> Result<String, AppError> {
        let mut request = self
            .client
            .post(self.api_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(body);

        request = match (self.protocol, &self.api_key) {
            (GeneratorProtocol::Messages, Some(key)) => {
                request.header(ANTHROPIC_VERSION, &self.version).header(X_API_KEY, key)
            }
            (GeneratorProtocol::Messages, None) => request.header(ANTHROPIC_VERSION, &self.version),
            (GeneratorProtocol::Bedrock, Some(key)) => request.bearer_auth(key),
            (GeneratorProtocol::Bedrock, None) => request,
        };

        let response = request.send().map_err(|e| AppError::Generation {
            message: format!("HTTP request failed: {}", e),
            status: None,
            retry_after_ms: None,
        })?;

        let status = response.status();
        let retry_after_ms = response.headers().get(RETRY_AFTER).and_then(parse_retry_after_ms);
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            let api_response: ApiResponse =
                serde_json::from_str(&body_text).map_err(|e| AppError::Generation {
                    message: format!("Failed to parse response: {}", e),
                    status: Some(status.as_u16()),
                    retry_after_ms: None,
                })?;

            let text: String =
                api_response.content.iter().filter_map(|chunk| chunk.text.as_deref()).collect();
            if text.trim().is_empty() {
                return Err(AppError::Generation {
                    message: "Response contained no text".into(),
                    status: Some(status.as_u16()),
                    retry_after_ms: None,
                });
            }
            return Ok(text);
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status == StatusCode::TOO_MANY_REQUESTS {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        Err(classify_failure(status.as_u16(), message, retry_after_ms))
    }
}

impl TextGenerator for HttpTextGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, AppError> {
        self.send_request(&self.build_body(&request.prompt))
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anthropic_version: Option<&'a str>,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ContentChunk>,
}

#[derive(Debug, Deserialize)]
struct ContentChunk {
    #[serde(default)]
    text: Option<String>,
}

/// Timeouts, rate limits and server errors are transient; other statuses are refusals.
fn classify_failure(status: u16, message: String, retry_after_ms: Option<u64>) -> AppError {
    if status == 408 || status == 429 || status >= 500 {
        AppError::Generation { message, status: Some(status), retry_after_ms }
    } else {
        AppError::GenerationDenied { message, status: Some(status) }
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

fn parse_retry_after_ms(value: &HeaderValue) -> Option<u64> {
    let raw = value.to_str().ok()?.trim();
    let seconds = raw.parse::<u64>().ok()?;
    Some(seconds.saturating_mul(1000))
}

//! Insight client for the remote market-insight service.
//!
//! Sends one prompt per call to a Messages-style endpoint with the web search
//! tool enabled, then turns the reply into JSON:
//!
//! 1. Keep only `text` content blocks and concatenate them
//! 2. Strip code-fence markup
//! 3. Parse what remains as JSON
//!
//! # Usage
//!
//! ```rust,no_run
//! use pulse_core::client::{ClientConfig, InsightClient, InsightSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = InsightClient::new(ClientConfig::default())?;
//!     if let Ok(value) = client.fetch_insight("Return {\"summary\": \"hi\"}").await {
//!         println!("{value}");
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::Result;
use crate::prompt;

/// Default Messages endpoint
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Default model
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default completion budget per request
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const API_VERSION: &str = "2023-06-01";
const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";

/// Why an insight request produced no result.
///
/// The orchestrator only distinguishes success from failure; the variants are
/// kept for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsightError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("network error: {0}")]
    Network(String),

    #[error("service returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("response missing required field `{0}`")]
    Validation(&'static str),
}

/// Source of insight payloads.
///
/// Implementations must not panic or raise past this boundary: every failure is
/// returned as an `InsightError`.
#[async_trait]
pub trait InsightSource: Send + Sync {
    /// Send one prompt and return the parsed JSON reply.
    async fn fetch_insight(&self, prompt: &str) -> std::result::Result<Value, InsightError>;
}

/// Connection settings for the insight service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Messages endpoint URL
    pub url: String,
    /// API key sent as `x-api-key`
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// Completion budget per request
    pub max_tokens: u32,
    /// Transport-level timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// HTTP client for the insight service
#[derive(Clone)]
pub struct InsightClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl InsightClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Build the request body for a prompt.
    fn build_request<'a>(&'a self, prompt: &'a str) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: prompt::system_instruction(Local::now().date_naive()),
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            tools: vec![Tool {
                kind: WEB_SEARCH_TOOL_TYPE,
                name: "web_search",
            }],
        }
    }

    async fn send(&self, prompt: &str) -> std::result::Result<Value, InsightError> {
        if prompt.trim().is_empty() {
            return Err(InsightError::EmptyPrompt);
        }

        debug!(url = %self.config.url, model = %self.config.model, "Insight request");

        let mut req = self
            .client
            .post(&self.config.url)
            .header("anthropic-version", API_VERSION)
            .json(&self.build_request(prompt));

        if let Some(ref key) = self.config.api_key {
            req = req.header("x-api-key", key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(InsightError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        let parsed: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| InsightError::Parse(e.to_string()))?;

        parse_insight_text(&extract_text(&parsed))
    }
}

#[async_trait]
impl InsightSource for InsightClient {
    async fn fetch_insight(&self, prompt: &str) -> std::result::Result<Value, InsightError> {
        match self.send(prompt).await {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(error = %e, "Insight request failed");
                Err(e)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Processing
// ─────────────────────────────────────────────────────────────────────────────

/// Concatenate the text blocks of a response, in order.
pub fn extract_text(response: &MessagesResponse) -> String {
    response
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
        .collect()
}

/// Remove code-fence markers and surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse the concatenated reply text as JSON.
///
/// Falls back to the outermost `{ … }` span when the service wraps the object
/// in prose.
pub fn parse_insight_text(text: &str) -> std::result::Result<Value, InsightError> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Err(InsightError::Parse("empty response text".to_string()));
    }

    match serde_json::from_str(&cleaned) {
        Ok(value) => Ok(value),
        Err(first) => {
            let span = cleaned
                .find('{')
                .zip(cleaned.rfind('}'))
                .filter(|(start, end)| start < end)
                .map(|(start, end)| &cleaned[start..=end]);

            match span {
                Some(object) => {
                    serde_json::from_str(object).map_err(|e| InsightError::Parse(e.to_string()))
                }
                None => Err(InsightError::Parse(first.to_string())),
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request/Response Types
// ─────────────────────────────────────────────────────────────────────────────

/// Messages request body
#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<Message<'a>>,
    pub tools: Vec<Tool>,
}

/// One conversation turn
#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Server tool declaration
#[derive(Debug, Serialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
}

/// Messages response body (only the parts we read)
#[derive(Debug, Default, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// Content block in a response
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

//! Test doubles for the insight service.
//!
//! - `ScriptedSource`: in-process `InsightSource` with canned replies per prompt
//! - `MockService`: local HTTP server speaking the Messages wire format

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::client::{InsightError, InsightSource};

// ─────────────────────────────────────────────────────────────────────────────
// Scripted in-process source
// ─────────────────────────────────────────────────────────────────────────────

/// Prompt fragment that identifies the briefing prompt.
pub const BRIEFING_NEEDLE: &str = "briefing on current";

/// Prompt fragment that identifies a region prompt.
pub fn region_needle(region_name: &str) -> String {
    format!("market in {region_name}")
}

/// A recorded call.
#[derive(Debug, Clone)]
pub struct Call {
    pub prompt: String,
    pub started_at: Instant,
    pub finished_at: Instant,
}

type Reply = Result<Value, InsightError>;

/// `InsightSource` answering from a script keyed by prompt fragments.
///
/// Unscripted prompts fail with a network error.
#[derive(Default)]
pub struct ScriptedSource {
    rules: Mutex<Vec<(String, Reply)>>,
    calls: Mutex<Vec<Call>>,
    latency: Duration,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time each call takes.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Set (or replace) the reply for prompts containing `needle`.
    pub async fn on(&self, needle: impl Into<String>, reply: Reply) {
        let needle = needle.into();
        let mut rules = self.rules.lock().await;
        rules.retain(|(n, _)| n != &needle);
        rules.push((needle, reply));
    }

    pub async fn on_briefing(&self, reply: Reply) {
        self.on(BRIEFING_NEEDLE, reply).await;
    }

    pub async fn on_region(&self, region_name: &str, reply: Reply) {
        self.on(region_needle(region_name), reply).await;
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    /// Prompts in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.calls.lock().await.iter().map(|c| c.prompt.clone()).collect()
    }
}

#[async_trait]
impl InsightSource for ScriptedSource {
    async fn fetch_insight(&self, prompt: &str) -> Result<Value, InsightError> {
        let started_at = Instant::now();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let reply = self
            .rules
            .lock()
            .await
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Err(InsightError::Network("unscripted prompt".to_string())));

        self.calls.lock().await.push(Call {
            prompt: prompt.to_string(),
            started_at,
            finished_at: Instant::now(),
        });
        reply
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Local HTTP service
// ─────────────────────────────────────────────────────────────────────────────

/// Canned HTTP reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 200 with a single text content block.
    Text(String),
    /// 200 with an arbitrary body.
    Body(Value),
    /// Error status with a plain-text body.
    Status(u16),
}

/// A request as seen by the mock service.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub api_key: Option<String>,
    pub api_version: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct MockState {
    rules: Vec<(String, MockReply)>,
    default: Option<MockReply>,
    requests: Vec<RecordedRequest>,
}

/// Local server impersonating the insight service.
pub struct MockService {
    url: String,
    state: Arc<Mutex<MockState>>,
}

impl MockService {
    /// Bind to an ephemeral port and start serving.
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockState::default()));
        let app = Router::new()
            .route("/v1/messages", post(handle_messages))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock service");
        let addr = listener.local_addr().expect("mock service address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url: format!("http://{}/v1/messages", addr),
            state,
        }
    }

    /// URL of a port with nothing listening.
    pub async fn unreachable_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind probe");
        let addr = listener.local_addr().expect("probe address");
        drop(listener);
        format!("http://{}/v1/messages", addr)
    }

    pub fn url(&self) -> String {
        self.url.clone()
    }

    /// Reply used when no rule matches.
    pub async fn reply(&self, reply: MockReply) {
        self.state.lock().await.default = Some(reply);
    }

    pub async fn reply_text(&self, text: &str) {
        self.reply(MockReply::Text(text.to_string())).await;
    }

    pub async fn reply_status(&self, status: u16) {
        self.reply(MockReply::Status(status)).await;
    }

    /// Reply for prompts containing `needle`, replacing any earlier rule.
    pub async fn when_prompt_contains(&self, needle: impl Into<String>, reply: MockReply) {
        let needle = needle.into();
        let mut state = self.state.lock().await;
        state.rules.retain(|(n, _)| n != &needle);
        state.rules.push((needle, reply));
    }

    pub async fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().await.requests.last().cloned()
    }

    pub async fn request_count(&self) -> usize {
        self.state.lock().await.requests.len()
    }
}

async fn handle_messages(
    State(state): State<Arc<Mutex<MockState>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };

    let mut state = state.lock().await;
    let prompt = body["messages"][0]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    state.requests.push(RecordedRequest {
        api_key: header("x-api-key"),
        api_version: header("anthropic-version"),
        body,
    });

    let reply = state
        .rules
        .iter()
        .find(|(needle, _)| prompt.contains(needle.as_str()))
        .map(|(_, reply)| reply.clone())
        .or_else(|| state.default.clone())
        .unwrap_or(MockReply::Status(500));

    match reply {
        MockReply::Text(text) => Json(json!({
            "id": "msg_test",
            "type": "message",
            "role": "assistant",
            "content": [
                {"type": "server_tool_use", "id": "srvtoolu_1", "name": "web_search", "input": {"query": "market"}},
                {"type": "web_search_tool_result", "tool_use_id": "srvtoolu_1", "content": []},
                {"type": "text", "text": text}
            ],
            "stop_reason": "end_turn"
        }))
        .into_response(),
        MockReply::Body(value) => Json(value).into_response(),
        MockReply::Status(code) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            "mock failure",
        )
            .into_response(),
    }
}

use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::generator::error::GenerationError;

// ============================================================================
// TextGenerator trait: the report-writing collaborator
// ============================================================================

pub const DEFAULT_MODEL: &str = "o4-mini-2025-04-16";
pub const DEFAULT_MAX_TOKENS: u32 = 32_000;

/// Per-request knobs forwarded to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub model: String,
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Anything that turns a prompt into text. The grounding pipeline only needs
/// this seam; what sits behind it is opaque.
pub trait TextGenerator {
    /// Short backend name used in logs, traces and errors.
    fn name(&self) -> &str;

    fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String, GenerationError>;
}

/// Backend selection for the CLI and config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// OpenAI-compatible chat completions API
    #[default]
    Chat,
    /// Local Ollama server
    Ollama,
    /// Canned response, no network
    Mock,
}

// ============================================================================
// Chat completions backend
// ============================================================================

pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

pub struct ChatCompletionsGenerator {
    pub endpoint: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_completion_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsGenerator {
    pub fn new(
        endpoint: &str,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            endpoint: endpoint.to_string(),
            api_key: api_key.map(str::to_string),
            client: build_client(timeout, "chat")?,
        })
    }

    /// Text of the first choice of a chat completions response body.
    pub fn parse_response(body: &str) -> Result<String, GenerationError> {
        let parsed: ChatResponse =
            serde_json::from_str(body).map_err(|source| GenerationError::Decode {
                backend: "chat".to_string(),
                source,
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| GenerationError::EmptyCompletion("chat".to_string()))
    }
}

impl TextGenerator for ChatCompletionsGenerator {
    fn name(&self) -> &str {
        "chat"
    }

    fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &options.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_completion_tokens: options.max_tokens,
        };

        info!(endpoint = %self.endpoint, model = %options.model, "requesting chat completion");

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let body = send(builder, self.name())?;
        Self::parse_response(&body)
    }
}

// ============================================================================
// Ollama backend
// ============================================================================

pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434/api/generate";

pub struct OllamaGenerator {
    pub endpoint: String,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    num_predict: u32,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaGenerator {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, GenerationError> {
        Ok(Self {
            endpoint: endpoint.to_string(),
            client: build_client(timeout, "ollama")?,
        })
    }

    pub fn parse_response(body: &str) -> Result<String, GenerationError> {
        let parsed: OllamaResponse =
            serde_json::from_str(body).map_err(|source| GenerationError::Decode {
                backend: "ollama".to_string(),
                source,
            })?;

        if parsed.response.trim().is_empty() {
            return Err(GenerationError::EmptyCompletion("ollama".to_string()));
        }
        Ok(parsed.response)
    }
}

impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &str {
        "ollama"
    }

    fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String, GenerationError> {
        let request = OllamaRequest {
            model: &options.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                num_predict: options.max_tokens,
            },
        };

        info!(endpoint = %self.endpoint, model = %options.model, "requesting ollama generation");

        let body = send(self.client.post(&self.endpoint).json(&request), self.name())?;
        Self::parse_response(&body)
    }
}

// ============================================================================
// Mock backend (for testing without a service)
// ============================================================================

const MOCK_REPORT: &str = "\
**Title**
Reproduction recorded from the exploration graph

**Observed Behavior**
See the bug description.

**Expected Behavior**
The interaction completes without error.

**Steps to Reproduce**
1. Open the freshly installed application and perform the first recorded interaction. <T1>
";

pub struct MockGenerator {
    pub response: String,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self {
            response: MOCK_REPORT.to_string(),
        }
    }
}

impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<String, GenerationError> {
        debug!(prompt_chars = prompt.len(), "mock generator returning canned response");
        Ok(self.response.clone())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn build_client(
    timeout: Duration,
    backend: &str,
) -> Result<reqwest::blocking::Client, GenerationError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| GenerationError::Transport {
            backend: backend.to_string(),
            source,
        })
}

/// Send a prepared request and return the body of a successful response.
fn send(request: reqwest::blocking::RequestBuilder, backend: &str) -> Result<String, GenerationError> {
    let transport = |source| GenerationError::Transport {
        backend: backend.to_string(),
        source,
    };

    let response = request.send().map_err(transport)?;
    let status = response.status();
    let body = response.text().map_err(transport)?;

    if !status.is_success() {
        return Err(GenerationError::Status {
            backend: backend.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    debug!(backend, bytes = body.len(), "received completion body");
    Ok(body)
}

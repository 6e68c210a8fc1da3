//! Model invoker: HTTP client for the hosted Gemini `generateContent`
//! endpoint, plus the trait seam that lets the rest of the pipeline run
//! against a mock.
//!
//! The invoker is treated as an opaque oracle: text in, text out, plus an
//! optional list of grounding citations. It performs no retries and sets
//! no timeout of its own beyond the transport's; a failed call is terminal
//! for the request and the caller resubmits manually.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EngineConfig;

/// Raw result of one model invocation.
#[derive(Debug, Clone, Default)]
pub struct ModelResponse {
    /// Raw text body. May be empty.
    pub text: String,
    /// Grounding citation display strings (title, else URI). Unordered,
    /// may contain duplicates across retrieval chunks.
    pub citations: Vec<String>,
}

/// Model invocation failures. Propagated as `AnalysisError::Upstream`
/// without further distinction.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("cannot reach model endpoint at {0}")]
    Connection(String),

    #[error("model API returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Transport(String),

    #[error("failed to decode model response: {0}")]
    ResponseDecode(String),

    #[error("no API key configured: set {0}")]
    MissingApiKey(&'static str),
}

/// Hosted LLM abstraction (allows mocking).
pub trait ModelClient {
    /// Send one composed prompt. `grounded_search` asks the service to
    /// consult live web sources and report what it cited.
    fn generate(&self, prompt: &str, grounded_search: bool)
        -> Result<ModelResponse, ModelError>;
}

// ═══════════════════════════════════════════════════════════
// Gemini wire types
// ═══════════════════════════════════════════════════════════

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Tool {
    #[serde(rename = "google_search")]
    google_search: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Deserialize)]
struct WebSource {
    title: Option<String>,
    uri: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Display strings for the grounding chunks: title when present,
    /// else URI. Chunks with neither are skipped. Duplicates are kept;
    /// deduplication is the reconciler's business.
    fn citations(&self) -> Vec<String> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter_map(|web| web.title.clone().or_else(|| web.uri.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ═══════════════════════════════════════════════════════════
// Client
// ═══════════════════════════════════════════════════════════

/// Blocking HTTP client for the Gemini API.
#[derive(Debug)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    /// Build a client from engine configuration. Fails when no API key is
    /// available.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ModelError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(ModelError::MissingApiKey(crate::config::API_KEY_ENV))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            client,
            timeout_secs: config.request_timeout_secs,
        })
    }
}

impl ModelClient for GeminiClient {
    fn generate(
        &self,
        prompt: &str,
        grounded_search: bool,
    ) -> Result<ModelResponse, ModelError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let tools = if grounded_search {
            vec![Tool {
                google_search: serde_json::Value::Object(Default::default()),
            }]
        } else {
            Vec::new()
        };

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            tools,
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ModelError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    ModelError::Timeout(self.timeout_secs)
                } else {
                    ModelError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| ModelError::ResponseDecode(e.to_string()))?;

        Ok(ModelResponse {
            text: parsed.text(),
            citations: parsed.citations(),
        })
    }
}

// ═══════════════════════════════════════════════════════════
// Mock client
// ═══════════════════════════════════════════════════════════

/// Mock model client for tests. Returns a configurable response or error.
pub struct MockModelClient {
    response: Result<ModelResponse, String>,
}

impl MockModelClient {
    pub fn with_text(text: &str) -> Self {
        Self {
            response: Ok(ModelResponse {
                text: text.to_string(),
                citations: Vec::new(),
            }),
        }
    }

    pub fn with_citations(mut self, citations: Vec<String>) -> Self {
        if let Ok(response) = &mut self.response {
            response.citations = citations;
        }
        self
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
        }
    }
}

impl ModelClient for MockModelClient {
    fn generate(
        &self,
        _prompt: &str,
        _grounded_search: bool,
    ) -> Result<ModelResponse, ModelError> {
        match &self.response {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(ModelError::Transport(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_client_returns_configured_text() {
        let client = MockModelClient::with_text("{\"name\":\"X\"}");
        let response = client.generate("prompt", true).unwrap();
        assert_eq!(response.text, "{\"name\":\"X\"}");
        assert!(response.citations.is_empty());
    }

    #[test]
    fn mock_client_carries_citations() {
        let client = MockModelClient::with_text("{}")
            .with_citations(vec!["coindesk.com".into(), "Official Docs".into()]);
        let response = client.generate("prompt", true).unwrap();
        assert_eq!(response.citations.len(), 2);
    }

    #[test]
    fn mock_client_failure_maps_to_transport_error() {
        let client = MockModelClient::failing("quota exceeded");
        let err = client.generate("prompt", false).unwrap_err();
        assert!(matches!(err, ModelError::Transport(_)));
    }

    #[test]
    fn from_config_requires_api_key() {
        let config = EngineConfig {
            api_key: None,
            ..EngineConfig::default()
        };
        let err = GeminiClient::from_config(&config).unwrap_err();
        assert!(matches!(err, ModelError::MissingApiKey(_)));
    }

    #[test]
    fn from_config_trims_trailing_slash() {
        let config = EngineConfig {
            api_key: Some("test-key".into()),
            api_base_url: "https://generativelanguage.googleapis.com/".into(),
            ..EngineConfig::default()
        };
        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(
            client.base_url,
            "https://generativelanguage.googleapis.com"
        );
    }

    // ── Response decoding ───────────────────────────────

    #[test]
    fn response_text_joins_candidate_parts() {
        let raw = r#"{
            "candidates": [{
                "content": { "parts": [ {"text": "{\"a\""}, {"text": ":1}"} ] }
            }]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text(), "{\"a\":1}");
    }

    #[test]
    fn response_without_candidates_yields_empty_text() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.text(), "");
        assert!(parsed.citations().is_empty());
    }

    #[test]
    fn citations_prefer_title_over_uri() {
        let raw = r#"{
            "candidates": [{
                "content": { "parts": [{"text": "ok"}] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "title": "CoinDesk", "uri": "https://coindesk.com/a" } },
                        { "web": { "uri": "https://defillama.com/p" } },
                        { "web": {} },
                        {}
                    ]
                }
            }]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let citations = parsed.citations();
        assert_eq!(
            citations,
            vec!["CoinDesk".to_string(), "https://defillama.com/p".to_string()]
        );
    }
}

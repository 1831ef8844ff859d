//! Gemini backend for health tips
//!
//! Calls the generative-language REST API with a JSON response schema of
//! `{summary: string, tips: [string]}`. Blocking; run it off the UI thread.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{Result, TipsError};
use crate::tips::TipsProvider;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the Gemini API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read settings from the process environment
    ///
    /// `GEMINI_API_KEY` (or `API_KEY`) is required; `GEMINI_MODEL` and
    /// `GEMINI_BASE_URL` are optional.
    ///
    /// # Errors
    ///
    /// * `TipsError::MissingKey` - No non-empty API key variable is set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY")
            .or_else(|| non_empty("API_KEY"))
            .ok_or(TipsError::MissingKey)?;

        let mut config = Self::new(api_key);
        if let Some(model) = non_empty("GEMINI_MODEL") {
            config.model = model;
        }
        if let Some(base_url) = non_empty("GEMINI_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        Ok(config)
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn tips_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A 1-2 sentence summary of the user's BMI status.",
            },
            "tips": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "3 actionable health tips.",
            },
        },
        "required": ["summary", "tips"],
    })
}

fn build_request(prompt: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some(prompt.to_string()),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: tips_schema(),
        },
    }
}

/// Concatenated text of the first candidate
fn response_text(body: GenerateResponse) -> Result<String> {
    let text: String = body
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(TipsError::EmptyResponse);
    }
    Ok(text)
}

fn api_error(status: u16, body: &str) -> TipsError {
    match serde_json::from_str::<ApiError>(body) {
        Ok(error) => TipsError::api(status, error.error.message),
        Err(_) => TipsError::api(status, body),
    }
}

// ============================================================================
// Client
// ============================================================================

/// Blocking Gemini client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::blocking::Client,
}

impl GeminiClient {
    /// Build a client for the given settings
    ///
    /// # Errors
    ///
    /// * `TipsError::MissingKey` - The API key is empty
    /// * `TipsError::Network` - The HTTP client could not be built
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(TipsError::MissingKey);
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TipsError::Network(e.to_string()))?;

        Ok(Self { config, http })
    }

    /// Build a client from the environment, see [`GeminiConfig::from_env`]
    ///
    /// # Errors
    ///
    /// Same as [`GeminiConfig::from_env`] and [`GeminiClient::new`].
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

impl TipsProvider for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.config.model, "requesting health tips");

        let response = self
            .http
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&build_request(prompt))
            .send()
            .map_err(|e| TipsError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| TipsError::Parse(e.to_string()))?;

        response_text(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn config_prefers_gemini_key() {
        let config =
            GeminiConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "g"), ("API_KEY", "a")])).unwrap();
        assert_eq!(config.api_key, "g");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn config_falls_back_to_generic_key_and_overrides() {
        let config = GeminiConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "  "),
            ("API_KEY", "a"),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("GEMINI_BASE_URL", "http://localhost:8080/v1beta/"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "a");
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn config_requires_a_key() {
        assert_eq!(
            GeminiConfig::from_lookup(lookup(&[])),
            Err(TipsError::MissingKey)
        );
        assert!(matches!(
            GeminiClient::new(GeminiConfig::new("")),
            Err(TipsError::MissingKey)
        ));
    }

    #[test]
    fn request_asks_for_json_with_schema() {
        let body = serde_json::to_value(build_request("hello")).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"],
            json!(["summary", "tips"])
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["properties"]["tips"]["type"],
            "ARRAY"
        );
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let body: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "{\"summary\":" }, { "text": "\"s\"}" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(response_text(body).unwrap(), "{\"summary\":\"s\"}");
    }

    #[test]
    fn response_without_text_is_empty() {
        for value in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
            json!({ "candidates": [{ "content": { "parts": [{}] } }] }),
        ] {
            let body: GenerateResponse = serde_json::from_value(value).unwrap();
            assert_eq!(response_text(body), Err(TipsError::EmptyResponse));
        }
    }

    #[test]
    fn api_errors_use_message_when_present() {
        let err = api_error(
            400,
            r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#,
        );
        assert_eq!(err, TipsError::api(400, "API key not valid"));
        assert_eq!(api_error(502, "Bad Gateway"), TipsError::api(502, "Bad Gateway"));
    }
}

//! Core `CallAnalyst` trait and `ApiAnalyst` implementation.
//!
//! `ApiAnalyst` calls any OpenAI-compatible `/chat/completions` endpoint —
//! Groq, OpenAI, Together.ai, vLLM, etc.  All connection details come from
//! [`crate::config::AppConfig`]; nothing is hardcoded.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{ApiConfig, ScoringConfig};
use crate::llm::prompt::PromptBuilder;

// ---------------------------------------------------------------------------
// AnalystError
// ---------------------------------------------------------------------------

/// Errors that can occur while requesting an evaluation from the LLM.
#[derive(Debug, Error)]
pub enum AnalystError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("scoring request timed out")]
    Timeout,

    /// The provider answered with a non-success status.
    #[error("scoring API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The HTTP response envelope could not be parsed as expected JSON.
    #[error("failed to parse scoring response: {0}")]
    Parse(String),

    /// The LLM returned a completion with no usable text content.
    #[error("scoring service returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for AnalystError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AnalystError::Timeout
        } else {
            AnalystError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// CallAnalyst trait
// ---------------------------------------------------------------------------

/// Async trait for the external scoring collaborator.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn CallAnalyst>`).
///
/// Returns the **raw** response text; constraining it into a valid score
/// map is [`crate::scoring::sanitize_response`]'s job, not the client's.
#[async_trait]
pub trait CallAnalyst: Send + Sync {
    async fn analyze(&self, transcript: &str) -> Result<String, AnalystError>;
}

// Compile-time assertion: Box<dyn CallAnalyst> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn CallAnalyst>) {}
};

// ---------------------------------------------------------------------------
// ApiAnalyst
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/chat/completions` endpoint for scoring.
///
/// The request asks for `response_format: json_object` so providers that
/// support it constrain the completion to JSON; the sanitizer still treats
/// the reply as untrusted either way.
pub struct ApiAnalyst {
    client: reqwest::Client,
    api: ApiConfig,
    scoring: ScoringConfig,
    api_key: String,
    prompt_builder: PromptBuilder,
}

impl ApiAnalyst {
    /// Build an `ApiAnalyst` from application config and a resolved credential.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `api.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(api: &ApiConfig, scoring: &ScoringConfig, api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(api.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api: api.clone(),
            scoring: scoring.clone(),
            api_key,
            prompt_builder: PromptBuilder::new(),
        }
    }
}

#[async_trait]
impl CallAnalyst for ApiAnalyst {
    async fn analyze(&self, transcript: &str) -> Result<String, AnalystError> {
        let (system_msg, user_msg) = self.prompt_builder.build_chat(transcript);

        let url = format!("{}/chat/completions", self.api.base_url);

        let body = serde_json::json!({
            "model":       self.scoring.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg   }
            ],
            "temperature":     self.scoring.temperature,
            "max_tokens":      self.scoring.max_tokens,
            "response_format": { "type": "json_object" }
        });

        log::debug!(
            "scoring: POST {url} model={} transcript_chars={}",
            self.scoring.model,
            transcript.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalystError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AnalystError::Parse(e.to_string()))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(AnalystError::EmptyResponse)?
            .trim()
            .to_string();

        if content.is_empty() {
            return Err(AnalystError::EmptyResponse);
        }

        Ok(content)
    }
}

// ---------------------------------------------------------------------------
// MockAnalyst (test-only)
// ---------------------------------------------------------------------------

/// Test double that returns a canned response and counts invocations.
#[cfg(test)]
pub struct MockAnalyst {
    response: Result<String, String>,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockAnalyst {
    /// A mock that always succeeds with `response`.
    pub fn ok(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// A mock that always fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl CallAnalyst for MockAnalyst {
    async fn analyze(&self, _transcript: &str) -> Result<String, AnalystError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(msg) => Err(AnalystError::Request(msg.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn make_analyst() -> ApiAnalyst {
        let config = AppConfig::default();
        ApiAnalyst::from_config(&config.api, &config.scoring, "sk-test-1234".into())
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _analyst = make_analyst();
    }

    /// Verify that `ApiAnalyst` is object-safe (usable as `dyn CallAnalyst`).
    #[test]
    fn analyst_is_object_safe() {
        let analyst: Box<dyn CallAnalyst> = Box::new(make_analyst());
        let _ = &analyst;
    }

    #[tokio::test]
    async fn mock_analyst_counts_calls() {
        let mock = MockAnalyst::ok("{}");
        assert_eq!(mock.call_count(), 0);
        mock.analyze("transcript").await.unwrap();
        mock.analyze("transcript").await.unwrap();
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn failing_mock_returns_request_error() {
        let mock = MockAnalyst::failing("connection refused");
        let err = mock.analyze("transcript").await.unwrap_err();
        assert!(matches!(err, AnalystError::Request(_)));
    }
}

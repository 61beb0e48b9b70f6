//! Core `Transcriber` trait and `ApiTranscriber` implementation.
//!
//! [`Transcriber`] is the transcription collaborator interface used by the
//! pipeline.  It is object-safe and `Send + Sync` so it can be held behind
//! an `Arc<dyn Transcriber>`.
//!
//! [`ApiTranscriber`] posts the audio bytes as a multipart form to an
//! OpenAI-compatible `/audio/transcriptions` endpoint (Groq Whisper by
//! default).  The audio is never decoded locally — it travels as an opaque
//! byte blob with its filename and declared content type.
//!
//! [`MockTranscriber`] (available under `#[cfg(test)]`) returns a canned
//! transcript and counts invocations — useful for unit-testing the pipeline
//! without network access.

use async_trait::async_trait;
use reqwest::multipart;
use thiserror::Error;

use crate::audio::AudioUpload;
use crate::config::{ApiConfig, TranscriptionConfig};

// ---------------------------------------------------------------------------
// TranscriptionError
// ---------------------------------------------------------------------------

/// All errors that can arise from the transcription collaborator.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("transcription request timed out")]
    Timeout,

    /// The provider answered with a non-success status.
    #[error("transcription API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body could not be parsed as the expected JSON envelope.
    #[error("failed to parse transcription response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TranscriptionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranscriptionError::Timeout
        } else {
            TranscriptionError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Transcriber trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for speech-to-text collaborators.
///
/// A single blocking call per upload; no streaming.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe `upload` and return the text transcript.
    async fn transcribe(&self, upload: &AudioUpload) -> Result<String, TranscriptionError>;
}

// Compile-time assertion: Box<dyn Transcriber> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Transcriber>) {}
};

// ---------------------------------------------------------------------------
// ApiTranscriber
// ---------------------------------------------------------------------------

/// Production transcription client for OpenAI-compatible Whisper endpoints.
pub struct ApiTranscriber {
    client: reqwest::Client,
    api: ApiConfig,
    transcription: TranscriptionConfig,
    api_key: String,
}

impl ApiTranscriber {
    /// Build an `ApiTranscriber` from application config and a resolved
    /// credential.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `api.timeout_secs`; a default client is the last-resort fallback if
    /// the builder fails.
    pub fn from_config(
        api: &ApiConfig,
        transcription: &TranscriptionConfig,
        api_key: String,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(api.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api: api.clone(),
            transcription: transcription.clone(),
            api_key,
        }
    }
}

#[async_trait]
impl Transcriber for ApiTranscriber {
    async fn transcribe(&self, upload: &AudioUpload) -> Result<String, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.api.base_url);

        let mut file_part =
            multipart::Part::bytes(upload.bytes.clone()).file_name(upload.filename.clone());
        if let Some(mime) = upload.content_type.as_deref() {
            file_part = file_part
                .mime_str(mime)
                .map_err(|e| TranscriptionError::Request(format!("mime: {e}")))?;
        }

        let form = multipart::Form::new()
            .text("model", self.transcription.model.clone())
            .text("response_format", "json")
            .text("language", self.transcription.language.clone())
            .text("temperature", self.transcription.temperature.to_string())
            .part("file", file_part);

        log::debug!(
            "transcription: POST {url} model={} file={} ({} bytes)",
            self.transcription.model,
            upload.filename,
            upload.bytes.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranscriptionError::Parse(e.to_string()))?;

        // `text` may be absent for a silent recording; treat that as empty.
        Ok(json["text"].as_str().unwrap_or_default().trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// MockTranscriber (test-only)
// ---------------------------------------------------------------------------

/// Test double that returns a canned transcript and counts invocations.
#[cfg(test)]
pub struct MockTranscriber {
    response: Result<String, String>,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockTranscriber {
    /// A mock that always succeeds with `transcript`.
    pub fn ok(transcript: &str) -> Self {
        Self {
            response: Ok(transcript.to_string()),
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
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _upload: &AudioUpload) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(msg) => Err(TranscriptionError::Request(msg.clone())),
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

    fn make_upload() -> AudioUpload {
        AudioUpload::new(vec![0u8; 64], "call.mp3", Some("audio/mpeg"))
    }

    #[test]
    fn from_config_builds_without_panic() {
        let config = AppConfig::default();
        let _t = ApiTranscriber::from_config(&config.api, &config.transcription, "sk-x".into());
    }

    /// Verify that `ApiTranscriber` is object-safe (usable as `dyn Transcriber`).
    #[test]
    fn transcriber_is_object_safe() {
        let config = AppConfig::default();
        let t: Box<dyn Transcriber> =
            Box::new(ApiTranscriber::from_config(&config.api, &config.transcription, "k".into()));
        let _ = &t;
    }

    #[tokio::test]
    async fn mock_transcriber_counts_calls() {
        let mock = MockTranscriber::ok("hello");
        assert_eq!(mock.call_count(), 0);
        assert_eq!(mock.transcribe(&make_upload()).await.unwrap(), "hello");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn failing_mock_returns_request_error() {
        let mock = MockTranscriber::failing("boom");
        let err = mock.transcribe(&make_upload()).await.unwrap_err();
        assert!(matches!(err, TranscriptionError::Request(_)));
    }
}

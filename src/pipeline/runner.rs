//! Pipeline orchestrator — drives one upload through validate → transcribe →
//! score → sanitize.
//!
//! # Pipeline flow
//!
//! ```text
//! evaluate(upload)
//!   ├─ validate upload                 [Uploading]
//!   │    └─ Err → Failed (Validation), no collaborator called
//!   ├─ transcriber.transcribe(upload)  [Transcribing]
//!   │    └─ Err → Failed (Transcription)
//!   ├─ analyst.analyze(transcript)     [Scoring]
//!   │    └─ Err → Failed (Scoring)
//!   └─ sanitize_response(raw)          [Complete]
//!        └─ never fails — malformed replies degrade to zero scores
//! ```
//!
//! Each `evaluate` call is independent: no state survives between runs
//! beyond the read-only criteria registry.  Nothing is retried; no partial
//! result is returned on failure.

use std::sync::Arc;

use thiserror::Error;

use crate::audio::{AudioUpload, UploadError};
use crate::config::AppConfig;
use crate::llm::{AnalystError, ApiAnalyst, CallAnalyst};
use crate::scoring::{sanitize_response, AnalysisResult};
use crate::stt::{ApiTranscriber, Transcriber, TranscriptionError};

use super::state::{new_shared_state, PipelineState, SharedState};

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Everything that can stop an evaluation before a result is produced.
///
/// Malformed scoring responses are deliberately absent: the sanitizer
/// absorbs those and the run still completes.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The upload was rejected before any external call.
    #[error("{0}")]
    Validation(#[from] UploadError),

    /// The provider credential is missing — detected before any external call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The transcription collaborator failed.
    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),

    /// The scoring collaborator failed.
    #[error("Analysis failed: {0}")]
    Scoring(#[from] AnalystError),
}

// ---------------------------------------------------------------------------
// CallEvaluator
// ---------------------------------------------------------------------------

/// Drives the complete audio → transcript → scored-evaluation pipeline.
///
/// Holds its collaborators behind `Arc<dyn …>` so tests can substitute
/// mocks and callers can share clients across evaluations.
///
/// ```rust,no_run
/// use callscore::audio::AudioUpload;
/// use callscore::config::AppConfig;
/// use callscore::pipeline::CallEvaluator;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AppConfig::load()?;
/// let evaluator = CallEvaluator::from_config(&config)?;
///
/// let bytes = std::fs::read("call.mp3")?;
/// let upload = AudioUpload::new(bytes, "call.mp3", Some("audio/mpeg"));
/// let result = evaluator.evaluate(upload).await?;
/// println!("{}", result.overall_feedback);
/// # Ok(())
/// # }
/// ```
pub struct CallEvaluator {
    state: SharedState,
    transcriber: Arc<dyn Transcriber>,
    analyst: Arc<dyn CallAnalyst>,
}

impl std::fmt::Debug for CallEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallEvaluator").finish_non_exhaustive()
    }
}

impl CallEvaluator {
    /// Create an evaluator with explicit collaborators.
    pub fn new(transcriber: Arc<dyn Transcriber>, analyst: Arc<dyn CallAnalyst>) -> Self {
        Self {
            state: new_shared_state(),
            transcriber,
            analyst,
        }
    }

    /// Build the production evaluator from application config.
    ///
    /// Resolves the provider credential up front so a missing key surfaces
    /// as [`PipelineError::Configuration`] here, never as a transcription or
    /// scoring failure mid-pipeline.
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        let api_key = config
            .api
            .require_api_key()
            .map_err(PipelineError::Configuration)?;

        let transcriber = ApiTranscriber::from_config(
            &config.api,
            &config.transcription,
            api_key.clone(),
        );
        let analyst = ApiAnalyst::from_config(&config.api, &config.scoring, api_key);

        Ok(Self::new(Arc::new(transcriber), Arc::new(analyst)))
    }

    /// Handle to the observable run state (for progress display).
    pub fn state(&self) -> SharedState {
        Arc::clone(&self.state)
    }

    // -----------------------------------------------------------------------
    // Evaluation
    // -----------------------------------------------------------------------

    /// Run one upload through the full pipeline.
    pub async fn evaluate(&self, upload: AudioUpload) -> Result<AnalysisResult, PipelineError> {
        // ── 1. Validate ──────────────────────────────────────────────────
        self.set_pipeline(PipelineState::Uploading);

        if let Err(e) = upload.validate() {
            self.set_failed(e.to_string());
            return Err(e.into());
        }

        // ── 2. Transcribe (external) ─────────────────────────────────────
        self.set_pipeline(PipelineState::Transcribing);
        log::debug!("pipeline: transcribing {} ({} bytes)", upload.filename, upload.bytes.len());

        let transcript = match self.transcriber.transcribe(&upload).await {
            Ok(text) => text,
            Err(e) => {
                self.set_failed(format!("Transcription failed: {e}"));
                return Err(e.into());
            }
        };

        log::debug!("pipeline: transcript is {} chars", transcript.len());

        // ── 3. Score (external) ──────────────────────────────────────────
        self.set_pipeline(PipelineState::Scoring);

        let raw_response = match self.analyst.analyze(&transcript).await {
            Ok(text) => text,
            Err(e) => {
                self.set_failed(format!("Analysis failed: {e}"));
                return Err(e.into());
            }
        };

        // ── 4. Sanitize and assemble ─────────────────────────────────────
        let analysis = sanitize_response(&raw_response);
        let result = AnalysisResult::from_analysis(analysis, transcript);

        self.set_pipeline(PipelineState::Complete);
        log::info!("pipeline: evaluation complete");

        Ok(result)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn set_pipeline(&self, state: PipelineState) {
        let mut st = self.state.lock().unwrap();
        st.pipeline = state;
        if state == PipelineState::Uploading {
            st.error_message = None;
        }
    }

    fn set_failed(&self, message: String) {
        let mut st = self.state.lock().unwrap();
        st.pipeline = PipelineState::Failed;
        st.error_message = Some(message.clone());
        log::error!("pipeline failed: {message}");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

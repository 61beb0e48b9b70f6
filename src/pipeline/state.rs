//! Pipeline state machine and observable run state.
//!
//! [`PipelineState`] drives the orchestrator's state machine.  Callers that
//! want to show progress (the CLI, a web handler) read it via
//! [`SharedState`].
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<RunState>>` — cheap to
//! clone and safe to share across tasks.

use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// States of the call-evaluation pipeline.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──audio payload──▶ Uploading
///                         ──validated──▶ Transcribing
///                                        ──transcript──▶ Scoring
///                                                        ──sanitized──▶ Complete
/// any non-terminal state ──error──▶ Failed
/// ```
///
/// `Complete` and `Failed` are terminal; a new evaluation starts over from
/// `Idle` with fresh state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Waiting for an audio payload.
    Idle,

    /// A payload has arrived and is being validated.
    Uploading,

    /// The external transcription collaborator is running.
    Transcribing,

    /// The external scoring collaborator is running.
    Scoring,

    /// The evaluation finished and an `AnalysisResult` was produced.
    Complete,

    /// The evaluation stopped before producing a result.
    Failed,
}

impl PipelineState {
    /// Returns `true` while the pipeline is actively processing a payload.
    ///
    /// ```
    /// use callscore::pipeline::PipelineState;
    ///
    /// assert!(!PipelineState::Idle.is_busy());
    /// assert!(PipelineState::Uploading.is_busy());
    /// assert!(PipelineState::Transcribing.is_busy());
    /// assert!(PipelineState::Scoring.is_busy());
    /// assert!(!PipelineState::Complete.is_busy());
    /// assert!(!PipelineState::Failed.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            PipelineState::Uploading | PipelineState::Transcribing | PipelineState::Scoring
        )
    }

    /// A short human-readable label suitable for progress display.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineState::Idle => "Idle",
            PipelineState::Uploading => "Uploading",
            PipelineState::Transcribing => "Transcribing",
            PipelineState::Scoring => "Analyzing",
            PipelineState::Complete => "Done",
            PipelineState::Failed => "Failed",
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        PipelineState::Idle
    }
}

// ---------------------------------------------------------------------------
// RunState
// ---------------------------------------------------------------------------

/// Observable state of one evaluation run.
///
/// The orchestrator mutates it; progress observers read it.
#[derive(Debug, Default)]
pub struct RunState {
    /// Current phase of the pipeline.
    pub pipeline: PipelineState,

    /// Error message to display when `pipeline == PipelineState::Failed`.
    pub error_message: Option<String>,
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`RunState`].
///
/// Cheap to clone (`Arc` clone).  Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<RunState>>;

/// Construct a new [`SharedState`] wrapping a default [`RunState`].
pub fn new_shared_state() -> SharedState {
    Arc::new(Mutex::new(RunState::default()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- PipelineState::is_busy ---

    #[test]
    fn idle_is_not_busy() {
        assert!(!PipelineState::Idle.is_busy());
    }

    #[test]
    fn processing_states_are_busy() {
        assert!(PipelineState::Uploading.is_busy());
        assert!(PipelineState::Transcribing.is_busy());
        assert!(PipelineState::Scoring.is_busy());
    }

    #[test]
    fn terminal_states_are_not_busy() {
        assert!(!PipelineState::Complete.is_busy());
        assert!(!PipelineState::Failed.is_busy());
    }

    // ---- PipelineState::label ---

    #[test]
    fn labels_are_stable() {
        assert_eq!(PipelineState::Idle.label(), "Idle");
        assert_eq!(PipelineState::Uploading.label(), "Uploading");
        assert_eq!(PipelineState::Transcribing.label(), "Transcribing");
        assert_eq!(PipelineState::Scoring.label(), "Analyzing");
        assert_eq!(PipelineState::Complete.label(), "Done");
        assert_eq!(PipelineState::Failed.label(), "Failed");
    }

    // ---- Default ---

    #[test]
    fn default_pipeline_state_is_idle() {
        assert_eq!(PipelineState::default(), PipelineState::Idle);
    }

    // ---- RunState / SharedState ---

    #[test]
    fn run_state_default_is_idle_with_no_error() {
        let state = RunState::default();
        assert_eq!(state.pipeline, PipelineState::Idle);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedState>();
    }

    #[test]
    fn shared_state_can_be_cloned_and_mutated() {
        let state = new_shared_state();
        let state2 = Arc::clone(&state);

        state.lock().unwrap().pipeline = PipelineState::Scoring;
        assert_eq!(state2.lock().unwrap().pipeline, PipelineState::Scoring);
    }
}

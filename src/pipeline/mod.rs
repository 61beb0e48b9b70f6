//! Pipeline orchestrator module for callscore.
//!
//! This module wires the full upload → transcription → scoring → sanitized
//! result pipeline and exposes the observable run state.
//!
//! # Architecture
//!
//! ```text
//! AudioUpload
//!      │
//!      ▼
//! CallEvaluator::evaluate()           ← async
//!      │
//!      ├─ validate            [Uploading]
//!      ├─ Transcriber (API)   [Transcribing]
//!      ├─ CallAnalyst (API)   [Scoring]
//!      └─ sanitize_response   [Complete]
//!
//! SharedState (Arc<Mutex<RunState>>) ←─── read by progress observers
//! ```
//!
//! Concurrent evaluations are independent; the only shared data is the
//! read-only criteria registry.

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{CallEvaluator, PipelineError};
pub use state::{new_shared_state, PipelineState, RunState, SharedState};

//! Scoring module — sanitization and aggregation of rubric scores.
//!
//! This module provides:
//! * [`sanitize_response`] — constrains an untrusted scoring-service reply
//!   into a valid [`ScoreMap`].
//! * [`total_score`] / [`max_score`] / [`score_percentage`] — pure
//!   aggregation over a [`ScoreMap`] and the criteria registry.
//! * [`Analysis`] / [`AnalysisResult`] — sanitized and final result types.
//!
//! # Quick start
//!
//! ```rust
//! use callscore::scoring::{sanitize_response, score_percentage, total_score};
//!
//! let raw = r#"{"scores": {"greeting": 4, "empathy": 99}, "overallFeedback": "ok"}"#;
//! let analysis = sanitize_response(raw);
//!
//! // empathy (weight 8) was clamped; greeting passed through.
//! assert_eq!(total_score(&analysis.scores), 12.0);
//! assert_eq!(score_percentage(&analysis.scores), 11);
//! ```

pub mod aggregate;
pub mod result;
pub mod sanitize;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use aggregate::{max_score, score_percentage, total_score};
pub use result::{Analysis, AnalysisResult, ScoreMap};
pub use sanitize::{sanitize_response, DEFAULT_FEEDBACK, DEFAULT_OBSERVATION};

//! LLM scoring module.
//!
//! This module provides:
//! * [`CallAnalyst`] — async trait implemented by all scoring backends.
//! * [`ApiAnalyst`] — OpenAI-compatible REST API scoring client.
//! * [`PromptBuilder`] — renders the rubric + transcript into chat messages.
//! * [`AnalystError`] — error variants for scoring operations.

pub mod analyst;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use analyst::{AnalystError, ApiAnalyst, CallAnalyst};
pub use prompt::PromptBuilder;

// test-only re-export so the pipeline test module can import MockAnalyst
// without `use callscore::llm::analyst::MockAnalyst`.
#[cfg(test)]
pub use analyst::MockAnalyst;

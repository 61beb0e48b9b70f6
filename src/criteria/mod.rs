//! Criteria registry — the fixed, ordered call-evaluation rubric.
//!
//! Pure data plus two derived queries; no mutation anywhere.

pub mod registry;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use registry::{
    find_parameter, total_weight, EvaluationParameter, ScoringType, EVALUATION_PARAMETERS,
};

//! Result types shared between the sanitizer, the aggregator and callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ScoreMap
// ---------------------------------------------------------------------------

/// Mapping from parameter key to awarded points.
///
/// A `BTreeMap` keeps iteration order deterministic regardless of the order
/// in which the scoring service listed the keys.
///
/// Invariant (guaranteed by [`crate::scoring::sanitize_response`]): every
/// value lies in `[0, weight]` of the matching registry parameter, and
/// `PassFail` entries are exactly `0` or `weight`.
pub type ScoreMap = BTreeMap<String, f64>;

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// The sanitized output of one scoring-service call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Validated per-parameter scores.
    pub scores: ScoreMap,
    /// Short overall summary of the agent's performance.
    #[serde(rename = "overallFeedback")]
    pub overall_feedback: String,
    /// Detailed observations with examples from the call.
    pub observation: String,
}

// ---------------------------------------------------------------------------
// AnalysisResult
// ---------------------------------------------------------------------------

/// Final result of a full pipeline run.
///
/// Created once per successful [`crate::pipeline::CallEvaluator::evaluate`]
/// call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Validated per-parameter scores.
    pub scores: ScoreMap,
    /// Short overall summary of the agent's performance.
    #[serde(rename = "overallFeedback")]
    pub overall_feedback: String,
    /// Detailed observations with examples from the call.
    pub observation: String,
    /// The transcript the scores were derived from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

impl AnalysisResult {
    /// Attach a transcript to a sanitized [`Analysis`].
    pub fn from_analysis(analysis: Analysis, transcript: String) -> Self {
        Self {
            scores: analysis.scores,
            overall_feedback: analysis.overall_feedback,
            observation: analysis.observation,
            transcript: Some(transcript),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_serialises_with_original_wire_names() {
        let mut scores = ScoreMap::new();
        scores.insert("greeting".into(), 4.0);

        let result = AnalysisResult {
            scores,
            overall_feedback: "Good call.".into(),
            observation: "Clear greeting.".into(),
            transcript: Some("Hello".into()),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["overallFeedback"], "Good call.");
        assert_eq!(json["observation"], "Clear greeting.");
        assert_eq!(json["scores"]["greeting"], 4.0);
        assert_eq!(json["transcript"], "Hello");
    }

    #[test]
    fn missing_transcript_is_omitted_from_json() {
        let result = AnalysisResult {
            scores: ScoreMap::new(),
            overall_feedback: String::new(),
            observation: String::new(),
            transcript: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("transcript").is_none());
    }

    #[test]
    fn result_round_trips_through_json() {
        let mut scores = ScoreMap::new();
        scores.insert("empathy".into(), 7.5);

        let original = AnalysisResult {
            scores,
            overall_feedback: "fb".into(),
            observation: "obs".into(),
            transcript: Some("t".into()),
        };

        let json = serde_json::to_string(&original).unwrap();
        let loaded: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(original, loaded);
    }
}

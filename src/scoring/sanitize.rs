//! Response sanitizer — turns an untrusted scoring-service reply into a
//! [`ScoreMap`] that is safe to trust blindly.
//!
//! The scoring service is asked to return JSON, but its reply is treated as
//! fully untrusted: non-JSON text, missing keys, extra keys, strings where
//! numbers were expected, negative or oversized values are all absorbed
//! here.  The output always satisfies the ScoreMap invariant:
//!
//! * every value lies in `[0, weight]` of the matching parameter, and
//! * `PassFail` entries are exactly `0` or `weight`.
//!
//! Sanitization is total — it never returns an error.  A reply that fails to
//! parse at all degrades to an empty object, defaulting every score to 0 and
//! both text fields to fixed placeholders.

use serde_json::Value;

use crate::criteria::{ScoringType, EVALUATION_PARAMETERS};
use crate::scoring::result::{Analysis, ScoreMap};

// ---------------------------------------------------------------------------
// Placeholders
// ---------------------------------------------------------------------------

/// Used when the response carries no `overallFeedback` string.
pub const DEFAULT_FEEDBACK: &str = "Analysis complete.";

/// Used when the response carries no `observation` string.
pub const DEFAULT_OBSERVATION: &str = "No specific observations.";

// ---------------------------------------------------------------------------
// sanitize_response
// ---------------------------------------------------------------------------

/// Parse and constrain a raw scoring-service reply.
///
/// Iterates the criteria registry rather than the response, so keys the
/// service invented are ignored and keys it omitted default to 0.  Per
/// parameter:
///
/// * `PassFail` — the full `weight` when the candidate is `>= weight / 2`,
///   otherwise `0`.  The service sometimes awards partial credit on binary
///   items; the midpoint rule collapses that back to the binary contract.
/// * `Score` — the candidate clamped into `[0, weight]`.
pub fn sanitize_response(raw: &str) -> Analysis {
    let value: Value = serde_json::from_str(raw).unwrap_or_else(|e| {
        log::warn!("scoring response was not valid JSON ({e}); defaulting all scores to 0");
        Value::Object(serde_json::Map::new())
    });

    let mut scores = ScoreMap::new();
    for param in EVALUATION_PARAMETERS {
        let candidate = value["scores"][param.key].as_f64().unwrap_or(0.0);
        let weight = f64::from(param.weight);

        let awarded = match param.scoring {
            ScoringType::PassFail => {
                if candidate >= weight / 2.0 {
                    weight
                } else {
                    0.0
                }
            }
            ScoringType::Score => candidate.clamp(0.0, weight),
        };

        scores.insert(param.key.to_string(), awarded);
    }

    let overall_feedback = value["overallFeedback"]
        .as_str()
        .unwrap_or(DEFAULT_FEEDBACK)
        .to_string();
    let observation = value["observation"]
        .as_str()
        .unwrap_or(DEFAULT_OBSERVATION)
        .to_string();

    Analysis {
        scores,
        overall_feedback,
        observation,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::find_parameter;

    fn response_with_score(key: &str, value: f64) -> String {
        format!(r#"{{"scores": {{"{key}": {value}}}}}"#)
    }

    // ---- invariant ----

    #[test]
    fn output_always_satisfies_score_map_invariant() {
        let raws = [
            r#"{"scores": {"greeting": 999, "empathy": -50, "complianceDisclosure": 7.3}}"#,
            r#"{"scores": {"greeting": "not a number"}}"#,
            r#"{"scores": []}"#,
            "utter garbage",
            "{}",
        ];

        for raw in raws {
            let analysis = sanitize_response(raw);
            for param in EVALUATION_PARAMETERS {
                let value = analysis.scores[param.key];
                let weight = f64::from(param.weight);
                assert!(
                    (0.0..=weight).contains(&value),
                    "{}={value} out of range for raw {raw:?}",
                    param.key
                );
                if param.scoring == ScoringType::PassFail {
                    assert!(
                        value == 0.0 || value == weight,
                        "{}={value} not binary for raw {raw:?}",
                        param.key
                    );
                }
            }
        }
    }

    // ---- pass/fail midpoint rule ----

    #[test]
    fn pass_fail_at_or_above_midpoint_awards_full_weight() {
        // customerVerification: PassFail, weight 10.
        let analysis = sanitize_response(&response_with_score("customerVerification", 6.0));
        assert_eq!(analysis.scores["customerVerification"], 10.0);

        let analysis = sanitize_response(&response_with_score("customerVerification", 5.0));
        assert_eq!(analysis.scores["customerVerification"], 10.0);
    }

    #[test]
    fn pass_fail_below_midpoint_awards_zero() {
        let analysis = sanitize_response(&response_with_score("customerVerification", 4.0));
        assert_eq!(analysis.scores["customerVerification"], 0.0);
    }

    // ---- graded clamping ----

    #[test]
    fn graded_scores_clamp_into_range() {
        // empathy: Score, weight 8.
        let analysis = sanitize_response(&response_with_score("empathy", -3.0));
        assert_eq!(analysis.scores["empathy"], 0.0);

        let analysis = sanitize_response(&response_with_score("empathy", 20.0));
        assert_eq!(analysis.scores["empathy"], 8.0);

        let analysis = sanitize_response(&response_with_score("empathy", 6.5));
        assert_eq!(analysis.scores["empathy"], 6.5);
    }

    // ---- malformed / partial responses ----

    #[test]
    fn non_json_response_defaults_everything() {
        let analysis = sanitize_response("I'm sorry, I cannot produce JSON today.");

        for param in EVALUATION_PARAMETERS {
            assert_eq!(analysis.scores[param.key], 0.0);
        }
        assert_eq!(analysis.overall_feedback, DEFAULT_FEEDBACK);
        assert_eq!(analysis.observation, DEFAULT_OBSERVATION);
    }

    #[test]
    fn missing_keys_default_to_zero_and_extra_keys_are_dropped() {
        let raw = r#"{"scores": {"greeting": 4, "madeUpParameter": 99}}"#;
        let analysis = sanitize_response(raw);

        assert_eq!(analysis.scores["greeting"], 4.0);
        assert_eq!(analysis.scores["empathy"], 0.0);
        assert!(!analysis.scores.contains_key("madeUpParameter"));
        assert_eq!(analysis.scores.len(), EVALUATION_PARAMETERS.len());
    }

    #[test]
    fn non_numeric_candidate_counts_as_zero() {
        let raw = r#"{"scores": {"greeting": "excellent"}}"#;
        let analysis = sanitize_response(raw);
        assert_eq!(analysis.scores["greeting"], 0.0);
    }

    #[test]
    fn feedback_and_observation_pass_through_when_present() {
        let raw = r#"{
            "scores": {},
            "overallFeedback": "Strong call overall.",
            "observation": "Verified identity early."
        }"#;
        let analysis = sanitize_response(raw);
        assert_eq!(analysis.overall_feedback, "Strong call overall.");
        assert_eq!(analysis.observation, "Verified identity early.");
    }

    // ---- idempotence ----

    #[test]
    fn sanitizing_twice_yields_identical_results() {
        let raw = r#"{"scores": {"greeting": 17, "commitmentSecured": 3.2}, "observation": "x"}"#;
        assert_eq!(sanitize_response(raw), sanitize_response(raw));
    }

    // ---- registry agreement ----

    #[test]
    fn pass_fail_example_from_rubric() {
        // commitmentSecured is PassFail with weight 10.
        let param = find_parameter("commitmentSecured").unwrap();
        assert_eq!(param.weight, 10);

        let analysis = sanitize_response(&response_with_score("commitmentSecured", 6.0));
        assert_eq!(analysis.scores["commitmentSecured"], 10.0);
        let analysis = sanitize_response(&response_with_score("commitmentSecured", 4.0));
        assert_eq!(analysis.scores["commitmentSecured"], 0.0);
    }
}

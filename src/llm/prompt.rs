//! Prompt builder for call-quality evaluation.
//!
//! [`PromptBuilder`] renders the criteria registry into a natural-language
//! rubric and embeds it with the call transcript into a
//! `(system_msg, user_msg)` pair for any OpenAI-compatible
//! `/chat/completions` endpoint.
//!
//! The prompt must do two jobs that free-form LLM output would otherwise
//! leave to chance: enumerate the exact JSON keys expected back, and spell
//! out the scoring rule per parameter type — "0 or full weight" for
//! PASS/FAIL is not self-evident from a generic "score 0–N" framing.
//!
//! No truncation is applied to the transcript.

use crate::criteria::{ScoringType, EVALUATION_PARAMETERS};

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

const SYSTEM_INSTRUCTION: &str =
    "You are a professional call quality analyst. Respond only with valid JSON.";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds evaluation prompts from the criteria registry.
///
/// # Example
/// ```rust
/// use callscore::llm::PromptBuilder;
///
/// let builder = PromptBuilder::new();
/// let (system, user) = builder.build_chat("Hello, this is Sam from Acme.");
/// assert!(system.contains("call quality analyst"));
/// assert!(user.contains("greeting"));
/// ```
#[derive(Debug, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a **(system_msg, user_msg)** pair for the scoring call.
    ///
    /// The user message contains (in order): the transcript, one rubric line
    /// per parameter, the scoring rules, and the exact JSON shape expected
    /// back — one `scores` entry per registry key plus `overallFeedback`
    /// and `observation`.
    pub fn build_chat(&self, transcript: &str) -> (String, String) {
        (SYSTEM_INSTRUCTION.to_string(), self.build_user(transcript))
    }

    fn build_user(&self, transcript: &str) -> String {
        let mut prompt = String::with_capacity(2_048 + transcript.len());

        prompt.push_str(
            "You are an expert call quality analyst for a debt collection agency. \
             Analyze the following call transcript and evaluate the agent's performance.\n\n",
        );

        prompt.push_str("CALL TRANSCRIPT:\n");
        prompt.push_str(transcript);
        prompt.push_str("\n\nEVALUATION CRITERIA:\n");
        for param in EVALUATION_PARAMETERS {
            prompt.push_str(&Self::rubric_line(param));
            prompt.push('\n');
        }

        prompt.push_str(
            "\nIMPORTANT SCORING RULES:\n\
             1. For PASS/FAIL parameters: Score must be either 0 (failed) or the full weight value (passed)\n\
             2. For SCORE parameters: Score can be any number from 0 to the weight value\n\
             3. Be strict but fair in your evaluation\n\
             4. Base scores only on what you can verify from the transcript\n\n\
             Please provide your analysis in the following JSON format:\n",
        );

        prompt.push_str("{\n  \"scores\": {\n");
        for (i, param) in EVALUATION_PARAMETERS.iter().enumerate() {
            let comma = if i + 1 < EVALUATION_PARAMETERS.len() { "," } else { "" };
            prompt.push_str(&format!("    \"{}\": <number>{comma}\n", param.key));
        }
        prompt.push_str(
            "  },\n\
             \x20 \"overallFeedback\": \"<2-3 sentences summarizing the agent's overall performance>\",\n\
             \x20 \"observation\": \"<detailed observations about what the agent did well and areas for improvement, including specific examples from the call>\"\n\
             }\n\n\
             Respond ONLY with valid JSON, no additional text.",
        );

        prompt
    }

    /// Render one rubric line: `- Name (key): description [scoring semantics]`.
    fn rubric_line(param: &crate::criteria::EvaluationParameter) -> String {
        let score_type = match param.scoring {
            ScoringType::PassFail => format!("PASS/FAIL (0 or {} points)", param.weight),
            ScoringType::Score => format!("SCORE (0 to {} points)", param.weight),
        };
        format!(
            "- {} ({}): {} [{}]",
            param.name, param.key, param.description, score_type
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = "Hi, this is Alex calling from Meridian Recovery.";

    #[test]
    fn user_message_embeds_the_transcript() {
        let (_, user) = PromptBuilder::new().build_chat(TRANSCRIPT);
        assert!(user.contains(TRANSCRIPT));
    }

    #[test]
    fn every_registry_key_appears_in_the_prompt() {
        let (_, user) = PromptBuilder::new().build_chat(TRANSCRIPT);
        for param in EVALUATION_PARAMETERS {
            assert!(user.contains(param.key), "missing key {}", param.key);
            assert!(user.contains(param.name), "missing name {}", param.name);
        }
    }

    #[test]
    fn rubric_distinguishes_scoring_semantics() {
        let (_, user) = PromptBuilder::new().build_chat(TRANSCRIPT);
        // complianceDisclosure: PassFail weight 15; collectionUrgency: Score weight 12.
        assert!(user.contains("PASS/FAIL (0 or 15 points)"));
        assert!(user.contains("SCORE (0 to 12 points)"));
    }

    #[test]
    fn prompt_requests_json_only_output() {
        let (system, user) = PromptBuilder::new().build_chat(TRANSCRIPT);
        assert!(system.contains("valid JSON"));
        assert!(user.contains("Respond ONLY with valid JSON"));
        assert!(user.contains("\"overallFeedback\""));
        assert!(user.contains("\"observation\""));
    }

    #[test]
    fn long_transcripts_are_not_truncated() {
        let long = "word ".repeat(50_000);
        let (_, user) = PromptBuilder::new().build_chat(&long);
        assert!(user.contains(&long));
    }
}

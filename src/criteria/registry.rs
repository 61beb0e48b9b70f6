//! The evaluation rubric — a const table of weighted call-quality parameters.
//!
//! [`EVALUATION_PARAMETERS`] is the single source of truth for both prompt
//! generation ([`crate::llm::PromptBuilder`]) and response validation
//! ([`crate::scoring::sanitize_response`]).  Because both read the same
//! table, the rubric sent to the scoring service and the rubric used to
//! check its answer can never drift apart.
//!
//! The table is initialised at compile time and never mutated, so it is safe
//! for unsynchronised concurrent reads from any number of pipeline runs.

// ---------------------------------------------------------------------------
// ScoringType
// ---------------------------------------------------------------------------

/// How a parameter is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoringType {
    /// Binary: the only valid awards are `0` or the full `weight`.
    PassFail,
    /// Graded: any value in `0..=weight` is valid.
    Score,
}

// ---------------------------------------------------------------------------
// EvaluationParameter
// ---------------------------------------------------------------------------

/// One named, weighted evaluation criterion.
#[derive(Debug)]
pub struct EvaluationParameter {
    /// Human-readable display name (e.g. `"Greeting"`).
    pub name: &'static str,
    /// Unique identifier used as the JSON key in prompts and responses.
    pub key: &'static str,
    /// Scoring mode for this parameter.
    pub scoring: ScoringType,
    /// Maximum points this parameter can contribute.  Always positive.
    pub weight: u32,
    /// Instruction shown to the scoring service describing what to assess.
    pub description: &'static str,
}

// ---------------------------------------------------------------------------
// The registry
// ---------------------------------------------------------------------------

/// Ordered debt-collection call rubric.  Total weight: 108.
pub const EVALUATION_PARAMETERS: &[EvaluationParameter] = &[
    EvaluationParameter {
        name: "Greeting",
        key: "greeting",
        scoring: ScoringType::Score,
        weight: 5,
        description: "Agent greets the customer warmly and professionally",
    },
    EvaluationParameter {
        name: "Collection Urgency",
        key: "collectionUrgency",
        scoring: ScoringType::Score,
        weight: 12,
        description: "Agent conveys urgency to pay and potential consequences",
    },
    EvaluationParameter {
        name: "Customer Verification",
        key: "customerVerification",
        scoring: ScoringType::PassFail,
        weight: 10,
        description: "Agent verifies customer identity before discussing account details",
    },
    EvaluationParameter {
        name: "Active Listening",
        key: "activeListening",
        scoring: ScoringType::Score,
        weight: 8,
        description: "Agent demonstrates understanding of customer concerns and responds appropriately",
    },
    EvaluationParameter {
        name: "Empathy",
        key: "empathy",
        scoring: ScoringType::Score,
        weight: 8,
        description: "Agent shows understanding and compassion for customer situation",
    },
    EvaluationParameter {
        name: "Payment Options Explained",
        key: "paymentOptions",
        scoring: ScoringType::Score,
        weight: 10,
        description: "Agent clearly explains available payment options and terms",
    },
    EvaluationParameter {
        name: "Objection Handling",
        key: "objectionHandling",
        scoring: ScoringType::Score,
        weight: 12,
        description: "Agent effectively addresses customer objections and concerns",
    },
    EvaluationParameter {
        name: "Compliance Disclosure",
        key: "complianceDisclosure",
        scoring: ScoringType::PassFail,
        weight: 15,
        description: "Agent provides required legal disclosures (e.g., call recording notice, debt collection notice)",
    },
    EvaluationParameter {
        name: "Call Control",
        key: "callControl",
        scoring: ScoringType::Score,
        weight: 8,
        description: "Agent maintains control of conversation and guides toward resolution",
    },
    EvaluationParameter {
        name: "Commitment Secured",
        key: "commitmentSecured",
        scoring: ScoringType::PassFail,
        weight: 10,
        description: "Agent obtains a clear payment commitment from customer",
    },
    EvaluationParameter {
        name: "Professional Closing",
        key: "professionalClosing",
        scoring: ScoringType::Score,
        weight: 5,
        description: "Agent closes call professionally with clear next steps",
    },
];

// ---------------------------------------------------------------------------
// Derived queries
// ---------------------------------------------------------------------------

/// Sum of all registry weights — the maximum achievable score.
pub fn total_weight() -> u32 {
    EVALUATION_PARAMETERS.iter().map(|p| p.weight).sum()
}

/// Look up a parameter by its unique key.
pub fn find_parameter(key: &str) -> Option<&'static EvaluationParameter> {
    EVALUATION_PARAMETERS.iter().find(|p| p.key == key)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

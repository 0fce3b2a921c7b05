// Evaluator trait — the swap-ready abstraction over evaluation paths.
//
// The rules path is local and synchronous underneath; the LLM path makes
// an HTTP call. The trait is async so both fit behind one interface.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::lists::WordLists;

/// The result of evaluating a single piece of text.
///
/// Serializes camelCase — this is the same JSON shape the LLM is asked
/// to produce and the shape logged to the list/log server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Whether the text is acceptable as-is.
    pub is_valid: bool,
    /// Severity from 0 (clean) to 5 (extremely toxic). The rules path
    /// only ever emits 0 or 4; intermediate values come from the LLM.
    pub profanity_score: u8,
    /// The input text with profane spans replaced by `*` runs of equal length.
    pub censored_text: String,
}

/// Which evaluation path produced a result. Recorded with every log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    Rules,
    Llm,
}

impl EvaluationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationMode::Rules => "Rules",
            EvaluationMode::Llm => "LLM",
        }
    }
}

impl std::fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait for evaluating text against the word lists.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Evaluate a single text. Implementations must not mutate the lists.
    async fn evaluate(&self, text: &str, lists: &WordLists) -> Result<Evaluation>;

    /// Which mode this evaluator represents (for logging and display).
    fn mode(&self) -> EvaluationMode;
}

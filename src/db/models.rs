// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without
// depending on rusqlite directly.

use serde::{Deserialize, Serialize};

use crate::engine::traits::Evaluation;

/// One row of the evaluation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: i64,
    /// The original text as submitted.
    pub text: String,
    /// "Rules" or "LLM".
    pub mode: String,
    pub is_valid: bool,
    pub profanity_score: u8,
    pub censored_text: String,
    pub evaluated_at: String,
    /// Whether this entry has been pushed to the log server.
    pub synced: bool,
}

impl EvaluationRecord {
    /// Reassemble the evaluation result this row was built from.
    pub fn evaluation(&self) -> Evaluation {
        Evaluation {
            is_valid: self.is_valid,
            profanity_score: self.profanity_score,
            censored_text: self.censored_text.clone(),
        }
    }
}

// Rule-based evaluation — the local, pure path.
//
// Matching happens in two passes: first every blacklist word is tested
// against the text with word boundaries, then each distinct hit is
// censored everywhere it occurs. All matches are computed before any
// substitution, so one word's replacement can never hide or reveal
// another word's match.

use std::collections::BTreeSet;

use anyhow::Result;
use async_trait::async_trait;
use regex_lite::RegexBuilder;
use tracing::debug;

use super::traits::{Evaluation, EvaluationMode, Evaluator};
use crate::lists::WordLists;

/// Score assigned whenever a blacklist word matches. The rules path only
/// emits this or 0 — intermediate severities belong to the LLM path.
pub const MATCH_SCORE: u8 = 4;

/// Evaluate text against the word lists.
///
/// Total over its inputs: any text and any pair of lists produce a
/// well-formed result, and no I/O happens. Whitelisted words are skipped
/// before matching, so the whitelist always wins regardless of list
/// order. Blank list entries are no-ops.
pub fn evaluate(text: &str, lists: &WordLists) -> Evaluation {
    let mut matched: BTreeSet<String> = BTreeSet::new();

    for word in lists.blacklist() {
        let word = word.trim().to_lowercase();
        if word.is_empty() || lists.is_whitelisted(&word) {
            continue;
        }
        // Escaped, so list entries containing regex metacharacters are
        // matched as literal text instead of breaking the pattern.
        let pattern = format!(r"\b{}\b", regex_lite::escape(&word));
        let regex = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(r) => r,
            Err(e) => {
                debug!(word = %word, error = %e, "Skipping unmatchable list entry");
                continue;
            }
        };
        if regex.is_match(text) {
            matched.insert(word);
        }
    }

    let mut censored = text.to_string();
    for word in &matched {
        // The censor pass is substring-level (no word boundaries): once a
        // word has matched anywhere, every occurrence of it is starred
        // out, including inside longer words.
        let regex = match RegexBuilder::new(&regex_lite::escape(word))
            .case_insensitive(true)
            .build()
        {
            Ok(r) => r,
            Err(_) => continue,
        };
        censored = regex
            .replace_all(&censored, |caps: &regex_lite::Captures| {
                "*".repeat(caps[0].chars().count())
            })
            .into_owned();
    }

    Evaluation {
        is_valid: matched.is_empty(),
        profanity_score: if matched.is_empty() { 0 } else { MATCH_SCORE },
        censored_text: censored,
    }
}

/// The `Evaluator` wrapper around the pure rules function.
pub struct RuleEvaluator;

#[async_trait]
impl Evaluator for RuleEvaluator {
    async fn evaluate(&self, text: &str, lists: &WordLists) -> Result<Evaluation> {
        Ok(evaluate(text, lists))
    }

    fn mode(&self) -> EvaluationMode {
        EvaluationMode::Rules
    }
}

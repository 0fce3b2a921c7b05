// Unit tests for the evaluation engine.
//
// Covers the rule evaluator's contract (whitelist precedence, word
// boundaries, case insensitivity, global censoring, binary scoring,
// degenerate inputs) and the best-effort JSON extraction used by the
// LLM path.

use wordgate::engine::gemini::extract_json;
use wordgate::engine::rules::{evaluate, RuleEvaluator, MATCH_SCORE};
use wordgate::engine::traits::{Evaluation, EvaluationMode, Evaluator};
use wordgate::lists::WordLists;

fn lists(blacklist: &[&str], whitelist: &[&str]) -> WordLists {
    WordLists::new(
        blacklist.iter().map(|s| s.to_string()).collect(),
        whitelist.iter().map(|s| s.to_string()).collect(),
    )
}

// ============================================================
// Rules path — clean and degenerate inputs
// ============================================================

#[test]
fn clean_text_is_returned_unchanged() {
    let result = evaluate("nothing to see here", &lists(&["damn", "ass"], &[]));
    assert_eq!(
        result,
        Evaluation {
            is_valid: true,
            profanity_score: 0,
            censored_text: "nothing to see here".to_string(),
        }
    );
}

#[test]
fn empty_text_is_valid() {
    let result = evaluate("", &lists(&["damn"], &[]));
    assert!(result.is_valid);
    assert_eq!(result.profanity_score, 0);
    assert_eq!(result.censored_text, "");
}

#[test]
fn empty_lists_accept_anything() {
    let result = evaluate("any text whatsoever", &lists(&[], &[]));
    assert!(result.is_valid);
    assert_eq!(result.censored_text, "any text whatsoever");
}

#[test]
fn blank_list_entries_cannot_match() {
    let result = evaluate("hello world", &lists(&["", "  ", "\t"], &[]));
    assert!(result.is_valid);
    assert_eq!(result.censored_text, "hello world");
}

// ============================================================
// Rules path — whitelist precedence
// ============================================================

#[test]
fn whitelisted_word_never_invalidates() {
    let result = evaluate("this is bad", &lists(&["bad"], &["bad"]));
    assert!(result.is_valid);
    assert_eq!(result.profanity_score, 0);
    assert_eq!(result.censored_text, "this is bad");
}

#[test]
fn whitelist_wins_regardless_of_other_entries() {
    let result = evaluate(
        "hell yes, damn right",
        &lists(&["hell", "damn"], &["hell", "unrelated"]),
    );
    // "hell" is exempt, "damn" still matches
    assert!(!result.is_valid);
    assert_eq!(result.censored_text, "hell yes, **** right");
}

#[test]
fn whitelist_check_is_case_insensitive() {
    let result = evaluate("this is BAD", &lists(&["BAD"], &["Bad"]));
    assert!(result.is_valid);
    assert_eq!(result.censored_text, "this is BAD");
}

// ============================================================
// Rules path — word boundaries
// ============================================================

#[test]
fn no_partial_word_matches() {
    let result = evaluate("a classic assessment", &lists(&["ass"], &[]));
    assert!(result.is_valid);
    assert_eq!(result.censored_text, "a classic assessment");
}

#[test]
fn whole_word_matches() {
    let result = evaluate("you ass", &lists(&["ass"], &[]));
    assert!(!result.is_valid);
    assert_eq!(result.censored_text, "you ***");
}

#[test]
fn punctuation_counts_as_a_boundary() {
    let result = evaluate("damn! that hurt", &lists(&["damn"], &[]));
    assert!(!result.is_valid);
    assert_eq!(result.censored_text, "****! that hurt");
}

// ============================================================
// Rules path — case insensitivity and censoring
// ============================================================

#[test]
fn matching_is_case_insensitive_and_preserves_length() {
    let result = evaluate("this is DAMN annoying", &lists(&["Damn"], &[]));
    assert!(!result.is_valid);
    assert_eq!(result.censored_text, "this is **** annoying");
}

#[test]
fn all_occurrences_are_censored() {
    let result = evaluate("ass ass", &lists(&["ass"], &[]));
    assert_eq!(result.censored_text, "*** ***");
}

#[test]
fn mixed_case_occurrences_are_all_censored() {
    let result = evaluate("Damn damn DAMN", &lists(&["damn"], &[]));
    assert_eq!(result.censored_text, "**** **** ****");
}

#[test]
fn censor_pass_is_substring_level_once_matched() {
    // Detection honors word boundaries, but censoring does not: once
    // "ass" has matched as a word, the span inside "classic" is starred
    // out too.
    let result = evaluate("you ass, how classic", &lists(&["ass"], &[]));
    assert!(!result.is_valid);
    assert_eq!(result.censored_text, "you ***, how cl***ic");
}

#[test]
fn unmatched_text_keeps_original_casing() {
    let result = evaluate("Well DAMN, Sir", &lists(&["damn"], &[]));
    assert_eq!(result.censored_text, "Well ****, Sir");
}

#[test]
fn two_distinct_words_both_censored() {
    let result = evaluate("damn this crap", &lists(&["damn", "crap"], &[]));
    assert!(!result.is_valid);
    assert_eq!(result.censored_text, "**** this ****");
}

// ============================================================
// Rules path — scoring is binary
// ============================================================

#[test]
fn any_match_scores_exactly_four() {
    let single = evaluate("damn", &lists(&["damn"], &[]));
    let many = evaluate("damn crap hell", &lists(&["damn", "crap", "hell"], &[]));
    assert_eq!(single.profanity_score, MATCH_SCORE);
    assert_eq!(many.profanity_score, MATCH_SCORE);
}

#[test]
fn no_match_scores_exactly_zero() {
    let result = evaluate("spotless", &lists(&["damn"], &[]));
    assert_eq!(result.profanity_score, 0);
}

// ============================================================
// Evaluator trait — the rules wrapper
// ============================================================

#[tokio::test]
async fn rule_evaluator_reports_rules_mode() {
    let evaluator = RuleEvaluator;
    assert_eq!(evaluator.mode(), EvaluationMode::Rules);
    assert_eq!(evaluator.mode().as_str(), "Rules");

    let result = evaluator
        .evaluate("you ass", &lists(&["ass"], &[]))
        .await
        .unwrap();
    assert!(!result.is_valid);
}

// ============================================================
// LLM path — JSON extraction
// ============================================================

#[test]
fn extract_json_handles_code_fences() {
    let raw = "```json\n{\"isValid\": false, \"profanityScore\": 3, \"censoredText\": \"** you\"}\n```";
    let result = extract_json(raw).unwrap();
    assert_eq!(result.profanity_score, 3);
    assert_eq!(result.censored_text, "** you");
}

#[test]
fn extract_json_requires_an_object() {
    assert!(extract_json("no json here").is_err());
    assert!(extract_json("").is_err());
}

#[test]
fn extract_json_rejects_scores_above_five() {
    let raw = r#"{"isValid": true, "profanityScore": 6, "censoredText": "x"}"#;
    assert!(extract_json(raw).is_err());
}

#[test]
fn log_preview_is_safe_on_multibyte_model_output() {
    // The LLM path previews raw model output at 80 characters. Model
    // replies are arbitrary text, so a multi-byte character sitting at
    // the cutoff must not break the preview.
    let raw = format!("a{}", "é".repeat(100));
    let preview = wordgate::output::truncate_chars(&raw, 80);
    assert_eq!(preview.chars().count(), 83); // 80 chars + "..."
    assert!(preview.ends_with("..."));

    // Short multi-byte output is passed through untouched
    let short = "señal válida ✓";
    assert_eq!(wordgate::output::truncate_chars(short, 80), short);
}

#[test]
fn evaluation_serializes_camel_case() {
    let json = serde_json::to_string(&Evaluation {
        is_valid: false,
        profanity_score: 4,
        censored_text: "****".to_string(),
    })
    .unwrap();
    assert_eq!(
        json,
        r#"{"isValid":false,"profanityScore":4,"censoredText":"****"}"#
    );
}

// Colored terminal output for evaluation results, word lists, and reports.
//
// This module handles all terminal-specific formatting: colors, tables,
// badges. The main.rs command handlers delegate here.

use colored::Colorize;

use crate::db::models::EvaluationRecord;
use crate::engine::traits::Evaluation;
use crate::lists::WordLists;

/// Display a single evaluation result.
pub fn display_evaluation(evaluation: &Evaluation) {
    println!("\n{}", "=== Evaluation Result ===".bold());

    let verdict = if evaluation.is_valid {
        "Yes".green().bold()
    } else {
        "No".red().bold()
    };
    println!("  Valid: {verdict}");
    println!(
        "  Profanity score: {}",
        colorize_score(evaluation.profanity_score)
    );
    println!("  Censored text: \"{}\"", evaluation.censored_text);
}

/// Display both word lists.
pub fn display_word_lists(lists: &WordLists) {
    println!("\n{}", "=== Word Lists ===".bold());

    println!("\n  {} ({} words)", "Blacklist".red(), lists.blacklist().len());
    if lists.blacklist().is_empty() {
        println!("    {}", "(empty)".dimmed());
    }
    for word in lists.blacklist() {
        println!("    - {word}");
    }

    println!(
        "\n  {} ({} words)",
        "Whitelist".green(),
        lists.whitelist().len()
    );
    if lists.whitelist().is_empty() {
        println!("    {}", "(empty)".dimmed());
    }
    for word in lists.whitelist() {
        println!("    - {word}");
    }
    println!();
}

/// Display the local evaluation log, newest first.
pub fn display_report(records: &[EvaluationRecord]) {
    if records.is_empty() {
        println!("No evaluations logged yet. Run `wordgate evaluate \"some text\"` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Evaluation Log ({} entries) ===", records.len()).bold()
    );
    println!();

    // Header
    println!(
        "  {:>4}  {:<6} {:>5}  {:<6}  {:<19}  {}",
        "#".dimmed(),
        "Mode".dimmed(),
        "Score".dimmed(),
        "Valid".dimmed(),
        "When".dimmed(),
        "Text".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for record in records {
        let valid = if record.is_valid {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        };
        let sync_marker = if record.synced { " " } else { "~" };
        let preview = super::truncate_chars(&record.censored_text, 40);

        println!(
            "  {:>4}{} {:<6} {:>5}  {:<6}  {:<19}  \"{}\"",
            record.id,
            sync_marker,
            record.mode,
            colorize_score(record.profanity_score),
            valid,
            record.evaluated_at,
            preview.dimmed(),
        );
    }

    let unsynced = records.iter().filter(|r| !r.synced).count();
    if unsynced > 0 {
        println!(
            "\n  {} {} entries not yet pushed (marked ~) — run `wordgate push`",
            "~".yellow(),
            unsynced
        );
    }
    println!();
}

/// Colorize a profanity score with the severity thresholds used across
/// the app: 4+ red, 2-3 yellow, otherwise green.
fn colorize_score(score: u8) -> colored::ColoredString {
    let text = format!("{score}/5");
    match score {
        s if s >= 4 => text.red().bold(),
        2 | 3 => text.yellow(),
        _ => text.green(),
    }
}

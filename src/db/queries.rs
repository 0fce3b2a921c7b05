// Database queries — CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust
// interfaces.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::EvaluationRecord;
use crate::engine::traits::Evaluation;
use crate::lists::{ListKind, WordLists};

// --- Sync state ---

/// Get a sync state value by key (e.g., "last_push_at").
pub fn get_sync_state(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM sync_state WHERE key = ?1")?;
    let result = stmt.query_row(params![key], |row| row.get(0)).optional()?;
    Ok(result)
}

/// Set a sync state value (upsert).
pub fn set_sync_state(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO sync_state (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

// --- Word lists ---

/// Add a word to a list. Returns false if it was already present.
/// Callers are expected to pass already-normalized (lowercase, trimmed) words.
pub fn add_word(conn: &Connection, kind: ListKind, word: &str) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO word_list (word, kind) VALUES (?1, ?2)",
        params![word, kind.as_str()],
    )?;
    Ok(changed > 0)
}

/// Remove a word from a list. Returns whether it was present.
pub fn remove_word(conn: &Connection, kind: ListKind, word: &str) -> Result<bool> {
    let changed = conn.execute(
        "DELETE FROM word_list WHERE word = ?1 AND kind = ?2",
        params![word, kind.as_str()],
    )?;
    Ok(changed > 0)
}

/// Load one list's words in insertion order.
pub fn get_words(conn: &Connection, kind: ListKind) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT word FROM word_list WHERE kind = ?1 ORDER BY rowid")?;
    let rows = stmt.query_map(params![kind.as_str()], |row| row.get(0))?;

    let mut words = Vec::new();
    for row in rows {
        words.push(row?);
    }
    Ok(words)
}

/// Replace one list's contents wholesale.
///
/// Runs inside a transaction so an error midway never leaves the list
/// partially replaced.
pub fn replace_words(conn: &mut Connection, kind: ListKind, words: &[String]) -> Result<()> {
    let tx = conn.transaction()?;
    replace_words_in_tx(&tx, kind, words)?;
    tx.commit()?;
    Ok(())
}

/// Replace both lists in a single transaction, used when pulling from
/// the server. Either the full server state lands or nothing changes.
pub fn replace_word_lists(conn: &mut Connection, lists: &WordLists) -> Result<()> {
    let tx = conn.transaction()?;
    replace_words_in_tx(&tx, ListKind::Blacklist, lists.blacklist())?;
    replace_words_in_tx(&tx, ListKind::Whitelist, lists.whitelist())?;
    tx.commit()?;
    Ok(())
}

fn replace_words_in_tx(conn: &Connection, kind: ListKind, words: &[String]) -> Result<()> {
    conn.execute(
        "DELETE FROM word_list WHERE kind = ?1",
        params![kind.as_str()],
    )?;
    for word in words {
        add_word(conn, kind, word)?;
    }
    Ok(())
}

// --- Evaluation log ---

/// Record an evaluation and return its row ID. New rows start unsynced.
pub fn insert_evaluation(
    conn: &Connection,
    text: &str,
    mode: &str,
    evaluation: &Evaluation,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO evaluation_log (text, mode, is_valid, profanity_score, censored_text)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            text,
            mode,
            evaluation.is_valid,
            evaluation.profanity_score,
            evaluation.censored_text,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EvaluationRecord> {
    Ok(EvaluationRecord {
        id: row.get(0)?,
        text: row.get(1)?,
        mode: row.get(2)?,
        is_valid: row.get(3)?,
        profanity_score: row.get(4)?,
        censored_text: row.get(5)?,
        evaluated_at: row.get(6)?,
        synced: row.get(7)?,
    })
}

/// Get the most recent evaluations, newest first.
pub fn get_recent_evaluations(conn: &Connection, limit: u32) -> Result<Vec<EvaluationRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, text, mode, is_valid, profanity_score, censored_text, evaluated_at, synced
         FROM evaluation_log
         ORDER BY id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], record_from_row)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

/// Get all evaluations not yet accepted by the log server, oldest first.
pub fn get_unsynced_evaluations(conn: &Connection) -> Result<Vec<EvaluationRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, text, mode, is_valid, profanity_score, censored_text, evaluated_at, synced
         FROM evaluation_log
         WHERE synced = 0
         ORDER BY id",
    )?;
    let rows = stmt.query_map([], record_from_row)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

/// Flip an evaluation's synced flag after the log server accepted it.
pub fn mark_evaluation_synced(conn: &Connection, id: i64) -> Result<()> {
    conn.execute(
        "UPDATE evaluation_log SET synced = 1 WHERE id = ?1",
        params![id],
    )?;
    Ok(())
}

/// Total number of logged evaluations.
pub fn evaluation_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM evaluation_log", [], |row| row.get(0))?;
    Ok(count)
}

/// Number of evaluations still waiting to be pushed.
pub fn unsynced_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM evaluation_log WHERE synced = 0",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Timestamp of the most recent evaluation, if any.
pub fn last_evaluation_at(conn: &Connection) -> Result<Option<String>> {
    let mut stmt =
        conn.prepare("SELECT evaluated_at FROM evaluation_log ORDER BY id DESC LIMIT 1")?;
    let result = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(result)
}

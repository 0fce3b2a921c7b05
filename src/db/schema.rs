// Database schema — table creation and migrations.
//
// We use a simple version-based migration approach: a `schema_version`
// table tracks which migrations have run, and each migration is a
// function that executes SQL statements.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Blacklist and whitelist entries, one row per (word, list)
        CREATE TABLE IF NOT EXISTS word_list (
            word TEXT NOT NULL,                -- lowercase, trimmed
            kind TEXT NOT NULL,                -- 'blacklist' or 'whitelist'
            added_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (word, kind)
        );

        -- Every evaluation, regardless of which path produced it
        CREATE TABLE IF NOT EXISTS evaluation_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,                -- the text as submitted
            mode TEXT NOT NULL,                -- 'Rules' or 'LLM'
            is_valid INTEGER NOT NULL,
            profanity_score INTEGER NOT NULL,  -- 0 to 5
            censored_text TEXT NOT NULL,
            evaluated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Sync state — last push/pull timestamps for the list server
        CREATE TABLE IF NOT EXISTS sync_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Index for loading one list at a time
        CREATE INDEX IF NOT EXISTS idx_words_kind
            ON word_list(kind);

        -- Index for the report view (most recent first)
        CREATE INDEX IF NOT EXISTS idx_log_time
            ON evaluation_log(evaluated_at);
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    // Migration v2: add a synced flag to evaluation_log. Entries start
    // unsynced and are flipped once the log server has accepted them.
    run_migration(conn, 2, |c| {
        c.execute_batch(
            "ALTER TABLE evaluation_log ADD COLUMN synced INTEGER NOT NULL DEFAULT 0;",
        )
    })?;

    Ok(())
}

/// Run a migration if it hasn't been applied yet.
/// The migration function receives the connection and should execute its SQL.
fn run_migration<F>(conn: &Connection, version: i64, migrate: F) -> Result<()>
where
    F: FnOnce(&Connection) -> rusqlite::Result<()>,
{
    let already_applied: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM schema_version WHERE version = ?1",
        [version],
        |row| row.get(0),
    )?;

    if !already_applied {
        migrate(conn).with_context(|| format!("Migration v{version} failed"))?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
    }

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        // Running create_tables twice should not error
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let count = table_count(&conn).unwrap();
        // schema_version, word_list, evaluation_log, sync_state = 4 tables
        assert_eq!(count, 4i64);
    }

    #[test]
    fn test_migration_v2_adds_synced_column() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        conn.execute(
            "INSERT INTO evaluation_log (text, mode, is_valid, profanity_score, censored_text)
             VALUES ('hi', 'Rules', 1, 0, 'hi')",
            [],
        )
        .unwrap();

        // New rows default to unsynced
        let synced: bool = conn
            .query_row("SELECT synced FROM evaluation_log WHERE id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert!(!synced);
    }

    #[test]
    fn test_migration_v2_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        // Run create_tables three times — the migration should only run once
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();

        let versions: Vec<i64> = conn
            .prepare("SELECT version FROM schema_version ORDER BY version")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(versions, vec![1, 2]);
    }
}

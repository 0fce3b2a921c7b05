// Database trait — backend-agnostic async interface for all DB operations.
//
// Implemented by SqliteDatabase (wraps rusqlite). All methods are async
// so the synchronous rusqlite backend (behind a Mutex) and any future
// native-async backend fit behind a single interface.

use anyhow::Result;
use async_trait::async_trait;

use super::models::EvaluationRecord;
use crate::engine::traits::Evaluation;
use crate::lists::{ListKind, WordLists};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Sync state ---

    /// Get a sync state value by key (e.g., "last_push_at").
    async fn get_sync_state(&self, key: &str) -> Result<Option<String>>;

    /// Set a sync state value (upsert).
    async fn set_sync_state(&self, key: &str, value: &str) -> Result<()>;

    // --- Word lists ---

    /// Add an already-normalized word. Returns false if already present.
    async fn add_word(&self, kind: ListKind, word: &str) -> Result<bool>;

    /// Remove a word. Returns whether it was present.
    async fn remove_word(&self, kind: ListKind, word: &str) -> Result<bool>;

    /// Load one list's words in insertion order.
    async fn get_words(&self, kind: ListKind) -> Result<Vec<String>>;

    /// Replace one list's contents wholesale (transactional).
    async fn replace_words(&self, kind: ListKind, words: &[String]) -> Result<()>;

    /// Replace both lists atomically: either the full new state lands
    /// or the local lists stay as they were.
    async fn replace_word_lists(&self, lists: &WordLists) -> Result<()>;

    /// Load both lists as the model the evaluators consume.
    async fn load_word_lists(&self) -> Result<WordLists> {
        Ok(WordLists::new(
            self.get_words(ListKind::Blacklist).await?,
            self.get_words(ListKind::Whitelist).await?,
        ))
    }

    // --- Evaluation log ---

    /// Record an evaluation and return its row ID.
    async fn insert_evaluation(
        &self,
        text: &str,
        mode: &str,
        evaluation: &Evaluation,
    ) -> Result<i64>;

    /// Get the most recent evaluations, newest first.
    async fn get_recent_evaluations(&self, limit: u32) -> Result<Vec<EvaluationRecord>>;

    /// Get all evaluations not yet pushed to the log server, oldest first.
    async fn get_unsynced_evaluations(&self) -> Result<Vec<EvaluationRecord>>;

    /// Mark an evaluation as accepted by the log server.
    async fn mark_evaluation_synced(&self, id: i64) -> Result<()>;

    /// Total number of logged evaluations.
    async fn evaluation_count(&self) -> Result<i64>;

    /// Number of evaluations still waiting to be pushed.
    async fn unsynced_count(&self) -> Result<i64>;

    /// Timestamp of the most recent evaluation, if any.
    async fn last_evaluation_at(&self) -> Result<Option<String>>;
}

// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is
// !Send. Trait methods lock the mutex, do synchronous rusqlite work, and
// return. The lock is never held across .await points.
//
// The free functions in queries.rs remain usable against a plain
// Connection, so schema tests don't need the async wrapper.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::EvaluationRecord;
use super::traits::Database;
use crate::engine::traits::Evaluation;
use crate::lists::{ListKind, WordLists};

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn get_sync_state(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::get_sync_state(&conn, key)
    }

    async fn set_sync_state(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::set_sync_state(&conn, key, value)
    }

    async fn add_word(&self, kind: ListKind, word: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::add_word(&conn, kind, word)
    }

    async fn remove_word(&self, kind: ListKind, word: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::remove_word(&conn, kind, word)
    }

    async fn get_words(&self, kind: ListKind) -> Result<Vec<String>> {
        let conn = self.conn.lock().await;
        super::queries::get_words(&conn, kind)
    }

    async fn replace_words(&self, kind: ListKind, words: &[String]) -> Result<()> {
        let mut conn = self.conn.lock().await;
        super::queries::replace_words(&mut conn, kind, words)
    }

    async fn replace_word_lists(&self, lists: &WordLists) -> Result<()> {
        let mut conn = self.conn.lock().await;
        super::queries::replace_word_lists(&mut conn, lists)
    }

    async fn insert_evaluation(
        &self,
        text: &str,
        mode: &str,
        evaluation: &Evaluation,
    ) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_evaluation(&conn, text, mode, evaluation)
    }

    async fn get_recent_evaluations(&self, limit: u32) -> Result<Vec<EvaluationRecord>> {
        let conn = self.conn.lock().await;
        super::queries::get_recent_evaluations(&conn, limit)
    }

    async fn get_unsynced_evaluations(&self) -> Result<Vec<EvaluationRecord>> {
        let conn = self.conn.lock().await;
        super::queries::get_unsynced_evaluations(&conn)
    }

    async fn mark_evaluation_synced(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::mark_evaluation_synced(&conn, id)
    }

    async fn evaluation_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::evaluation_count(&conn)
    }

    async fn unsynced_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::unsynced_count(&conn)
    }

    async fn last_evaluation_at(&self) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::last_evaluation_at(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn eval(is_valid: bool, score: u8, censored: &str) -> Evaluation {
        Evaluation {
            is_valid,
            profanity_score: score,
            censored_text: censored.to_string(),
        }
    }

    async fn test_db() -> SqliteDatabase {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteDatabase::new(conn)
    }

    #[tokio::test]
    async fn test_trait_sync_state_roundtrip() {
        let db = test_db().await;
        assert_eq!(db.get_sync_state("last_push_at").await.unwrap(), None);
        db.set_sync_state("last_push_at", "2026-08-30T12:00:00Z")
            .await
            .unwrap();
        assert_eq!(
            db.get_sync_state("last_push_at").await.unwrap(),
            Some("2026-08-30T12:00:00Z".to_string())
        );
    }

    #[tokio::test]
    async fn test_trait_word_roundtrip() {
        let db = test_db().await;
        assert!(db.add_word(ListKind::Blacklist, "damn").await.unwrap());
        // Second insert of the same word is a no-op
        assert!(!db.add_word(ListKind::Blacklist, "damn").await.unwrap());
        // Same word on the other list is a separate row
        assert!(db.add_word(ListKind::Whitelist, "damn").await.unwrap());

        let blacklist = db.get_words(ListKind::Blacklist).await.unwrap();
        assert_eq!(blacklist, vec!["damn".to_string()]);

        assert!(db.remove_word(ListKind::Blacklist, "damn").await.unwrap());
        assert!(!db.remove_word(ListKind::Blacklist, "damn").await.unwrap());
        assert!(db.get_words(ListKind::Blacklist).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trait_words_keep_insertion_order() {
        let db = test_db().await;
        db.add_word(ListKind::Blacklist, "zeta").await.unwrap();
        db.add_word(ListKind::Blacklist, "alpha").await.unwrap();
        let words = db.get_words(ListKind::Blacklist).await.unwrap();
        assert_eq!(words, vec!["zeta".to_string(), "alpha".to_string()]);
    }

    #[tokio::test]
    async fn test_trait_replace_words() {
        let db = test_db().await;
        db.add_word(ListKind::Whitelist, "old").await.unwrap();
        db.replace_words(ListKind::Whitelist, &["new".to_string(), "words".to_string()])
            .await
            .unwrap();
        let words = db.get_words(ListKind::Whitelist).await.unwrap();
        assert_eq!(words, vec!["new".to_string(), "words".to_string()]);
    }

    #[tokio::test]
    async fn test_trait_replace_word_lists_swaps_both_lists() {
        let db = test_db().await;
        db.add_word(ListKind::Blacklist, "stale").await.unwrap();
        db.add_word(ListKind::Whitelist, "stale").await.unwrap();

        let lists = WordLists::new(vec!["damn".to_string()], vec!["classic".to_string()]);
        db.replace_word_lists(&lists).await.unwrap();

        assert_eq!(
            db.get_words(ListKind::Blacklist).await.unwrap(),
            vec!["damn".to_string()]
        );
        assert_eq!(
            db.get_words(ListKind::Whitelist).await.unwrap(),
            vec!["classic".to_string()]
        );
    }

    #[tokio::test]
    async fn test_trait_load_word_lists() {
        let db = test_db().await;
        db.add_word(ListKind::Blacklist, "bad").await.unwrap();
        db.add_word(ListKind::Whitelist, "fine").await.unwrap();
        let lists = db.load_word_lists().await.unwrap();
        assert_eq!(lists.blacklist(), &["bad".to_string()]);
        assert!(lists.is_whitelisted("fine"));
    }

    #[tokio::test]
    async fn test_trait_evaluation_log_roundtrip() {
        let db = test_db().await;
        let id = db
            .insert_evaluation("you ass", "Rules", &eval(false, 4, "you ***"))
            .await
            .unwrap();
        assert!(id > 0);

        let records = db.get_recent_evaluations(10).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mode, "Rules");
        assert_eq!(records[0].profanity_score, 4);
        assert!(!records[0].is_valid);
        assert_eq!(records[0].censored_text, "you ***");
        assert!(!records[0].synced);

        let roundtrip = records[0].evaluation();
        assert_eq!(roundtrip, eval(false, 4, "you ***"));
    }

    #[tokio::test]
    async fn test_trait_recent_evaluations_newest_first() {
        let db = test_db().await;
        db.insert_evaluation("first", "Rules", &eval(true, 0, "first"))
            .await
            .unwrap();
        db.insert_evaluation("second", "LLM", &eval(true, 1, "second"))
            .await
            .unwrap();
        let records = db.get_recent_evaluations(10).await.unwrap();
        assert_eq!(records[0].text, "second");
        assert_eq!(records[1].text, "first");
    }

    #[tokio::test]
    async fn test_trait_sync_flow() {
        let db = test_db().await;
        let a = db
            .insert_evaluation("one", "Rules", &eval(true, 0, "one"))
            .await
            .unwrap();
        let b = db
            .insert_evaluation("two", "Rules", &eval(true, 0, "two"))
            .await
            .unwrap();

        assert_eq!(db.unsynced_count().await.unwrap(), 2);
        let unsynced = db.get_unsynced_evaluations().await.unwrap();
        // Oldest first, so push order matches evaluation order
        assert_eq!(unsynced[0].id, a);
        assert_eq!(unsynced[1].id, b);

        db.mark_evaluation_synced(a).await.unwrap();
        assert_eq!(db.unsynced_count().await.unwrap(), 1);
        assert_eq!(db.get_unsynced_evaluations().await.unwrap()[0].id, b);
    }

    #[tokio::test]
    async fn test_trait_counts_and_last_timestamp() {
        let db = test_db().await;
        assert_eq!(db.evaluation_count().await.unwrap(), 0);
        assert_eq!(db.last_evaluation_at().await.unwrap(), None);

        db.insert_evaluation("hi", "Rules", &eval(true, 0, "hi"))
            .await
            .unwrap();
        assert_eq!(db.evaluation_count().await.unwrap(), 1);
        assert!(db.last_evaluation_at().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let db = test_db().await;
        let count = db.table_count().await.unwrap();
        assert_eq!(count, 4);
    }
}

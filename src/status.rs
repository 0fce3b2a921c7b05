// System status display — shows DB stats, list sizes, and sync state.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::db::Database;
use crate::lists::ListKind;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, config: &Config) -> Result<()> {
    // Database file size
    let file_size = std::fs::metadata(&config.db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", config.db_path, file_size);

    // Word lists
    let blacklist_count = db.get_words(ListKind::Blacklist).await?.len();
    let whitelist_count = db.get_words(ListKind::Whitelist).await?.len();
    println!(
        "Word lists: {} blacklisted, {} whitelisted",
        blacklist_count, whitelist_count
    );
    if blacklist_count == 0 {
        println!("  Run `wordgate add blacklist <word>` to start building a list");
    }

    // Evaluation log
    let total = db.evaluation_count().await?;
    let unsynced = db.unsynced_count().await?;
    match db.last_evaluation_at().await? {
        Some(at) => {
            println!(
                "Evaluations: {} logged, {} unsynced (last: {})",
                total, unsynced, at
            );
        }
        None => {
            println!("Evaluations: none yet");
            println!("  Run `wordgate evaluate \"some text\"` to evaluate something");
        }
    }

    // Evaluator configuration
    let default_mode = match config.evaluator_backend {
        crate::config::EvaluatorBackend::Rules => "rules",
        crate::config::EvaluatorBackend::Llm => "llm",
    };
    let gemini = if config.gemini_api_key.is_empty() {
        "no API key"
    } else {
        "API key set"
    };
    println!("Evaluator: {} by default ({})", default_mode, gemini);

    // Server sync
    match config.server_url.as_deref() {
        Some(url) => {
            println!("List server: {}", url);
            if let Some(at) = db.get_sync_state("last_push_at").await? {
                println!("  Last push: {}", at);
            }
            if let Some(at) = db.get_sync_state("last_pull_at").await? {
                println!("  Last pull: {}", at);
            }
        }
        None => {
            println!("List server: not configured (lists and logs are local-only)");
        }
    }

    Ok(())
}

/// Quick existence check so `status` can print a friendly message instead
/// of the open error when `init` hasn't run yet.
pub fn database_exists(db_path: &str) -> bool {
    Path::new(db_path).exists()
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

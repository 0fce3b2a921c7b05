use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tracing::{info, warn};

use wordgate::config::{Config, EvaluatorBackend};
use wordgate::db::Database;
use wordgate::engine::gemini::GeminiEvaluator;
use wordgate::engine::rules::RuleEvaluator;
use wordgate::engine::traits::{EvaluationMode, Evaluator};
use wordgate::lists::{ListKind, WordLists};
use wordgate::remote::client::ListServerClient;

/// Wordgate: dual-mode profanity evaluation for user-submitted text.
///
/// Evaluates text against configurable blacklist/whitelist word sets,
/// either locally (word-boundary rules) or via the Gemini API
/// (contextual scoring). Lists and evaluation logs persist locally and
/// can sync to a list/log server.
#[derive(Parser)]
#[command(name = "wordgate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the local database
    Init,

    /// Evaluate a piece of text for profanity
    Evaluate {
        /// The text to evaluate
        text: String,

        /// Use the Gemini LLM path (overrides WORDGATE_EVALUATOR)
        #[arg(long, conflicts_with = "rules")]
        llm: bool,

        /// Force the local rules path (overrides WORDGATE_EVALUATOR)
        #[arg(long)]
        rules: bool,
    },

    /// Add a word to the blacklist or whitelist
    Add {
        /// Which list to add to
        list: ListKind,
        /// The word (stored lowercase)
        word: String,
    },

    /// Remove a word from the blacklist or whitelist
    Remove {
        /// Which list to remove from
        list: ListKind,
        /// The word to remove
        word: String,
    },

    /// Show both word lists
    Lists,

    /// Show the evaluation log
    Report {
        /// Max entries to show (default: 50)
        #[arg(long, default_value = "50")]
        limit: u32,

        /// Fetch the report from the log server instead of the local log
        #[arg(long)]
        remote: bool,
    },

    /// Push word lists and unsynced log entries to the list server
    Push,

    /// Replace local word lists with the server's
    Pull,

    /// Show system status (lists, log, sync state)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wordgate=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Wordgate database...");
            let config = Config::load()?;
            let db = wordgate::db::initialize(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nWordgate is ready. Next steps:");
            println!("  wordgate add blacklist <word>");
            println!("  wordgate evaluate \"some text\"");
        }

        Commands::Evaluate { text, llm, rules } => {
            let config = Config::load()?;
            let db = wordgate::db::open(&config.db_path)?;

            if text.trim().is_empty() {
                anyhow::bail!("Nothing to evaluate — the text is empty.");
            }

            let lists = db.load_word_lists().await?;
            let evaluator = select_evaluator(&config, llm, rules)?;

            if lists.blacklist().is_empty() && evaluator.mode() == EvaluationMode::Rules {
                println!(
                    "{}",
                    "Note: the blacklist is empty — the rules path will accept anything."
                        .dimmed()
                );
            }
            println!("Evaluating ({} mode)...", evaluator.mode());

            let evaluation = evaluator.evaluate(&text, &lists).await?;
            wordgate::output::terminal::display_evaluation(&evaluation);

            // Log locally first, then best-effort push. A server failure
            // must never fail the evaluation itself.
            let id = db
                .insert_evaluation(&text, evaluator.mode().as_str(), &evaluation)
                .await?;
            if let Ok(url) = config.require_server() {
                let client = ListServerClient::new(url)?;
                match client
                    .post_log(&text, evaluator.mode().as_str(), &evaluation)
                    .await
                {
                    Ok(()) => db.mark_evaluation_synced(id).await?,
                    Err(e) => {
                        warn!(error = %e, "Failed to send log entry to the server");
                        println!(
                            "  {} log entry kept locally; run `wordgate push` to retry",
                            "Warning:".yellow()
                        );
                    }
                }
            }
        }

        Commands::Add { list, word } => {
            let config = Config::load()?;
            let db = wordgate::db::open(&config.db_path)?;

            let Some(word) = WordLists::normalize(&word) else {
                anyhow::bail!("Cannot add an empty word.");
            };

            if db.add_word(list, &word).await? {
                println!("Added \"{word}\" to the {list}.");
                if list == ListKind::Whitelist {
                    println!(
                        "{}",
                        "Whitelisted words never trigger a match, even if blacklisted.".dimmed()
                    );
                }
                push_lists_if_configured(&config, &db).await?;
            } else {
                println!("\"{word}\" is already in the {list}.");
            }
        }

        Commands::Remove { list, word } => {
            let config = Config::load()?;
            let db = wordgate::db::open(&config.db_path)?;

            let Some(word) = WordLists::normalize(&word) else {
                anyhow::bail!("Cannot remove an empty word.");
            };

            if db.remove_word(list, &word).await? {
                println!("Removed \"{word}\" from the {list}.");
                push_lists_if_configured(&config, &db).await?;
            } else {
                println!("\"{word}\" is not in the {list}.");
            }
        }

        Commands::Lists => {
            let config = Config::load()?;
            let db = wordgate::db::open(&config.db_path)?;
            let lists = db.load_word_lists().await?;
            wordgate::output::terminal::display_word_lists(&lists);
        }

        Commands::Report { limit, remote } => {
            let config = Config::load()?;

            if remote {
                let url = config.require_server()?;
                let client = ListServerClient::new(url)?;
                println!("Fetching report from {url}...");
                let report = client.fetch_report().await?;
                println!("\n{report}");
                return Ok(());
            }

            let db = wordgate::db::open(&config.db_path)?;
            let records = db.get_recent_evaluations(limit).await?;
            wordgate::output::terminal::display_report(&records);
        }

        Commands::Push => {
            let config = Config::load()?;
            let url = config.require_server()?;
            let db = wordgate::db::open(&config.db_path)?;
            let client = ListServerClient::new(url)?;

            println!("Pushing to {url}...");

            // Word lists first — the server stores them wholesale
            let lists = db.load_word_lists().await?;
            client.put_lists(&lists).await?;
            println!(
                "  {} word lists pushed ({} blacklisted, {} whitelisted)",
                "✓".green(),
                lists.blacklist().len(),
                lists.whitelist().len()
            );

            // Then any log entries the server hasn't seen yet
            let unsynced = db.get_unsynced_evaluations().await?;
            let mut pushed = 0;
            for record in &unsynced {
                match client
                    .post_log(&record.text, &record.mode, &record.evaluation())
                    .await
                {
                    Ok(()) => {
                        db.mark_evaluation_synced(record.id).await?;
                        pushed += 1;
                    }
                    Err(e) => {
                        // Stop at the first failure — entries push oldest
                        // first, so the log order on the server stays intact.
                        warn!(id = record.id, error = %e, "Failed to push log entry");
                        break;
                    }
                }
            }
            println!(
                "  {} {} of {} log entries pushed",
                "✓".green(),
                pushed,
                unsynced.len()
            );

            db.set_sync_state("last_push_at", &Utc::now().to_rfc3339())
                .await?;
            println!("\n{}", "Push complete.".bold());
        }

        Commands::Pull => {
            let config = Config::load()?;
            let url = config.require_server()?;
            let db = wordgate::db::open(&config.db_path)?;
            let client = ListServerClient::new(url)?;

            println!("Pulling word lists from {url}...");

            // Normalize on the way in — the server may hold entries from
            // clients that don't lowercase or trim.
            let remote = client.get_lists().await?;
            let lists = WordLists::new(remote.blacklist().to_vec(), remote.whitelist().to_vec());

            db.replace_word_lists(&lists).await?;
            db.set_sync_state("last_pull_at", &Utc::now().to_rfc3339())
                .await?;

            wordgate::output::terminal::display_word_lists(&lists);
            println!("{}", "Pull complete — local lists replaced.".bold());
        }

        Commands::Status => {
            let config = Config::load()?;
            if !wordgate::status::database_exists(&config.db_path) {
                println!("Database: not initialized");
                println!("\nRun `wordgate init` to set up the database.");
                return Ok(());
            }
            let db = wordgate::db::open(&config.db_path)?;
            wordgate::status::show(&db, &config).await?;
        }
    }

    Ok(())
}

/// Pick the evaluator: CLI flags win, then WORDGATE_EVALUATOR, then rules.
fn select_evaluator(config: &Config, llm: bool, rules: bool) -> Result<Box<dyn Evaluator>> {
    let use_llm = if llm {
        true
    } else if rules {
        false
    } else {
        config.evaluator_backend == EvaluatorBackend::Llm
    };

    if use_llm {
        config.require_gemini()?;
        info!("Using Gemini LLM evaluator");
        Ok(Box::new(GeminiEvaluator::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
        )))
    } else {
        info!("Using local rules evaluator");
        Ok(Box::new(RuleEvaluator))
    }
}

/// Mirror a list change to the server when one is configured.
/// Failures are warnings — the local database stays the source of truth
/// until the next `wordgate push`.
async fn push_lists_if_configured(config: &Config, db: &Arc<dyn Database>) -> Result<()> {
    let Ok(url) = config.require_server() else {
        return Ok(());
    };

    let client = ListServerClient::new(url)?;
    let lists = db.load_word_lists().await?;
    match client.put_lists(&lists).await {
        Ok(()) => info!("Word lists pushed to the server"),
        Err(e) => {
            warn!(error = %e, "Failed to push word lists to the server");
            println!(
                "  {} lists saved locally; run `wordgate push` to retry",
                "Warning:".yellow()
            );
        }
    }
    Ok(())
}

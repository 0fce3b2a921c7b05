use std::env;

use anyhow::Result;

/// Default Gemini endpoint. Overridable via GEMINI_API_URL so a different
/// model (or a mock server in tests) can be swapped in.
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

/// Which evaluation path to use by default.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluatorBackend {
    /// Local word-list matching (default) — no API key needed, no network
    Rules,
    /// Gemini LLM contextual scoring — requires GEMINI_API_KEY
    Llm,
}

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    /// Which evaluator to use when no CLI flag overrides it (default: Rules)
    pub evaluator_backend: EvaluatorBackend,
    pub db_path: String,
    /// Base URL of the list/log server (e.g. https://words.example.com/api).
    /// When unset, lists and logs are local-only.
    pub server_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default or is optional — only the LLM path and
    /// the sync commands have hard requirements, checked via the
    /// require_* methods.
    pub fn load() -> Result<Self> {
        let evaluator_backend = match env::var("WORDGATE_EVALUATOR").as_deref() {
            Ok("llm") => EvaluatorBackend::Llm,
            // "rules" or unset both default to the local path
            _ => EvaluatorBackend::Rules,
        };

        Ok(Self {
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
            evaluator_backend,
            db_path: env::var("WORDGATE_DB_PATH").unwrap_or_else(|_| "./wordgate.db".to_string()),
            server_url: env::var("WORDGATE_SERVER_URL").ok(),
        })
    }

    /// Check that the Gemini API key is configured.
    /// Call this before any operation that uses the LLM evaluator.
    pub fn require_gemini(&self) -> Result<()> {
        if self.gemini_api_key.is_empty() {
            anyhow::bail!(
                "GEMINI_API_KEY not set. Add it to your .env file,\n\
                 or use the rules evaluator instead (drop --llm)."
            );
        }
        Ok(())
    }

    /// Check that a list/log server is configured, returning its base URL.
    /// Call this before push/pull or remote report operations.
    pub fn require_server(&self) -> Result<&str> {
        match self.server_url.as_deref() {
            Some(url) if !url.is_empty() => Ok(url),
            _ => anyhow::bail!(
                "WORDGATE_SERVER_URL not set. Add it to your .env file to\n\
                 sync word lists and logs with a server."
            ),
        }
    }
}

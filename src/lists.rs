// Word list model — the blacklist and whitelist that drive evaluation.
//
// Words are stored lowercase, trimmed, and deduplicated, in insertion
// order (the order only matters for display — matching is order-free).
// The one invariant that matters: a word present in both lists is
// whitelisted, and must never trigger invalidation or censorship.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which of the two word lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Blacklist,
    Whitelist,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Blacklist => "blacklist",
            ListKind::Whitelist => "whitelist",
        }
    }
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The blacklist/whitelist pair used by both evaluation paths.
///
/// Also doubles as the wire shape for the list server's `/lists`
/// endpoint — a missing field deserializes as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordLists {
    #[serde(default)]
    blacklist: Vec<String>,
    #[serde(default)]
    whitelist: Vec<String>,
}

impl WordLists {
    /// Build word lists from raw entries, normalizing and deduplicating.
    pub fn new(blacklist: Vec<String>, whitelist: Vec<String>) -> Self {
        let mut lists = Self::default();
        for word in blacklist {
            lists.add(ListKind::Blacklist, &word);
        }
        for word in whitelist {
            lists.add(ListKind::Whitelist, &word);
        }
        lists
    }

    /// Normalize a raw entry: trim and lowercase. Returns None for entries
    /// that are empty after trimming, since they can never match anything.
    pub fn normalize(word: &str) -> Option<String> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            None
        } else {
            Some(word)
        }
    }

    /// Add a word to a list. Returns false if the entry was empty or the
    /// word was already present.
    pub fn add(&mut self, kind: ListKind, word: &str) -> bool {
        let Some(word) = Self::normalize(word) else {
            return false;
        };
        let list = self.list_mut(kind);
        if list.contains(&word) {
            return false;
        }
        list.push(word);
        true
    }

    /// Remove a word from a list. Returns whether it was present.
    pub fn remove(&mut self, kind: ListKind, word: &str) -> bool {
        let Some(word) = Self::normalize(word) else {
            return false;
        };
        let list = self.list_mut(kind);
        let before = list.len();
        list.retain(|w| w != &word);
        list.len() < before
    }

    pub fn words(&self, kind: ListKind) -> &[String] {
        match kind {
            ListKind::Blacklist => &self.blacklist,
            ListKind::Whitelist => &self.whitelist,
        }
    }

    pub fn blacklist(&self) -> &[String] {
        &self.blacklist
    }

    pub fn whitelist(&self) -> &[String] {
        &self.whitelist
    }

    /// Whitelist membership check against an already-lowercased word.
    pub fn is_whitelisted(&self, word: &str) -> bool {
        self.whitelist.iter().any(|w| w == word)
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut Vec<String> {
        match kind {
            ListKind::Blacklist => &mut self.blacklist,
            ListKind::Whitelist => &mut self.whitelist,
        }
    }
}

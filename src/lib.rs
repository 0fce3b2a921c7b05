// Wordgate: dual-mode profanity evaluation for user-submitted text.
//
// This is the library root. Each module corresponds to a major subsystem:
// the evaluation engine (local rules + remote LLM), the word-list model,
// local persistence, and the remote list/log server client.

pub mod config;
pub mod db;
pub mod engine;
pub mod lists;
pub mod output;
pub mod remote;
pub mod status;

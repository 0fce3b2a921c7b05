// Gemini LLM evaluation — the remote, contextual path.
//
// The model receives both word lists inside a moderation prompt and is
// asked to reply with a bare JSON object matching the Evaluation shape.
// Models wrap JSON in prose or code fences often enough that the parse
// is best-effort: the substring from the first `{` to the last `}` is
// extracted and parsed as a fallible operation, never a silent default.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{Evaluation, EvaluationMode, Evaluator};
use crate::lists::WordLists;

/// Gemini-backed evaluator.
pub struct GeminiEvaluator {
    client: Client,
    api_key: String,
    api_url: String,
}

impl GeminiEvaluator {
    /// Create a new Gemini evaluator with the given API key and endpoint.
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url,
        }
    }

    /// Build the moderation prompt with both word lists interpolated.
    fn build_prompt(text: &str, lists: &WordLists) -> String {
        format!(
            "You are a content moderation expert. Your task is to analyze the following text and determine its profanity level.\n\
             You must follow these rules strictly:\n\
             1. Blacklist: if a word from the text is in this list of forbidden words, the text is automatically invalid and must be censored. Blacklist: [{blacklist}]\n\
             2. Whitelist: if a word from the text is on this list, it is acceptable and must not be flagged as profanity, even if it seems offensive. Whitelist: [{whitelist}]\n\
             3. Contextual analysis: if there are no blacklisted words, use your judgment to evaluate the text's intent and context.\n\
             4. Scoring: assign a profanity score from 0 to 5:\n\
                - 0: totally acceptable and respectful.\n\
                - 1: slightly inappropriate or ambiguous.\n\
                - 2: clearly rude but low-impact.\n\
                - 3: offensive and vulgar.\n\
                - 4: contains strong insults or blacklisted words.\n\
                - 5: hate speech, direct threats, or extremely toxic content.\n\
             5. Censoring: replace each letter of the words you consider profane (especially blacklisted ones) with an asterisk (*).\n\
             \n\
             The text to analyze is: \"{text}\"\n\
             \n\
             Your response MUST be only a valid JSON object with this structure, with no additional text before or after:\n\
             {{\"isValid\": boolean, \"profanityScore\": number, \"censoredText\": \"string\"}}",
            blacklist = lists.blacklist().join(", "),
            whitelist = lists.whitelist().join(", "),
            text = text,
        )
    }
}

#[async_trait]
impl Evaluator for GeminiEvaluator {
    async fn evaluate(&self, text: &str, lists: &WordLists) -> Result<Evaluation> {
        let url = format!("{}?key={}", self.api_url, self.api_key);

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![Part {
                    text: Self::build_prompt(text, lists),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to call the Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API returned {}: {}", status, body);
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        let raw = &result
            .candidates
            .first()
            .context("Gemini returned no candidates")?
            .content
            .parts
            .first()
            .context("Gemini candidate has no parts")?
            .text;

        // Model output is arbitrary text; byte slicing could land
        // mid-character, so truncate by chars.
        debug!(
            raw_preview = %crate::output::truncate_chars(raw, 80),
            "Received model output"
        );

        extract_json(raw)
    }

    fn mode(&self) -> EvaluationMode {
        EvaluationMode::Llm
    }
}

/// Extract and parse the JSON evaluation from free-form model output.
///
/// Takes the substring from the first `{` to the last `}` so a reply
/// wrapped in prose or a code fence still parses. Out-of-range scores
/// are rejected rather than clamped.
pub fn extract_json(raw: &str) -> Result<Evaluation> {
    let start = raw.find('{').context("No JSON object in model output")?;
    let end = raw.rfind('}').context("No JSON object in model output")?;
    if end < start {
        anyhow::bail!("Malformed JSON object in model output");
    }

    let evaluation: Evaluation = serde_json::from_str(&raw[start..=end])
        .context("Model output is not the expected JSON shape")?;

    if evaluation.profanity_score > 5 {
        anyhow::bail!(
            "Model returned out-of-range profanity score {}",
            evaluation.profanity_score
        );
    }

    Ok(evaluation)
}

// --- Gemini generateContent request/response types ---

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

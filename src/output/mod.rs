// Output formatting — terminal display for results, lists, and reports.

pub mod terminal;

/// Cut a string down to `max_chars` characters, marking the cut with "...".
///
/// Counts characters rather than bytes, so evaluated text and model
/// output containing accents or emoji can be previewed at any width
/// without hitting a char-boundary panic.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

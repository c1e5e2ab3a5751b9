pub mod panels;
pub mod plot;

/// Shorten `text` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

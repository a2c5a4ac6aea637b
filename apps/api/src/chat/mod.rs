pub mod handlers;
pub mod store;

/// Longest chat title taken verbatim from the first message.
const TITLE_MAX_CHARS: usize = 40;

/// Title for a new chat: the first message, cut to 40 characters with "..." when longer.
pub fn derive_chat_title(first_message: &str) -> String {
    let text = first_message.trim();
    match text.char_indices().nth(TITLE_MAX_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

//! House-style post-processing for generated text. Nothing fancier than
//! truncation and punctuation stripping by design.

pub const MAX_POST_CHARS: usize = 280;
pub const MAX_REPLY_CHARS: usize = 220;

/// Truncate to at most `max` characters on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Full-post style: trimmed and capped at the tweet limit.
pub fn enforce_post_style(text: &str) -> String {
    truncate_chars(text.trim(), MAX_POST_CHARS)
}

/// Reply style: trimmed, a trailing "..." becomes an ellipsis, otherwise
/// one trailing period is stripped (replies never end with a period),
/// then capped at the reply limit.
pub fn enforce_house_style(text: &str) -> String {
    let t = text.trim();
    let styled = if let Some(stripped) = t.strip_suffix("...") {
        format!("{stripped}…")
    } else if let Some(stripped) = t.strip_suffix('.') {
        stripped.to_string()
    } else {
        t.to_string()
    };
    truncate_chars(&styled, MAX_REPLY_CHARS)
}

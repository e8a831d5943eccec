//! Title cleanup for compact product cards.

/// Placeholder returned for an absent or empty title.
pub const NO_TITLE_LABEL: &str = "No Title";

const ELLIPSIS: &str = "...";

/// Cleans and shortens a product title to at most `max_chars` characters
/// (plus a trailing `...` when cut).
///
/// Whitespace runs collapse to one space, characters outside
/// `U+0800..=U+9FA5`, ASCII letters and digits, and `- _ ( ) [ ] /` are
/// dropped, and repeated words keep only their first occurrence. When cutting, the text breaks at the last
/// space if that space lies past 70% of the limit.
#[must_use]
pub fn truncate_title(text: &str, max_chars: usize) -> String {
    if text.is_empty() {
        return NO_TITLE_LABEL.to_owned();
    }

    let kept: String = text.chars().filter(|c| is_title_char(*c)).collect();

    let mut words: Vec<&str> = Vec::new();
    for word in kept.split_whitespace() {
        if !words.contains(&word) {
            words.push(word);
        }
    }
    let clean = words.join(" ");

    if clean.chars().count() <= max_chars {
        return clean;
    }

    let truncated: String = clean.chars().take(max_chars).collect();
    let last_space = truncated
        .rfind(' ')
        .map(|byte_idx| (byte_idx, truncated[..byte_idx].chars().count()));

    match last_space {
        Some((byte_idx, char_idx)) if char_idx * 10 > max_chars * 7 => {
            format!("{}{ELLIPSIS}", &truncated[..byte_idx])
        }
        _ => format!("{truncated}{ELLIPSIS}"),
    }
}

fn is_title_char(c: char) -> bool {
    matches!(c, '\u{0800}'..='\u{9FA5}')
        || c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '-' | '_' | '(' | ')' | '[' | ']' | '/')
}

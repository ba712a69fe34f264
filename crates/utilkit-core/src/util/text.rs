//! Text cleanup helpers: emoji removal, whitespace normalization,
//! character-count truncation and comma-separated lists.

use once_cell::sync::Lazy;
use regex::Regex;

/// Emoji code points and sequences.
///
/// Keycaps come first so the base digit goes with its combining mark. A
/// pictograph or flag letter swallows trailing skin tones, VS16 and tag
/// characters, plus any ZWJ-joined pictographs after it. Stray modifiers and
/// VS16 are removed on their own.
static EMOJI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[#*0-9]\x{FE0F}?\x{20E3}",
        r"|(?:\p{Extended_Pictographic}|\p{Regional_Indicator})",
        r"(?:\p{Emoji_Modifier}|\x{FE0F}|[\x{E0020}-\x{E007F}])*",
        r"(?:\x{200D}\p{Extended_Pictographic}(?:\p{Emoji_Modifier}|\x{FE0F})*)*",
        r"|\p{Emoji_Modifier}",
        r"|\x{FE0F}",
    ))
    .expect("emoji pattern is valid")
});

/// Remove all emoji from `s`, leaving every other character in place.
pub fn remove_emojis(s: &str) -> String {
    EMOJI_RE.replace_all(s, "").into_owned()
}

/// Collapse whitespace runs (spaces, tabs, newlines, ...) into single spaces
/// and trim both ends.
pub fn normalize_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove emoji, then normalize whitespace.
///
/// The order matters: removing an emoji can leave a gap of spaces behind.
pub fn clean_string_from_emojis(s: &str) -> String {
    normalize_spaces(&remove_emojis(s))
}

/// Truncate `s` to at most `max_len` characters and append `suffix`.
///
/// Length is counted in `char`s, not bytes. Trailing whitespace at the cut
/// point is dropped before the suffix; leading whitespace is kept. A
/// `max_len` of zero yields just the suffix for non-empty input and `""`
/// for empty input. The suffix itself is never counted against `max_len`.
pub fn truncate(s: &str, max_len: usize, suffix: &str) -> String {
    if max_len == 0 {
        return if s.is_empty() {
            String::new()
        } else {
            suffix.to_string()
        };
    }

    let end = match s.char_indices().nth(max_len) {
        Some((idx, _)) => idx,
        None => return s.to_string(),
    };

    let mut out = s[..end].trim_end().to_string();
    out.push_str(suffix);
    out
}

/// Split a comma-separated list, trimming each item and dropping empty ones.
///
/// Returns an empty vector for empty or all-blank input.
pub fn parse_comma_separated_list(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }

    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

//! Utterance normalization and word-boundary matching helpers.
//!
//! Every matcher in the crate runs on the output of [`normalize`], so the
//! helpers below can assume lowercase ASCII-apostrophe text with single
//! spaces between tokens.

/// Apostrophe look-alikes produced by keyboards and speech-to-text engines.
const QUOTE_VARIANTS: [char; 7] = [
    '\u{2018}', // left single quotation mark
    '\u{2019}', // right single quotation mark
    '\u{201A}', // single low-9 quotation mark
    '\u{201B}', // single high-reversed-9 quotation mark
    '\u{2032}', // prime
    '`',
    '\u{00B4}', // acute accent
];

/// Canonicalize raw utterance text into a matchable token stream.
///
/// Lowercases, maps smart quotes to `'`, drops everything that is not a
/// letter, digit, underscore, whitespace or apostrophe, collapses whitespace
/// runs and trims. Idempotent.
pub fn normalize(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .map(|c| if QUOTE_VARIANTS.contains(&c) { '\'' } else { c })
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '\''))
        .collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `word` appears in `text` as a whole token.
pub fn contains_word(text: &str, word: &str) -> bool {
    text.split_whitespace().any(|t| t == word)
}

/// Whether `phrase` appears in `text` on token boundaries.
///
/// `"open vs code"` matches `"please open vs code now"` but `"hi"` does not
/// match `"this"`.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    format!(" {text} ").contains(&format!(" {phrase} "))
}

/// Whether any of `phrases` appears in `text` on token boundaries.
pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| contains_phrase(text, p))
}

/// Remove every token-aligned occurrence of `phrase` and re-collapse spacing.
pub fn strip_phrase(text: &str, phrase: &str) -> String {
    if phrase.is_empty() {
        return text.to_owned();
    }
    let mut padded = format!(" {text} ");
    let needle = format!(" {phrase} ");
    while let Some(pos) = padded.find(&needle) {
        padded.replace_range(pos..pos + needle.len(), " ");
    }
    padded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse a target name for tolerant comparison: `"you tube"`,
/// `"youtube"` and `"you'tube"` all become `"youtube"`.
pub fn compact(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '\'')
        .collect()
}

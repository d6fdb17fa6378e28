//! Log sanitization utilities
//!
//! Keeps registrar payloads (full host record dumps, API keys echoed back in
//! error pages) from being fully exposed in debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters left visible by [`mask_secret`].
const MASK_VISIBLE_PREFIX: usize = 4;

/// Byte offset of the `n`th char, or the full length if the string is shorter.
fn char_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

/// Cut a registrar body down to `TRUNCATE_LIMIT` chars for a log line.
///
/// The suffix reports the full size so a truncated log still shows whether the
/// registrar sent a short error document or a full host list.
pub fn truncate_for_log(s: &str) -> String {
    let cut = char_offset(s, TRUNCATE_LIMIT);
    if cut == s.len() {
        return s.to_string();
    }
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Mask a secret for `Debug` output.
///
/// Short secrets are hidden entirely; longer ones keep a short prefix so two
/// keys can still be told apart in a log.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= MASK_VISIBLE_PREFIX * 2 {
        return "****".to_string();
    }
    format!("{}****", &secret[..char_offset(secret, MASK_VISIBLE_PREFIX)])
}

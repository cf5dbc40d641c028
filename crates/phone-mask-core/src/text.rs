//! Char-indexed string helpers.
//!
//! Display offsets, selection ranges and digit indices are all counted in
//! characters (runes), never in bytes. Masks and digit buffers are ASCII in
//! practice, but callers may hand the engine arbitrary text, so every slice
//! goes through these helpers instead of raw byte indexing.

/// Count the number of characters (runes) in a string.
///
/// # Examples
///
/// ```
/// use phone_mask_core::text::rune_count;
///
/// assert_eq!(rune_count("201-555"), 7);
/// assert_eq!(rune_count("🇺🇸"), 2);
/// ```
pub fn rune_count(s: &str) -> usize {
    s.chars().count()
}

/// Convert a rune index to a byte index, clamping to the end of the string.
pub fn byte_index_from_rune_index(s: &str, rune_index: usize) -> usize {
    s.char_indices()
        .nth(rune_index)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(s.len())
}

/// Extract a substring by rune indices (not byte indices).
///
/// Out-of-range indices are clamped and an inverted range yields `""`.
///
/// # Examples
///
/// ```
/// use phone_mask_core::text::rune_slice;
///
/// assert_eq!(rune_slice("2015551234", 3, 6), "555");
/// assert_eq!(rune_slice("201", 2, 10), "1");
/// assert_eq!(rune_slice("201", 2, 1), "");
/// ```
pub fn rune_slice(s: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let start_byte = byte_index_from_rune_index(s, start);
    let end_byte = byte_index_from_rune_index(s, end);
    &s[start_byte..end_byte]
}

/// Replace the rune range `[start, end)` of `s` with `insert`.
///
/// # Examples
///
/// ```
/// use phone_mask_core::text::splice;
///
/// assert_eq!(splice("2015551234", 3, 6, ""), "2011234");
/// assert_eq!(splice("2011234", 3, 3, "555"), "2015551234");
/// ```
pub fn splice(s: &str, start: usize, end: usize, insert: &str) -> String {
    let total = rune_count(s);
    let start = start.min(total);
    let end = end.clamp(start, total);

    let mut out = String::with_capacity(s.len() + insert.len());
    out.push_str(rune_slice(s, 0, start));
    out.push_str(insert);
    out.push_str(rune_slice(s, end, total));
    out
}

/// Keep at most `max` leading characters of `s`.
pub fn truncate_runes(s: &str, max: usize) -> &str {
    &s[..byte_index_from_rune_index(s, max)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rune_count() {
        assert_eq!(rune_count(""), 0);
        assert_eq!(rune_count("(201) 555-1234"), 14);
        assert_eq!(rune_count("+7 ### ###-##-##"), 16);
        assert_eq!(rune_count("café"), 4);
    }

    #[test]
    fn test_rune_slice() {
        assert_eq!(rune_slice("hello", 0, 5), "hello");
        assert_eq!(rune_slice("hello", 1, 4), "ell");
        assert_eq!(rune_slice("hello", 0, 0), "");
        assert_eq!(rune_slice("日本語テキスト", 1, 3), "本語");
        assert_eq!(rune_slice("hello", 3, 100), "lo");
        assert_eq!(rune_slice("hello", 100, 200), "");
    }

    #[test]
    fn test_splice() {
        assert_eq!(splice("", 0, 0, "123"), "123");
        assert_eq!(splice("12345", 1, 3, ""), "145");
        assert_eq!(splice("12345", 5, 5, "6"), "123456");
        // Out-of-range indices clamp to the end
        assert_eq!(splice("123", 7, 9, "4"), "1234");
        // Inverted range behaves like an insertion at `start`
        assert_eq!(splice("123", 2, 1, "x"), "12x3");
    }

    #[test]
    fn test_truncate_runes() {
        assert_eq!(truncate_runes("2015551234", 4), "2015");
        assert_eq!(truncate_runes("201", 10), "201");
        assert_eq!(truncate_runes("", 0), "");
    }
}

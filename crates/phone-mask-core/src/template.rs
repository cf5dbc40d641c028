//! Mask template primitives.
//!
//! A mask template is a string of literal characters and `#` placeholders,
//! optionally prefixed with the country calling code (`"+1 ###-###-####"`).
//! Each placeholder holds exactly one digit.

/// The character that marks a digit slot in a mask template.
pub const PLACEHOLDER: char = '#';

/// Remove a leading `+<digits>` calling code and at most one following
/// whitespace character.
///
/// Templates without a calling code are returned unchanged.
///
/// # Examples
///
/// ```
/// use phone_mask_core::template::strip_country_prefix;
///
/// assert_eq!(strip_country_prefix("+1 ###-###-####"), "###-###-####");
/// assert_eq!(strip_country_prefix("+86 (###)####-###"), "(###)####-###");
/// assert_eq!(strip_country_prefix("(###) ###-####"), "(###) ###-####");
/// ```
pub fn strip_country_prefix(template: &str) -> &str {
    let Some(rest) = template.strip_prefix('+') else {
        return template;
    };

    let code_len = rest.chars().take_while(char::is_ascii_digit).count();
    if code_len == 0 {
        return template;
    }

    // Calling-code digits are ASCII, so the char count is also a byte count.
    let rest = &rest[code_len..];
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str(),
        _ => rest,
    }
}

/// Count the `#` placeholders in a template.
pub fn count_placeholders(template: &str) -> usize {
    template.chars().filter(|&c| c == PLACEHOLDER).count()
}

/// Pick the variant that best fits `typed_digits` digits.
///
/// With a single variant that variant is returned. Otherwise the variant
/// with the smallest placeholder count that can still hold `typed_digits`
/// wins (first in input order on ties). When `typed_digits` exceeds every
/// variant's capacity the largest variant is returned so the caller can
/// render before truncating. Returns `None` only for an empty list.
///
/// # Examples
///
/// ```
/// use phone_mask_core::template::pick_variant;
///
/// let variants = ["+86 (###)####-###", "+86 (###)####-####"];
/// assert_eq!(pick_variant(&variants, 5), Some("+86 (###)####-###"));
/// assert_eq!(pick_variant(&variants, 11), Some("+86 (###)####-####"));
/// assert_eq!(pick_variant(&variants, 30), Some("+86 (###)####-####"));
/// ```
pub fn pick_variant<S: AsRef<str>>(variants: &[S], typed_digits: usize) -> Option<&str> {
    if let [only] = variants {
        return Some(only.as_ref());
    }

    let mut best_fit: Option<(&str, usize)> = None;
    let mut largest: Option<(&str, usize)> = None;

    for variant in variants {
        let mask = variant.as_ref();
        let count = count_placeholders(mask);

        if count >= typed_digits && best_fit.map_or(true, |(_, best)| count < best) {
            best_fit = Some((mask, count));
        }
        if largest.map_or(true, |(_, most)| count > most) {
            largest = Some((mask, count));
        }
    }

    best_fit.or(largest).map(|(mask, _)| mask)
}

/// Extract the ASCII digits of `value`, dropping everything else.
///
/// # Examples
///
/// ```
/// use phone_mask_core::template::extract_digits;
///
/// assert_eq!(extract_digits("(201) 555-1234"), "2015551234");
/// assert_eq!(extract_digits("call me"), "");
/// ```
pub fn extract_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Extract the ASCII digits of `value`, keeping at most `max` of them.
pub fn extract_digits_limited(value: &str, max: usize) -> String {
    value.chars().filter(char::is_ascii_digit).take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_country_prefix() {
        assert_eq!(strip_country_prefix("+1 ###-###-####"), "###-###-####");
        assert_eq!(strip_country_prefix("+44 #### ######"), "#### ######");
        // No separating space: only the code goes
        assert_eq!(strip_country_prefix("+7(###)###-##-##"), "(###)###-##-##");
        // Only one space is consumed
        assert_eq!(strip_country_prefix("+49  ### ###"), " ### ###");
        // A bare plus is not a calling code
        assert_eq!(strip_country_prefix("+ ###"), "+ ###");
        assert_eq!(strip_country_prefix("###-####"), "###-####");
        assert_eq!(strip_country_prefix(""), "");
        assert_eq!(strip_country_prefix("+380"), "");
    }

    #[test]
    fn test_count_placeholders() {
        assert_eq!(count_placeholders("+1 ###-###-####"), 10);
        assert_eq!(count_placeholders("(###)####-###"), 10);
        assert_eq!(count_placeholders("+86"), 0);
        assert_eq!(count_placeholders(""), 0);
    }

    #[test]
    fn test_pick_variant_single() {
        let variants = ["+1 ###-###-####"];
        assert_eq!(pick_variant(&variants, 0), Some("+1 ###-###-####"));
        assert_eq!(pick_variant(&variants, 25), Some("+1 ###-###-####"));
    }

    #[test]
    fn test_pick_variant_smallest_fit() {
        let variants = vec![
            "+86 (###)####-####".to_string(),
            "+86 (###)####-###".to_string(),
        ];
        assert_eq!(pick_variant(&variants, 0), Some("+86 (###)####-###"));
        assert_eq!(pick_variant(&variants, 10), Some("+86 (###)####-###"));
        assert_eq!(pick_variant(&variants, 11), Some("+86 (###)####-####"));
    }

    #[test]
    fn test_pick_variant_ties_keep_input_order() {
        let variants = ["### ###", "###-###", "## ## ## ##"];
        assert_eq!(pick_variant(&variants, 4), Some("### ###"));
        assert_eq!(pick_variant(&variants, 7), Some("## ## ## ##"));
        // Overflow: first of the largest
        let variants = ["## ##", "####", "###"];
        assert_eq!(pick_variant(&variants, 9), Some("## ##"));
    }

    #[test]
    fn test_pick_variant_empty() {
        let variants: [&str; 0] = [];
        assert_eq!(pick_variant(&variants, 3), None);
    }

    #[test]
    fn test_extract_digits() {
        assert_eq!(extract_digits("+1 (201) 555-1234"), "12015551234");
        assert_eq!(extract_digits("٣٤٥"), "");
        assert_eq!(extract_digits_limited("2015551234999", 10), "2015551234");
        assert_eq!(extract_digits_limited("abc", 3), "");
        assert_eq!(extract_digits_limited("123", 0), "");
    }
}

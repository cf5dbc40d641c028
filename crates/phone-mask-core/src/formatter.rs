//! Formatter facade bound to one country's mask variants.
//!
//! A [`Formatter`] is built once per selected country and is immutable
//! afterwards. It holds no digits: every method takes the caller's current
//! digit buffer, so one formatter can be shared freely between inputs and
//! threads.

use std::ops::Range;

use crate::country::Country;
use crate::error::{MaskError, MaskResult};
use crate::render::{render, RenderResult};
use crate::template::{count_placeholders, pick_variant, strip_country_prefix};
use crate::text::rune_count;

/// Mask-aware formatting, caret and selection helpers for one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    /// Variants with the calling code removed, in input order.
    templates: Vec<String>,
    /// Placeholder count of each template.
    capacities: Vec<usize>,
    max_digits: usize,
    /// `+<digits>` prefix of the first variant, if it carried one.
    calling_code: String,
}

impl Formatter {
    /// Build a formatter from one or more mask variants.
    ///
    /// Variants may include the calling code (`"+1 ###-###-####"`) or not
    /// (`"###-###-####"`).
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::NoVariants`] when `variants` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use phone_mask_core::Formatter;
    ///
    /// let formatter = Formatter::new(["+1 ###-###-####"]).unwrap();
    /// assert_eq!(formatter.max_digits(), 10);
    /// assert_eq!(formatter.format_display("2015551234"), "201-555-1234");
    /// assert_eq!(formatter.calling_code(), "+1");
    /// ```
    pub fn new<I, S>(variants: I) -> MaskResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut calling_code = None;
        let mut templates = Vec::new();

        for variant in variants {
            let variant = variant.as_ref();
            let stripped = strip_country_prefix(variant);
            if calling_code.is_none() {
                let prefix = &variant[..variant.len() - stripped.len()];
                calling_code = Some(prefix.trim_end().to_string());
            }
            templates.push(stripped.to_string());
        }

        if templates.is_empty() {
            return Err(MaskError::NoVariants);
        }

        let capacities: Vec<usize> = templates.iter().map(|t| count_placeholders(t)).collect();
        let max_digits = capacities.iter().copied().max().unwrap_or(0);

        Ok(Formatter {
            templates,
            capacities,
            max_digits,
            calling_code: calling_code.unwrap_or_default(),
        })
    }

    /// Build a formatter for a country from the mask table.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::NoVariants`] when the country lists no masks.
    pub fn from_country(country: &Country) -> MaskResult<Self> {
        let mut formatter = Formatter::new(&country.masks)?;
        formatter.calling_code = country.code.clone();
        Ok(formatter)
    }

    /// The calling code (`"+1"`), or `""` when the masks carried none.
    pub fn calling_code(&self) -> &str {
        &self.calling_code
    }

    /// The templates this formatter chooses from, without calling code.
    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    /// The template used when `digit_count` digits are present.
    pub fn template_for(&self, digit_count: usize) -> &str {
        pick_variant(&self.templates, digit_count).unwrap_or_default()
    }

    /// Render `digits` through the template that fits their count.
    pub fn render(&self, digits: &str) -> RenderResult {
        render(self.template_for(rune_count(digits)), digits)
    }

    /// The formatted display string for `digits`.
    pub fn format_display(&self, digits: &str) -> String {
        self.render(digits).display
    }

    /// Placeholder text for an empty input: the smallest template itself.
    ///
    /// ```
    /// use phone_mask_core::Formatter;
    ///
    /// let formatter = Formatter::new(["+86 (###)####-####", "+86 (###)####-###"]).unwrap();
    /// assert_eq!(formatter.placeholder(), "(###)####-###");
    /// ```
    pub fn placeholder(&self) -> &str {
        self.template_for(0)
    }

    /// The largest digit count any variant accepts.
    pub fn max_digits(&self) -> usize {
        self.max_digits
    }

    /// Whether `digits` exactly fills one of the variants.
    pub fn is_complete(&self, digits: &str) -> bool {
        let count = rune_count(digits);
        self.capacities.contains(&count)
    }

    /// Display offset for a caret that sits after `digit_index` digits.
    ///
    /// The offset is measured against the render of `digit_index` digits,
    /// so a literal run that follows the last digit (`"201-"`) places the
    /// caret after it. The result is always a valid offset.
    ///
    /// ```
    /// use phone_mask_core::Formatter;
    ///
    /// let formatter = Formatter::new(["###-###-####"]).unwrap();
    /// assert_eq!(formatter.caret_position(0), 0);
    /// assert_eq!(formatter.caret_position(2), 2);
    /// assert_eq!(formatter.caret_position(3), 4);
    /// assert_eq!(formatter.caret_position(10), 12);
    /// ```
    pub fn caret_position(&self, digit_index: usize) -> usize {
        let digit_index = digit_index.min(self.max_digits);
        let synthetic = "0".repeat(digit_index);
        let RenderResult { map, .. } = render(self.template_for(digit_index), &synthetic);

        if let Some(pos) = map.iter().position(|slot| *slot == Some(digit_index)) {
            return pos;
        }
        if digit_index >= map.len() {
            return map.len();
        }
        map.iter()
            .position(|slot| slot.is_some_and(|n| n > digit_index))
            .unwrap_or(map.len())
    }

    /// Digits covered by the display selection `[sel_start, sel_end)`.
    ///
    /// Literal positions are ignored. Returns `None` when the selection is
    /// empty, out of range, or covers literals only.
    ///
    /// ```
    /// use phone_mask_core::Formatter;
    ///
    /// let formatter = Formatter::new(["###-###-####"]).unwrap();
    /// assert_eq!(formatter.digit_range("2015551234", 4, 7), Some(3..6));
    /// assert_eq!(formatter.digit_range("2015551234", 3, 4), None);
    /// ```
    pub fn digit_range(&self, digits: &str, sel_start: usize, sel_end: usize) -> Option<Range<usize>> {
        let RenderResult { map, .. } = self.render(digits);
        let end = sel_end.min(map.len());
        if sel_start >= end {
            return None;
        }

        let mut covered = map[sel_start..end].iter().flatten().copied();
        let first = covered.next()?;
        let (min, max) = covered.fold((first, first), |(lo, hi), n| (lo.min(n), hi.max(n)));
        Some(min..max + 1)
    }

    /// Number of digits rendered before display offset `display_pos`.
    ///
    /// This is the digit index a caret at `display_pos` stands for; offsets
    /// past the end resolve to the end of the buffer.
    pub fn digit_index_at(&self, digits: &str, display_pos: usize) -> usize {
        let RenderResult { map, .. } = self.render(digits);
        if display_pos >= map.len() {
            return rune_count(digits).min(self.max_digits);
        }
        map[..display_pos].iter().flatten().count()
    }

    /// The full phone value for `digits`.
    pub fn phone_number(&self, digits: &str) -> PhoneNumber {
        let full = format!("{}{}", self.calling_code, digits);
        let full_formatted = if digits.is_empty() {
            String::new()
        } else {
            format!("{} {}", self.calling_code, self.format_display(digits))
        };
        PhoneNumber {
            full,
            full_formatted,
            digits: digits.to_string(),
        }
    }

    /// Everything an input widget renders for `digits`.
    pub fn state(&self, digits: &str) -> InputState {
        let is_complete = self.is_complete(digits);
        let is_empty = digits.is_empty();
        InputState {
            display: self.format_display(digits),
            placeholder: self.placeholder().to_string(),
            is_complete,
            is_empty,
            should_show_warn: !is_empty && !is_complete,
        }
    }
}

/// A phone value as reported to the host application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhoneNumber {
    /// Calling code followed by the digits (`"+12015551234"`).
    pub full: String,
    /// Calling code, a space, then the display string; empty without digits.
    pub full_formatted: String,
    /// The raw digit buffer.
    pub digits: String,
}

/// Derived view state for an input holding some digits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputState {
    pub display: String,
    pub placeholder: String,
    pub is_complete: bool,
    pub is_empty: bool,
    /// Non-empty but incomplete; hosts sample this on their own hint timer.
    pub should_show_warn: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us() -> Formatter {
        Formatter::new(["+1 ###-###-####"]).unwrap()
    }

    fn cn() -> Formatter {
        Formatter::new(["+86 (###)####-###", "+86 (###)####-####"]).unwrap()
    }

    #[test]
    fn test_new_requires_variants() {
        let empty: [&str; 0] = [];
        assert!(matches!(Formatter::new(empty), Err(MaskError::NoVariants)));
    }

    #[test]
    fn test_max_digits_and_templates() {
        assert_eq!(us().max_digits(), 10);
        assert_eq!(cn().max_digits(), 11);
        assert_eq!(cn().templates(), ["(###)####-###", "(###)####-####"]);
    }

    #[test]
    fn test_calling_code() {
        assert_eq!(us().calling_code(), "+1");
        assert_eq!(cn().calling_code(), "+86");
        assert_eq!(Formatter::new(["###"]).unwrap().calling_code(), "");
        assert_eq!(Formatter::new(["+7(###)###-##-##"]).unwrap().calling_code(), "+7");
        assert_eq!(Formatter::new(["+ ###"]).unwrap().calling_code(), "");
    }

    #[test]
    fn test_format_display_switches_variant() {
        let f = cn();
        assert_eq!(f.format_display(""), "");
        assert_eq!(f.format_display("1381234567"), "(138)1234-567");
        assert_eq!(f.format_display("13812345678"), "(138)1234-5678");
        // Overflow renders through the largest variant and drops the rest
        assert_eq!(f.format_display("138123456789"), "(138)1234-5678");
    }

    #[test]
    fn test_placeholder_is_smallest_template() {
        assert_eq!(us().placeholder(), "###-###-####");
        assert_eq!(cn().placeholder(), "(###)####-###");
    }

    #[test]
    fn test_is_complete_exact_match() {
        let f = us();
        assert!(f.is_complete("2015551234"));
        assert!(!f.is_complete("201555123"));
        assert!(!f.is_complete(""));

        let f = cn();
        assert!(f.is_complete("1381234567"));
        assert!(f.is_complete("13812345678"));
        assert!(!f.is_complete("138123456"));
    }

    #[test]
    fn test_caret_position_matches_render() {
        let f = us();
        // caret after k digits sits at the end of the render of k digits
        for k in 0..=10 {
            let expected = render("###-###-####", &"0".repeat(k)).len();
            assert_eq!(f.caret_position(k), expected, "digit index {k}");
        }
        assert_eq!(f.caret_position(4), 5);
        assert_eq!(f.caret_position(6), 8);
    }

    #[test]
    fn test_caret_position_past_capacity() {
        let f = us();
        assert_eq!(f.caret_position(15), 12);
        assert_eq!(f.caret_position(usize::MAX), 12);
    }

    #[test]
    fn test_caret_position_with_leading_literal() {
        let f = Formatter::new(["(###) ###-####"]).unwrap();
        assert_eq!(f.caret_position(0), 0);
        assert_eq!(f.caret_position(1), 2);
        assert_eq!(f.caret_position(3), 6);
    }

    #[test]
    fn test_digit_range() {
        let f = us();
        let digits = "2015551234";
        assert_eq!(f.digit_range(digits, 0, 12), Some(0..10));
        assert_eq!(f.digit_range(digits, 4, 7), Some(3..6));
        assert_eq!(f.digit_range(digits, 2, 5), Some(2..4));
        assert_eq!(f.digit_range(digits, 3, 4), None);
        assert_eq!(f.digit_range(digits, 5, 5), None);
        assert_eq!(f.digit_range(digits, 7, 3), None);
        assert_eq!(f.digit_range(digits, 12, 20), None);
        // End past the display is clamped
        assert_eq!(f.digit_range(digits, 8, 99), Some(6..10));
    }

    #[test]
    fn test_digit_index_at() {
        let f = us();
        let digits = "2015551234";
        assert_eq!(f.digit_index_at(digits, 0), 0);
        assert_eq!(f.digit_index_at(digits, 3), 3);
        assert_eq!(f.digit_index_at(digits, 4), 3);
        assert_eq!(f.digit_index_at(digits, 5), 4);
        assert_eq!(f.digit_index_at(digits, 12), 10);
        assert_eq!(f.digit_index_at("201", 40), 3);
    }

    #[test]
    fn test_phone_number() {
        let f = us();
        let number = f.phone_number("2015551234");
        assert_eq!(number.full, "+12015551234");
        assert_eq!(number.full_formatted, "+1 201-555-1234");
        assert_eq!(number.digits, "2015551234");

        let empty = f.phone_number("");
        assert_eq!(empty.full, "+1");
        assert_eq!(empty.full_formatted, "");
    }

    #[test]
    fn test_state() {
        let f = us();
        let state = f.state("201555");
        assert_eq!(state.display, "201-555-");
        assert_eq!(state.placeholder, "###-###-####");
        assert!(!state.is_complete);
        assert!(!state.is_empty);
        assert!(state.should_show_warn);

        let state = f.state("");
        assert!(state.is_empty);
        assert!(!state.should_show_warn);

        let state = f.state("2015551234");
        assert!(state.is_complete);
        assert!(!state.should_show_warn);
    }
}

//! Rendering a digit buffer through a mask template.
//!
//! Every call produces the display string together with a position map that
//! is parallel to it: `map[i]` is `Some(n)` when display character `i` is the
//! `n`-th digit of the buffer, and `None` when it is a literal copied from
//! the template.

use crate::template::PLACEHOLDER;

/// Per-display-character origin. `None` marks a template literal.
pub type PositionMap = Vec<Option<usize>>;

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderResult {
    /// The formatted text shown to the user.
    pub display: String,
    /// One entry per character of `display`.
    pub map: PositionMap,
}

impl RenderResult {
    /// Length of the display string in characters (equal to `map.len()`).
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether nothing was rendered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Render `digits` through `template`.
///
/// Placeholders consume digits in order; rendering stops at the first
/// placeholder with no digit left for it. A literal is emitted only when
/// something has already been emitted, or when a later placeholder will
/// still receive a digit. Separators before the first digit are therefore
/// suppressed, while the literal run right after the last digit is kept up
/// to the next placeholder (`"201-"` for three digits of `###-###-####`).
///
/// # Examples
///
/// ```
/// use phone_mask_core::render::render;
///
/// let out = render("###-###-####", "2015551234");
/// assert_eq!(out.display, "201-555-1234");
///
/// assert_eq!(render("(###) ###-####", "").display, "");
/// assert_eq!(render("(###) ###-####", "2").display, "(2");
/// ```
pub fn render(template: &str, digits: &str) -> RenderResult {
    let mut display = String::with_capacity(template.len());
    let mut map = PositionMap::with_capacity(template.len());

    let mut pending = digits.chars();
    let mut next_digit = pending.next();
    let mut digit_index = 0;

    // Char index of the last placeholder; a literal at `i` is followed by a
    // placeholder iff `i < last_placeholder`.
    let last_placeholder = template
        .chars()
        .enumerate()
        .filter(|&(_, c)| c == PLACEHOLDER)
        .map(|(i, _)| i)
        .last();

    for (i, c) in template.chars().enumerate() {
        if c == PLACEHOLDER {
            let Some(digit) = next_digit else {
                break;
            };
            display.push(digit);
            map.push(Some(digit_index));
            digit_index += 1;
            next_digit = pending.next();
        } else {
            let will_fill_next =
                next_digit.is_some() && last_placeholder.is_some_and(|last| i < last);
            if !map.is_empty() || will_fill_next {
                display.push(c);
                map.push(None);
            }
        }
    }

    RenderResult { display, map }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(template: &str, digits: &str) -> String {
        render(template, digits).display
    }

    #[test]
    fn test_render_full() {
        let out = render("###-###-####", "2015551234");
        assert_eq!(out.display, "201-555-1234");
        assert_eq!(
            out.map,
            vec![
                Some(0),
                Some(1),
                Some(2),
                None,
                Some(3),
                Some(4),
                Some(5),
                None,
                Some(6),
                Some(7),
                Some(8),
                Some(9),
            ]
        );
    }

    #[test]
    fn test_render_partial_stops_at_next_empty_placeholder() {
        assert_eq!(display("###-###-####", "20"), "20");
        assert_eq!(display("###-###-####", "201"), "201-");
        assert_eq!(display("###-###-####", "2015"), "201-5");
        assert_eq!(display("###-###-####", "201555"), "201-555-");
    }

    #[test]
    fn test_render_suppresses_leading_literals() {
        assert_eq!(display("(###) ###-####", ""), "");
        assert_eq!(display("(###) ###-####", "2"), "(2");
        assert_eq!(display("(###) ###-####", "20"), "(20");
        assert_eq!(display("(###) ###-####", "201"), "(201) ");
        assert_eq!(display("(###) ###-####", "2015"), "(201) 5");
    }

    #[test]
    fn test_render_extra_digits_are_dropped() {
        assert_eq!(display("##-##", "123456"), "12-34");
    }

    #[test]
    fn test_render_trailing_literal_after_last_placeholder() {
        // A literal after the final placeholder is kept once output exists.
        assert_eq!(display("###)", "123"), "123)");
        assert_eq!(display("###)", "12"), "12");
    }

    #[test]
    fn test_render_without_placeholders() {
        let out = render("--", "123");
        assert_eq!(out.display, "");
        assert!(out.is_empty());
    }

    #[test]
    fn test_map_length_matches_display() {
        for digits in ["", "1", "12", "123", "1234", "12345678901"] {
            let out = render("+7 (###) ###-##-##", digits);
            assert_eq!(out.len(), out.display.chars().count());
        }
    }
}

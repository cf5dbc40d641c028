//! Edit processing for masked phone inputs.
//!
//! Every function here is pure: it takes the caller's digit buffer, the
//! selection the caller observed on the *display* string, and the incoming
//! text or key, and returns what the buffer should become. Nothing is kept
//! between calls. Conditions that cannot be applied (a selection covering
//! separators only, a paste without digits, a caret at the start for
//! Backspace) yield "no change" rather than an error.
//!
//! A host wires these to its widget roughly like this:
//!
//! ```
//! use phone_mask_core::input::{process_backspace, Selection};
//! use phone_mask_core::Formatter;
//!
//! let formatter = Formatter::new(["+1 ###-###-####"]).unwrap();
//! let digits = "2015551234";
//! assert_eq!(formatter.format_display(digits), "201-555-1234");
//!
//! // The user selects "555" and presses Backspace.
//! let edit = process_backspace(Selection::new(4, 7), digits, &formatter).unwrap();
//! assert_eq!(edit.new_digits, "2011234");
//! assert_eq!(edit.display(&formatter), "201-123-4");
//! assert_eq!(edit.caret_position(&formatter), 4);
//! ```

use log::{debug, trace};

use crate::formatter::Formatter;
use crate::key::{Key, KeyEvent};
use crate::template::{extract_digits, extract_digits_limited};
use crate::text::{rune_count, splice, truncate_runes};

/// Characters a user may type besides digits; everything else is rejected
/// before it reaches the buffer.
pub const DELIMITERS: [char; 4] = [' ', '-', '(', ')'];

/// A selection over the display string, in characters.
///
/// The range is half-open and always normalized so `start <= end`; a caret
/// is an empty selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection, normalizing the order of the endpoints.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// An empty selection at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// Whether this is a plain caret.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The outcome of one applied edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    /// The digit buffer after the edit, never longer than the formatter's
    /// maximum.
    pub new_digits: String,
    /// Where the caret goes, as a count of digits before it.
    pub caret_digit_index: usize,
}

impl EditResult {
    fn new(new_digits: String, caret_digit_index: usize) -> Self {
        Self {
            new_digits,
            caret_digit_index,
        }
    }

    /// The display string for the new buffer.
    pub fn display(&self, formatter: &Formatter) -> String {
        formatter.format_display(&self.new_digits)
    }

    /// The display offset to place the caret at.
    pub fn caret_position(&self, formatter: &Formatter) -> usize {
        formatter.caret_position(self.caret_digit_index)
    }
}

/// Verdict of the pre-insertion gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputGate {
    /// Let the native insertion happen.
    Allow,
    /// Suppress the native insertion.
    Block,
}

/// What the host should do with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not ours: let the platform handle the key.
    PassThrough,
    /// Let the native insertion proceed; the follow-up input event goes
    /// through [`process_insert`].
    Allow,
    /// Suppress native handling and leave the buffer as is.
    Block,
    /// Suppress native handling and apply this edit.
    Edit(EditResult),
}

/// One logical edit, described independently of any platform event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditIntent {
    /// Text was inserted natively; `value` is the whole raw field value
    /// after the insertion.
    Insert { value: String },
    Backspace { selection: Selection },
    Delete { selection: Selection },
    Paste { text: String, selection: Selection },
}

impl EditIntent {
    /// Apply the intent to `digits`. `None` means nothing changes.
    pub fn apply(&self, digits: &str, formatter: &Formatter) -> Option<EditResult> {
        match self {
            EditIntent::Insert { value } => Some(process_insert(value, formatter)),
            EditIntent::Backspace { selection } => process_backspace(*selection, digits, formatter),
            EditIntent::Delete { selection } => process_delete(*selection, digits, formatter),
            EditIntent::Paste { text, selection } => {
                process_paste(text, *selection, digits, formatter)
            }
        }
    }
}

/// Decide whether incoming text may be inserted natively.
///
/// Blocks text containing anything other than digits, whitespace, hyphens
/// and parentheses, and a space typed right after another space.
///
/// ```
/// use phone_mask_core::input::{process_before_insert, InputGate};
///
/// assert_eq!(process_before_insert("5", "201"), InputGate::Allow);
/// assert_eq!(process_before_insert("x", "201"), InputGate::Block);
/// assert_eq!(process_before_insert(" ", "201 "), InputGate::Block);
/// ```
pub fn process_before_insert(data: &str, current_value: &str) -> InputGate {
    if data.is_empty() {
        return InputGate::Allow;
    }

    let invalid = data
        .chars()
        .any(|c| !(c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '(' | ')')));
    let double_space = data == " " && current_value.ends_with(' ');

    if invalid || double_space {
        trace!("blocking insertion of {data:?}");
        InputGate::Block
    } else {
        InputGate::Allow
    }
}

/// Re-derive the buffer from the raw field value after a native insertion.
///
/// The caret always trails the last digit.
pub fn process_insert(raw_value: &str, formatter: &Formatter) -> EditResult {
    let new_digits = extract_digits_limited(raw_value, formatter.max_digits());
    let caret = rune_count(&new_digits);
    trace!("insert: {raw_value:?} -> {new_digits:?}");
    EditResult::new(new_digits, caret)
}

/// Apply Backspace.
///
/// A selection deletes the digits it covers. A caret deletes the nearest
/// digit before it, skipping separators in between.
pub fn process_backspace(selection: Selection, digits: &str, formatter: &Formatter) -> Option<EditResult> {
    if !selection.is_empty() {
        let Some(range) = formatter.digit_range(digits, selection.start, selection.end) else {
            debug!("backspace: selection {selection:?} covers no digits");
            return None;
        };
        let new_digits = splice(digits, range.start, range.end, "");
        trace!("backspace: removed digits {range:?}");
        return Some(EditResult::new(new_digits, range.start));
    }

    let map = formatter.render(digits).map;
    if selection.start == 0 || selection.start > map.len() {
        return None;
    }

    let digit = map[..selection.start].iter().rev().find_map(|slot| *slot)?;
    trace!("backspace: removed digit {digit}");
    Some(EditResult::new(splice(digits, digit, digit + 1, ""), digit))
}

/// Apply forward Delete.
///
/// A selection deletes the digits it covers. A caret deletes the digit
/// right after it; a separator there makes the key a no-op.
pub fn process_delete(selection: Selection, digits: &str, formatter: &Formatter) -> Option<EditResult> {
    if !selection.is_empty() {
        let Some(range) = formatter.digit_range(digits, selection.start, selection.end) else {
            debug!("delete: selection {selection:?} covers no digits");
            return None;
        };
        let new_digits = splice(digits, range.start, range.end, "");
        trace!("delete: removed digits {range:?}");
        return Some(EditResult::new(new_digits, range.start));
    }

    let range = formatter.digit_range(digits, selection.start, selection.start.saturating_add(1))?;
    trace!("delete: removed digit {}", range.start);
    Some(EditResult::new(
        splice(digits, range.start, range.start + 1, ""),
        range.start,
    ))
}

/// Apply a paste of `text`.
///
/// Only the digits of `text` are used, clamped to the room left in the
/// buffer. A selection covering digits is replaced; otherwise the digits
/// go in at the caret. Text without digits changes nothing.
pub fn process_paste(
    text: &str,
    selection: Selection,
    digits: &str,
    formatter: &Formatter,
) -> Option<EditResult> {
    let pasted = extract_digits(text);
    if pasted.is_empty() {
        debug!("paste: no digits in clipboard text");
        return None;
    }

    let max_digits = formatter.max_digits();
    let digit_count = rune_count(digits);

    if !selection.is_empty() {
        if let Some(range) = formatter.digit_range(digits, selection.start, selection.end) {
            let kept = digit_count.saturating_sub(range.len());
            let pasted = truncate_runes(&pasted, max_digits.saturating_sub(kept));
            let merged = splice(digits, range.start, range.end, pasted);
            let new_digits = extract_digits_limited(&merged, max_digits);
            trace!("paste: replaced digits {range:?} with {pasted:?}");
            return Some(EditResult::new(new_digits, range.start + pasted.len()));
        }
    }

    let insert_index = formatter.digit_index_at(digits, selection.start);
    let pasted = truncate_runes(&pasted, max_digits.saturating_sub(digit_count));
    let merged = splice(digits, insert_index, insert_index, pasted);
    let new_digits = extract_digits_limited(&merged, max_digits);
    trace!("paste: inserted {pasted:?} at digit {insert_index}");
    Some(EditResult::new(new_digits, insert_index + pasted.len()))
}

/// Classify a key press and apply Backspace/Delete.
///
/// ```
/// use phone_mask_core::input::{process_keydown, KeyOutcome, Selection};
/// use phone_mask_core::key::{Key, KeyEvent};
/// use phone_mask_core::Formatter;
///
/// let formatter = Formatter::new(["###-####"]).unwrap();
/// let caret = Selection::caret(0);
///
/// let digit = KeyEvent::simple(Key::Char('4'));
/// assert_eq!(process_keydown(digit, caret, "555", &formatter), KeyOutcome::Allow);
/// assert_eq!(process_keydown(digit, caret, "5551234", &formatter), KeyOutcome::Block);
///
/// let letter = KeyEvent::simple(Key::Char('a'));
/// assert_eq!(process_keydown(letter, caret, "", &formatter), KeyOutcome::Block);
/// ```
pub fn process_keydown(
    event: KeyEvent,
    selection: Selection,
    digits: &str,
    formatter: &Formatter,
) -> KeyOutcome {
    if event.mods.is_chord() || event.key.is_navigation() {
        return KeyOutcome::PassThrough;
    }

    match event.key {
        Key::Backspace => process_backspace(selection, digits, formatter)
            .map_or(KeyOutcome::Block, KeyOutcome::Edit),
        Key::Delete => process_delete(selection, digits, formatter)
            .map_or(KeyOutcome::Block, KeyOutcome::Edit),
        Key::Char(c) if event.key.is_digit() => {
            if rune_count(digits) >= formatter.max_digits() {
                debug!("keydown: buffer full, blocking {c:?}");
                KeyOutcome::Block
            } else {
                KeyOutcome::Allow
            }
        }
        Key::Char(_) => KeyOutcome::Block,
        _ => KeyOutcome::PassThrough,
    }
}

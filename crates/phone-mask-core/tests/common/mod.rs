// Shared harness for driving the edit processor like a text field would

#![allow(dead_code)]

use phone_mask_core::{
    process_before_insert, process_insert, process_keydown, process_paste, EditResult, Formatter,
    InputGate, Key, KeyEvent, KeyOutcome, Modifiers, Selection,
};

/// A simulated text field: the digit buffer plus the selection on its
/// display string.
pub struct Field {
    pub formatter: Formatter,
    pub digits: String,
    pub selection: Selection,
}

impl Field {
    pub fn new(variants: &[&str]) -> Self {
        Field {
            formatter: Formatter::new(variants).unwrap(),
            digits: String::new(),
            selection: Selection::caret(0),
        }
    }

    pub fn with_digits(variants: &[&str], digits: &str) -> Self {
        let mut field = Field::new(variants);
        field.digits = digits.to_string();
        field.move_to_end();
        field
    }

    pub fn display(&self) -> String {
        self.formatter.format_display(&self.digits)
    }

    pub fn caret(&self) -> usize {
        self.selection.start
    }

    pub fn select(&mut self, start: usize, end: usize) {
        self.selection = Selection::new(start, end);
    }

    pub fn move_to(&mut self, pos: usize) {
        self.selection = Selection::caret(pos);
    }

    pub fn move_to_end(&mut self) {
        let end = self.display().chars().count();
        self.move_to(end);
    }

    fn apply(&mut self, edit: EditResult) {
        let caret = edit.caret_position(&self.formatter);
        self.digits = edit.new_digits;
        self.selection = Selection::caret(caret);
    }

    /// Press a key the way a browser would: keydown first, then the native
    /// insertion when it was allowed. Returns what keydown decided.
    pub fn press(&mut self, key: Key) -> KeyOutcome {
        self.press_with(key, Modifiers::empty())
    }

    pub fn press_with(&mut self, key: Key, mods: Modifiers) -> KeyOutcome {
        let outcome = process_keydown(
            KeyEvent::new(key, mods),
            self.selection,
            &self.digits,
            &self.formatter,
        );
        match (&outcome, key) {
            (KeyOutcome::Edit(edit), _) => self.apply(edit.clone()),
            (KeyOutcome::Allow, Key::Char(c)) => self.insert_native(&c.to_string()),
            _ => {}
        }
        outcome
    }

    /// Type each character of `text` as a separate key press.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(Key::Char(c));
        }
    }

    /// Insert text natively at the selection, as the widget would, then
    /// re-derive the buffer.
    pub fn insert_native(&mut self, text: &str) {
        let display = self.display();
        if process_before_insert(text, &display) == InputGate::Block {
            return;
        }
        let chars: Vec<char> = display.chars().collect();
        let start = self.selection.start.min(chars.len());
        let end = self.selection.end.min(chars.len());
        let raw: String = chars[..start]
            .iter()
            .chain(text.chars().collect::<Vec<_>>().iter())
            .chain(chars[end..].iter())
            .collect();
        let edit = process_insert(&raw, &self.formatter);
        self.apply(edit);
    }

    pub fn paste(&mut self, text: &str) -> bool {
        match process_paste(text, self.selection, &self.digits, &self.formatter) {
            Some(edit) => {
                self.apply(edit);
                true
            }
            None => false,
        }
    }
}

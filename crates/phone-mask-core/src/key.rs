//! Platform-neutral key events for the keydown path.
//!
//! Hosts translate their native keyboard events into [`KeyEvent`]s. The
//! names accepted by [`Key::from_name`] follow the DOM `KeyboardEvent.key`
//! values, which most UI toolkits can produce.

/// A key as seen by the input processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    Backspace,
    Delete,

    // Navigation keys
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Tab,

    Enter,
    Escape,

    /// Any other named key (function keys, media keys, ...).
    Unidentified,
}

impl Key {
    /// Parse a DOM-style key name.
    ///
    /// # Examples
    ///
    /// ```
    /// use phone_mask_core::key::Key;
    ///
    /// assert_eq!(Key::from_name("ArrowLeft"), Key::Left);
    /// assert_eq!(Key::from_name("7"), Key::Char('7'));
    /// assert_eq!(Key::from_name("F5"), Key::Unidentified);
    /// ```
    pub fn from_name(name: &str) -> Key {
        match name {
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            "Home" => Key::Home,
            "End" => Key::End,
            "Tab" => Key::Tab,
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Unidentified,
                }
            }
        }
    }

    /// Whether the key only moves the caret or focus.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            Key::Left | Key::Right | Key::Up | Key::Down | Key::Home | Key::End | Key::Tab
        )
    }

    /// Whether the key is a single decimal digit.
    pub fn is_digit(self) -> bool {
        matches!(self, Key::Char(c) if c.is_ascii_digit())
    }
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

impl Modifiers {
    /// Whether a shortcut chord is held (Ctrl, Alt or Meta; Shift alone is not one).
    pub fn is_chord(self) -> bool {
        self.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META)
    }
}

/// A key press with the modifiers held at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub mods: Modifiers,
}

impl KeyEvent {
    /// Create a key event with explicit modifiers.
    pub fn new(key: Key, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// Create a key event with no modifiers held.
    pub fn simple(key: Key) -> Self {
        Self::new(key, Modifiers::empty())
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        KeyEvent::simple(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Key::from_name("Backspace"), Key::Backspace);
        assert_eq!(Key::from_name("Delete"), Key::Delete);
        assert_eq!(Key::from_name("ArrowDown"), Key::Down);
        assert_eq!(Key::from_name("Tab"), Key::Tab);
        assert_eq!(Key::from_name("a"), Key::Char('a'));
        assert_eq!(Key::from_name(" "), Key::Char(' '));
        assert_eq!(Key::from_name("é"), Key::Char('é'));
        assert_eq!(Key::from_name(""), Key::Unidentified);
        assert_eq!(Key::from_name("Shift"), Key::Unidentified);
    }

    #[test]
    fn test_key_classes() {
        assert!(Key::Home.is_navigation());
        assert!(Key::Tab.is_navigation());
        assert!(!Key::Backspace.is_navigation());
        assert!(Key::Char('0').is_digit());
        assert!(!Key::Char('x').is_digit());
        assert!(!Key::Enter.is_digit());
    }

    #[test]
    fn test_modifiers_chord() {
        assert!(!Modifiers::empty().is_chord());
        assert!(!Modifiers::SHIFT.is_chord());
        assert!(Modifiers::CTRL.is_chord());
        assert!((Modifiers::SHIFT | Modifiers::META).is_chord());
    }

    #[test]
    fn test_key_event_simple() {
        let event = KeyEvent::simple(Key::Delete);
        assert_eq!(event.key, Key::Delete);
        assert!(event.mods.is_empty());
        assert_eq!(KeyEvent::from(Key::Delete), event);
    }
}

//! Serializable mirror types for the WASM bindings.
//! Requests and responses cross the boundary as JSON, so every type here
//! derives serde and converts from or into its engine counterpart.

#[cfg(feature = "wasm")]
pub use self::wasm_impl::*;

#[cfg(feature = "wasm")]
mod wasm_impl {
    use crate::country::Country;
    use crate::formatter::{Formatter, InputState, PhoneNumber};
    use crate::input::{EditResult, InputGate, KeyOutcome, Selection};
    use crate::key::{Key, KeyEvent, Modifiers};
    use crate::render::RenderResult;
    use serde::{Deserialize, Serialize};

    /// Serializable version of Selection; endpoints may come in either order
    #[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct WasmSelection {
        pub start: usize,
        pub end: usize,
    }

    impl From<WasmSelection> for Selection {
        fn from(sel: WasmSelection) -> Self {
            Selection::new(sel.start, sel.end)
        }
    }

    impl From<Selection> for WasmSelection {
        fn from(sel: Selection) -> Self {
            WasmSelection {
                start: sel.start,
                end: sel.end,
            }
        }
    }

    /// Serializable version of KeyEvent, with a DOM key name
    #[derive(Serialize, Deserialize, Debug, Clone, Default)]
    pub struct WasmKeyEvent {
        pub key: String,
        #[serde(default)]
        pub shift: bool,
        #[serde(default)]
        pub ctrl: bool,
        #[serde(default)]
        pub alt: bool,
        #[serde(default)]
        pub meta: bool,
    }

    impl From<WasmKeyEvent> for KeyEvent {
        fn from(event: WasmKeyEvent) -> Self {
            let mut mods = Modifiers::empty();
            mods.set(Modifiers::SHIFT, event.shift);
            mods.set(Modifiers::CTRL, event.ctrl);
            mods.set(Modifiers::ALT, event.alt);
            mods.set(Modifiers::META, event.meta);
            KeyEvent::new(Key::from_name(&event.key), mods)
        }
    }

    /// Serializable version of RenderResult; literals map to -1
    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
    pub struct WasmRender {
        pub display: String,
        pub map: Vec<i64>,
    }

    impl From<RenderResult> for WasmRender {
        fn from(result: RenderResult) -> Self {
            WasmRender {
                display: result.display,
                map: result
                    .map
                    .iter()
                    .map(|slot| slot.map_or(-1, |n| n as i64))
                    .collect(),
            }
        }
    }

    /// An applied edit with the display and caret offset already resolved
    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
    pub struct WasmEditResult {
        pub digits: String,
        pub display: String,
        pub caret: usize,
        pub caret_digit_index: usize,
    }

    impl WasmEditResult {
        pub fn from_edit(edit: EditResult, formatter: &Formatter) -> Self {
            WasmEditResult {
                display: edit.display(formatter),
                caret: edit.caret_position(formatter),
                caret_digit_index: edit.caret_digit_index,
                digits: edit.new_digits,
            }
        }
    }

    /// Serializable version of KeyOutcome
    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
    #[serde(tag = "action", rename_all = "snake_case")]
    pub enum WasmKeyOutcome {
        PassThrough,
        Allow,
        Block,
        Edit { edit: WasmEditResult },
    }

    impl WasmKeyOutcome {
        pub fn from_outcome(outcome: KeyOutcome, formatter: &Formatter) -> Self {
            match outcome {
                KeyOutcome::PassThrough => WasmKeyOutcome::PassThrough,
                KeyOutcome::Allow => WasmKeyOutcome::Allow,
                KeyOutcome::Block => WasmKeyOutcome::Block,
                KeyOutcome::Edit(edit) => WasmKeyOutcome::Edit {
                    edit: WasmEditResult::from_edit(edit, formatter),
                },
            }
        }
    }

    /// Serializable verdict of the pre-insertion gate
    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WasmGate {
        pub allow: bool,
    }

    impl From<InputGate> for WasmGate {
        fn from(gate: InputGate) -> Self {
            WasmGate {
                allow: gate == InputGate::Allow,
            }
        }
    }

    /// InputState and PhoneNumber flattened into one response
    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
    pub struct WasmFormatState {
        pub display: String,
        pub placeholder: String,
        pub is_complete: bool,
        pub is_empty: bool,
        pub should_show_warn: bool,
        pub full: String,
        pub full_formatted: String,
    }

    impl WasmFormatState {
        pub fn new(state: InputState, number: PhoneNumber) -> Self {
            WasmFormatState {
                display: state.display,
                placeholder: state.placeholder,
                is_complete: state.is_complete,
                is_empty: state.is_empty,
                should_show_warn: state.should_show_warn,
                full: number.full,
                full_formatted: number.full_formatted,
            }
        }

        pub fn for_digits(formatter: &Formatter, digits: &str) -> Self {
            Self::new(formatter.state(digits), formatter.phone_number(digits))
        }
    }

    /// Serializable version of Country
    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
    pub struct WasmCountry {
        pub id: String,
        pub code: String,
        pub masks: Vec<String>,
        pub flag: String,
        pub name: String,
    }

    impl From<&Country> for WasmCountry {
        fn from(country: &Country) -> Self {
            WasmCountry {
                id: country.id.clone(),
                code: country.code.clone(),
                masks: country.masks.clone(),
                flag: country.flag.clone(),
                name: country.name.clone(),
            }
        }
    }

}

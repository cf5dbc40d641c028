//! Phone Mask Core Library
//!
//! This crate provides the engine behind masked phone number inputs: mask
//! templates with `#` digit slots, rendering a digit buffer into the
//! formatted display string, mapping carets and selections between the
//! display and the buffer, and turning user edits (typing, Backspace,
//! Delete, paste) into a new buffer. It holds no input state of its own, so
//! it can back any UI layer or language binding.

pub mod country;
pub mod error;
pub mod formatter;
pub mod input;
pub mod key;
pub mod render;
pub mod template;
pub mod text;
pub mod wasm;

// Re-export commonly used types for convenience
pub use country::{country_from_locale, flag_emoji, Country, MaskTable, DEFAULT_COUNTRY};
pub use error::{MaskError, MaskResult};
pub use formatter::{Formatter, InputState, PhoneNumber};
pub use input::{
    process_backspace, process_before_insert, process_delete, process_insert, process_keydown,
    process_paste, EditIntent, EditResult, InputGate, KeyOutcome, Selection, DELIMITERS,
};
pub use key::{Key, KeyEvent, Modifiers};
pub use render::{render, PositionMap, RenderResult};
pub use template::{
    count_placeholders, extract_digits, extract_digits_limited, pick_variant,
    strip_country_prefix, PLACEHOLDER,
};
pub use text::{rune_count, rune_slice};

// Re-export WASM serialization types when wasm feature is enabled
#[cfg(feature = "wasm")]
pub use wasm::{
    WasmCountry, WasmEditResult, WasmFormatState, WasmGate, WasmKeyEvent, WasmKeyOutcome,
    WasmRender, WasmSelection,
};

//! C-style WASM exports for phone-mask-core.
//!
//! Formatters live in a per-thread registry and are addressed by id. Every
//! call takes a JSON request and answers with a JSON response, either
//! `{"ok": ...}` or `{"error": "..."}`.
//!
//! The raw `extern "C"` exports are only compiled for `wasm32`, where a
//! pointer fits in 32 bits. They return the response as a pointer and length
//! packed into a `u64`; the host reads the bytes and hands the pointer back
//! to `free_buffer`. Native callers use the `handle_*` functions directly.

use std::cell::RefCell;
use std::collections::HashMap;

use log::debug;
use phone_mask_core::{
    input, Formatter, MaskError, MaskTable, WasmCountry, WasmEditResult, WasmFormatState, WasmGate,
    WasmKeyEvent, WasmKeyOutcome, WasmRender, WasmSelection,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported back to the host in the `error` field.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("Request is not valid UTF-8")]
    InvalidUtf8,

    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error("Unknown formatter id {0}")]
    UnknownFormatter(u32),
}

type BindingResult<T> = Result<T, BindingError>;

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Response<T> {
    Ok(T),
    Error(String),
}

#[derive(Default)]
struct Registry {
    formatters: HashMap<u32, Formatter>,
    next_id: u32,
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

#[derive(Deserialize)]
struct NewFormatterRequest {
    /// Explicit variants; take precedence over `country`.
    #[serde(default)]
    masks: Vec<String>,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Deserialize)]
struct DigitsRequest {
    #[serde(default)]
    digits: String,
}

#[derive(Deserialize)]
struct CaretRequest {
    digit_index: usize,
}

#[derive(Deserialize)]
struct RangeRequest {
    #[serde(default)]
    digits: String,
    selection: WasmSelection,
}

#[derive(Deserialize)]
struct BeforeInputRequest {
    #[serde(default)]
    data: String,
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct InputRequest {
    value: String,
}

#[derive(Deserialize)]
struct KeydownRequest {
    event: WasmKeyEvent,
    #[serde(default)]
    selection: WasmSelection,
    #[serde(default)]
    digits: String,
}

#[derive(Deserialize)]
struct PasteRequest {
    text: String,
    #[serde(default)]
    selection: WasmSelection,
    #[serde(default)]
    digits: String,
}

#[derive(Serialize)]
struct PlaceholderResponse {
    placeholder: String,
    max_digits: usize,
    calling_code: String,
}

#[derive(Serialize)]
struct RangeResponse {
    start: usize,
    end: usize,
}

#[derive(Deserialize)]
struct SearchRequest {
    #[serde(default)]
    query: String,
}

/// Register a formatter described by `request` and return its id.
///
/// The request is `{"masks": [...]}` or `{"country": "US"}`; unknown
/// countries fall back to the table default.
pub fn create_formatter(request: &str) -> BindingResult<u32> {
    let request: NewFormatterRequest = serde_json::from_str(request)?;

    let formatter = if !request.masks.is_empty() {
        Formatter::new(&request.masks)?
    } else {
        let table = MaskTable::builtin()?;
        let id = request.country.as_deref().unwrap_or_default();
        let country = table
            .get_or_default(id)
            .ok_or_else(|| MaskError::unknown_country(id))?;
        Formatter::from_country(country)?
    };

    let id = REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.formatters.insert(id, formatter);
        id
    });
    debug!("registered formatter {id}");
    Ok(id)
}

/// Drop a formatter. Returns whether it existed.
pub fn remove_formatter(id: u32) -> bool {
    REGISTRY.with(|registry| registry.borrow_mut().formatters.remove(&id).is_some())
}

fn with_formatter<T>(id: u32, f: impl FnOnce(&Formatter) -> T) -> BindingResult<T> {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .formatters
            .get(&id)
            .map(f)
            .ok_or(BindingError::UnknownFormatter(id))
    })
}

fn respond<T: Serialize>(result: BindingResult<T>) -> String {
    let response = match result {
        Ok(value) => Response::Ok(value),
        Err(err) => {
            debug!("request failed: {err}");
            Response::Error(err.to_string())
        }
    };
    serde_json::to_string(&response)
        .unwrap_or_else(|err| format!(r#"{{"error":"{}"}}"#, err.to_string().replace('"', "'")))
}

fn format_state(id: u32, request: &str) -> BindingResult<WasmFormatState> {
    let request: DigitsRequest = serde_json::from_str(request)?;
    with_formatter(id, |f| WasmFormatState::for_digits(f, &request.digits))
}

fn render_map(id: u32, request: &str) -> BindingResult<WasmRender> {
    let request: DigitsRequest = serde_json::from_str(request)?;
    with_formatter(id, |f| WasmRender::from(f.render(&request.digits)))
}

fn placeholder_info(id: u32) -> BindingResult<PlaceholderResponse> {
    with_formatter(id, |f| PlaceholderResponse {
        placeholder: f.placeholder().to_string(),
        max_digits: f.max_digits(),
        calling_code: f.calling_code().to_string(),
    })
}

fn caret_for(id: u32, request: &str) -> BindingResult<usize> {
    let request: CaretRequest = serde_json::from_str(request)?;
    with_formatter(id, |f| f.caret_position(request.digit_index))
}

fn range_for(id: u32, request: &str) -> BindingResult<Option<RangeResponse>> {
    let request: RangeRequest = serde_json::from_str(request)?;
    let WasmSelection { start, end } = request.selection;
    with_formatter(id, |f| {
        f.digit_range(&request.digits, start.min(end), start.max(end))
            .map(|range| RangeResponse {
                start: range.start,
                end: range.end,
            })
    })
}

fn gate(request: &str) -> BindingResult<WasmGate> {
    let request: BeforeInputRequest = serde_json::from_str(request)?;
    Ok(input::process_before_insert(&request.data, &request.value).into())
}

fn insert(id: u32, request: &str) -> BindingResult<WasmEditResult> {
    let request: InputRequest = serde_json::from_str(request)?;
    with_formatter(id, |f| {
        WasmEditResult::from_edit(input::process_insert(&request.value, f), f)
    })
}

fn keydown(id: u32, request: &str) -> BindingResult<WasmKeyOutcome> {
    let request: KeydownRequest = serde_json::from_str(request)?;
    with_formatter(id, |f| {
        let outcome = input::process_keydown(
            request.event.into(),
            request.selection.into(),
            &request.digits,
            f,
        );
        WasmKeyOutcome::from_outcome(outcome, f)
    })
}

fn paste(id: u32, request: &str) -> BindingResult<Option<WasmEditResult>> {
    let request: PasteRequest = serde_json::from_str(request)?;
    with_formatter(id, |f| {
        input::process_paste(&request.text, request.selection.into(), &request.digits, f)
            .map(|edit| WasmEditResult::from_edit(edit, f))
    })
}

fn search(request: &str) -> BindingResult<Vec<WasmCountry>> {
    let request: SearchRequest = serde_json::from_str(request)?;
    let table = MaskTable::builtin()?;
    Ok(table
        .search(&request.query)
        .into_iter()
        .map(WasmCountry::from)
        .collect())
}

/// Display state and phone value for `{"digits"}`.
pub fn handle_format_display(id: u32, request: &str) -> String {
    respond(format_state(id, request))
}

/// Display string and position map for `{"digits"}`; literals map to -1.
pub fn handle_render(id: u32, request: &str) -> String {
    respond(render_map(id, request))
}

pub fn handle_placeholder(id: u32) -> String {
    respond(placeholder_info(id))
}

/// Display offset for `{"digit_index"}`.
pub fn handle_caret_position(id: u32, request: &str) -> String {
    respond(caret_for(id, request))
}

/// Digit range under `{"digits", "selection"}`, or `null`.
pub fn handle_digit_range(id: u32, request: &str) -> String {
    respond(range_for(id, request))
}

/// Insertion gate for `{"data", "value"}`; needs no formatter.
pub fn handle_before_input(request: &str) -> String {
    respond(gate(request))
}

/// New buffer after a native insertion, for `{"value"}`.
pub fn handle_input(id: u32, request: &str) -> String {
    respond(insert(id, request))
}

/// Key outcome for `{"event", "selection", "digits"}`.
pub fn handle_keydown(id: u32, request: &str) -> String {
    respond(keydown(id, request))
}

/// Paste edit for `{"text", "selection", "digits"}`, or `null`.
pub fn handle_paste(id: u32, request: &str) -> String {
    respond(paste(id, request))
}

/// Built-in countries matching `{"query"}`, most relevant first.
pub fn handle_search_countries(request: &str) -> String {
    respond(search(request))
}

// Pointers are packed into the high half of a u64, so these only hold on
// 32-bit wasm.
#[cfg(target_arch = "wasm32")]
pub mod exports {
    use std::alloc::{alloc, dealloc, Layout};
    use std::os::raw::c_void;
    use std::ptr;
    use std::slice;

    use super::*;

    thread_local! {
        // Sizes of the response buffers handed out to the host
        static ALLOCATIONS: RefCell<HashMap<usize, usize>> = RefCell::new(HashMap::new());
    }

    // Helper function to allocate and track memory
    fn allocate_tracked(size: usize) -> *mut u8 {
        let Ok(layout) = Layout::array::<u8>(size.max(1)) else {
            return ptr::null_mut();
        };
        let ptr = unsafe { alloc(layout) };
        if !ptr.is_null() {
            ALLOCATIONS.with(|allocations| allocations.borrow_mut().insert(ptr as usize, layout.size()));
        }
        ptr
    }

    // Helper function to free tracked memory
    fn free_tracked(ptr: *mut u8) {
        let size = ALLOCATIONS.with(|allocations| allocations.borrow_mut().remove(&(ptr as usize)));
        if let Some(size) = size {
            if let Ok(layout) = Layout::array::<u8>(size) {
                unsafe { dealloc(ptr, layout) };
            }
        }
    }

    // Copy a response into tracked memory and return packed pointer/length
    fn pack_response(json: String) -> u64 {
        let bytes = json.as_bytes();
        let out = allocate_tracked(bytes.len());
        if out.is_null() {
            return 0;
        }

        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), out, bytes.len());
        }

        ((out as u64) << 32) | (bytes.len() as u64)
    }

    // Borrow a request string from host memory
    fn read_request<'a>(data_ptr: *const u8, data_len: u32) -> BindingResult<&'a str> {
        if data_ptr.is_null() || data_len == 0 {
            return Ok("{}");
        }
        let bytes = unsafe { slice::from_raw_parts(data_ptr, data_len as usize) };
        std::str::from_utf8(bytes).map_err(|_| BindingError::InvalidUtf8)
    }

    fn call(data_ptr: *const u8, data_len: u32, handler: impl FnOnce(&str) -> String) -> u64 {
        let json = match read_request(data_ptr, data_len) {
            Ok(request) => handler(request),
            Err(err) => respond::<()>(Err(err)),
        };
        pack_response(json)
    }

    /// Returns the new formatter id, or 0 when the request is rejected.
    #[no_mangle]
    pub extern "C" fn new_formatter(data_ptr: *const u8, data_len: u32) -> u32 {
        match read_request(data_ptr, data_len).and_then(create_formatter) {
            Ok(id) => id,
            Err(err) => {
                debug!("new_formatter failed: {err}");
                0
            }
        }
    }

    #[no_mangle]
    pub extern "C" fn destroy_formatter(formatter_id: u32) {
        remove_formatter(formatter_id);
    }

    #[no_mangle]
    pub extern "C" fn format_display(formatter_id: u32, data_ptr: *const u8, data_len: u32) -> u64 {
        call(data_ptr, data_len, |request| handle_format_display(formatter_id, request))
    }

    #[no_mangle]
    pub extern "C" fn render_digits(formatter_id: u32, data_ptr: *const u8, data_len: u32) -> u64 {
        call(data_ptr, data_len, |request| handle_render(formatter_id, request))
    }

    #[no_mangle]
    pub extern "C" fn placeholder(formatter_id: u32) -> u64 {
        pack_response(handle_placeholder(formatter_id))
    }

    #[no_mangle]
    pub extern "C" fn caret_position(formatter_id: u32, data_ptr: *const u8, data_len: u32) -> u64 {
        call(data_ptr, data_len, |request| handle_caret_position(formatter_id, request))
    }

    #[no_mangle]
    pub extern "C" fn digit_range(formatter_id: u32, data_ptr: *const u8, data_len: u32) -> u64 {
        call(data_ptr, data_len, |request| handle_digit_range(formatter_id, request))
    }

    #[no_mangle]
    pub extern "C" fn process_before_input(data_ptr: *const u8, data_len: u32) -> u64 {
        call(data_ptr, data_len, handle_before_input)
    }

    #[no_mangle]
    pub extern "C" fn process_input(formatter_id: u32, data_ptr: *const u8, data_len: u32) -> u64 {
        call(data_ptr, data_len, |request| handle_input(formatter_id, request))
    }

    #[no_mangle]
    pub extern "C" fn process_keydown(formatter_id: u32, data_ptr: *const u8, data_len: u32) -> u64 {
        call(data_ptr, data_len, |request| handle_keydown(formatter_id, request))
    }

    #[no_mangle]
    pub extern "C" fn process_paste(formatter_id: u32, data_ptr: *const u8, data_len: u32) -> u64 {
        call(data_ptr, data_len, |request| handle_paste(formatter_id, request))
    }

    #[no_mangle]
    pub extern "C" fn search_countries(data_ptr: *const u8, data_len: u32) -> u64 {
        call(data_ptr, data_len, handle_search_countries)
    }

    #[no_mangle]
    pub extern "C" fn alloc_buffer(size: usize) -> *mut c_void {
        allocate_tracked(size) as *mut c_void
    }

    #[no_mangle]
    pub extern "C" fn free_buffer(ptr: *mut c_void) {
        if !ptr.is_null() {
            free_tracked(ptr as *mut u8);
        }
    }
}

//! tree-sitter external scanner for the Parsley grammar.
//!
//! Exports the five `tree_sitter_parsley_external_scanner_*` symbols the
//! generated `parser.c` links against and adapts tree-sitter's `TSLexer`
//! to [`parsley_raw_text::Lexer`]. All scanning logic lives in
//! `parsley_raw_text`; this crate only crosses the C boundary.
//!
//! # Safety
//!
//! All functions use `#[no_mangle]` and `extern "C"` for FFI compatibility.
//! They are called by the tree-sitter runtime, which guarantees that the
//! payload is the pointer returned by `create`, that the lexer is live for
//! the duration of `scan`, and that buffers hold the advertised length.
//! They're not marked `unsafe` because they're extern "C" FFI entry points,
//! not Rust API functions. Null pointers are tolerated anyway.
//!
//! # External tokens
//!
//! The grammar's `externals` array must list, in order:
//! `raw_text`, `raw_text_interpolation_start`, `error_sentinel`.

use std::ffi::{c_char, c_void};
use std::ptr::NonNull;

use parsley_raw_text::{AcceptedKinds, Lexer, ScanOutcome, Scanner, TokenKind};
use tracing::debug;

/// `TREE_SITTER_SERIALIZATION_BUFFER_SIZE` from `tree_sitter/parser.h`.
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// Length of the `valid_symbols` array tree-sitter passes to `scan`.
const EXTERNAL_TOKEN_COUNT: usize = TokenKind::ALL.len();

/// Mirror of `TSLexer` from `tree_sitter/parser.h`.
///
/// Field order and types must match the C definition exactly. `log` was
/// added in tree-sitter 0.22; this crate never reads it, so hosts built
/// against older headers are unaffected.
#[repr(C)]
pub struct TSLexer {
    pub lookahead: i32,
    pub result_symbol: u16,
    pub advance: unsafe extern "C" fn(*mut TSLexer, bool),
    pub mark_end: unsafe extern "C" fn(*mut TSLexer),
    pub get_column: unsafe extern "C" fn(*mut TSLexer) -> u32,
    pub is_at_included_range_start: unsafe extern "C" fn(*const TSLexer) -> bool,
    pub eof: unsafe extern "C" fn(*const TSLexer) -> bool,
    pub log: Option<unsafe extern "C" fn(*const TSLexer, *const c_char, ...)>,
}

/// [`Lexer`] over a live `TSLexer`.
struct TsLexer {
    raw: NonNull<TSLexer>,
}

impl Lexer for TsLexer {
    fn lookahead(&self) -> char {
        // SAFETY: `raw` is the lexer tree-sitter passed to the current `scan`.
        let lookahead = unsafe { (*self.raw.as_ptr()).lookahead };
        u32::try_from(lookahead)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn advance(&mut self) {
        let lexer = self.raw.as_ptr();
        // SAFETY: as above; `advance` is tree-sitter's own callback.
        unsafe { ((*lexer).advance)(lexer, false) }
    }

    fn mark_end(&mut self) {
        let lexer = self.raw.as_ptr();
        // SAFETY: as above.
        unsafe { ((*lexer).mark_end)(lexer) }
    }

    fn is_eof(&self) -> bool {
        let lexer = self.raw.as_ptr();
        // SAFETY: as above.
        unsafe { ((*lexer).eof)(lexer) }
    }
}

/// Allocate a scanner in its initial state.
#[no_mangle]
pub extern "C" fn tree_sitter_parsley_external_scanner_create() -> *mut c_void {
    Box::into_raw(Box::new(Scanner::new())).cast()
}

/// Free a scanner allocated by [`tree_sitter_parsley_external_scanner_create`].
#[no_mangle]
pub extern "C" fn tree_sitter_parsley_external_scanner_destroy(payload: *mut c_void) {
    if payload.is_null() {
        return;
    }
    // SAFETY: non-null payloads come from `create` and are destroyed once.
    drop(unsafe { Box::from_raw(payload.cast::<Scanner>()) });
}

/// Write the scanner state into tree-sitter's buffer. Returns bytes written.
#[no_mangle]
pub extern "C" fn tree_sitter_parsley_external_scanner_serialize(
    payload: *mut c_void,
    buffer: *mut c_char,
) -> u32 {
    // SAFETY: payload is null or a live scanner from `create`.
    let Some(scanner) = (unsafe { payload.cast::<Scanner>().as_ref() }) else {
        return 0;
    };
    if buffer.is_null() {
        return 0;
    }
    // SAFETY: tree-sitter's serialization buffer is SERIALIZATION_BUFFER_SIZE bytes.
    let buf =
        unsafe { std::slice::from_raw_parts_mut(buffer.cast::<u8>(), SERIALIZATION_BUFFER_SIZE) };
    match scanner.serialize(buf) {
        Ok(len) => u32::try_from(len).unwrap_or(0),
        Err(err) => {
            debug!(%err, "scanner state not serialized");
            0
        }
    }
}

/// Restore the scanner state. A zero length restores the initial state.
#[no_mangle]
pub extern "C" fn tree_sitter_parsley_external_scanner_deserialize(
    payload: *mut c_void,
    buffer: *const c_char,
    length: u32,
) {
    // SAFETY: payload is null or a live scanner from `create`.
    let Some(scanner) = (unsafe { payload.cast::<Scanner>().as_mut() }) else {
        return;
    };
    let len = usize::try_from(length).unwrap_or(0);
    let bytes: &[u8] = if buffer.is_null() || len == 0 {
        &[]
    } else {
        // SAFETY: tree-sitter passes `length` readable bytes.
        unsafe { std::slice::from_raw_parts(buffer.cast::<u8>(), len) }
    };
    scanner.deserialize(bytes);
}

/// Scan one external token. Returns `true` and sets `result_symbol` when a
/// token was produced.
#[no_mangle]
pub extern "C" fn tree_sitter_parsley_external_scanner_scan(
    payload: *mut c_void,
    lexer: *mut TSLexer,
    valid_symbols: *const bool,
) -> bool {
    // SAFETY: payload is null or a live scanner from `create`.
    let Some(scanner) = (unsafe { payload.cast::<Scanner>().as_ref() }) else {
        return false;
    };
    let Some(raw) = NonNull::new(lexer) else {
        return false;
    };
    if valid_symbols.is_null() {
        return false;
    }
    // SAFETY: tree-sitter passes one entry per external token.
    let valid = unsafe { std::slice::from_raw_parts(valid_symbols, EXTERNAL_TOKEN_COUNT) };
    let accepted = AcceptedKinds::from_valid_symbols(valid);

    let mut ts_lexer = TsLexer { raw };
    match scanner.scan(&mut ts_lexer, accepted) {
        ScanOutcome::Handled(kind) => {
            // SAFETY: the lexer is still live; no other reference to it exists.
            unsafe { (*raw.as_ptr()).result_symbol = kind.symbol() };
            true
        }
        ScanOutcome::Declined => false,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

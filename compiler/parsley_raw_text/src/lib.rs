//! Raw-text scanner for Parsley `<style>`, `<script>` and `<SQL>` bodies.
//!
//! The Parsley grammar is context-free everywhere except inside raw-text
//! tags, where everything up to the closing tag or an `@{` interpolation is
//! literal foreign text (CSS, JavaScript, SQL). This crate is the external
//! scanner that fills that gap. It is host-agnostic: tree-sitter drives it
//! through `parsley_ts_scanner`, tests and tools drive it through
//! [`StrLexer`].
//!
//! # Architecture
//!
//! - [`Scanner`]: scan controller. Declines unless the host currently
//!   accepts one of the raw-text token kinds, otherwise runs the
//!   [`RawTextScanner`]. Owns the persisted [`ScannerState`].
//! - [`RawTextScanner`]: the character-level algorithm.
//! - [`match_closing_tag`]: table-driven closing-tag matcher over
//!   [`ClosingTag`] entries.
//! - [`Lexer`]: the host cursor the scanner reads through.
//!
//! # Debugging
//!
//! Enable tracing with environment variables:
//! - `RUST_LOG=parsley_raw_text=trace` - every scan decision
//!
//! Hosts that do not install their own subscriber can call
//! [`init_tracing`].

mod closing_tag;
mod config;
mod lexer;
mod raw_text;
mod scanner;
mod state;
mod tag;

use std::sync::Once;

pub use closing_tag::{
    is_tag_terminator, match_closing_tag, CaseMode, ClosingTag, MAX_CLOSING_TAGS,
    PARSLEY_CLOSING_TAGS,
};
pub use config::{InterpolationTrigger, ScannerConfig};
pub use lexer::{Lexer, StrLexer};
pub use raw_text::RawTextScanner;
pub use scanner::Scanner;
pub use state::{RawTextMode, ScannerState, StateError};
pub use tag::{AcceptedKinds, ScanOutcome, TokenKind};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, so
/// hosts that install their own subscriber are unaffected.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}

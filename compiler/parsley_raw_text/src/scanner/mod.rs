//! Scan controller: the entry point the host calls at each candidate
//! position.
//!
//! The grammar only lists the raw-text kinds as valid inside raw-text tag
//! bodies, so the accepted-kind flags are enough to know whether the
//! position belongs to this scanner. Everything else is declined untouched.

use tracing::trace;

use crate::config::ScannerConfig;
use crate::lexer::Lexer;
use crate::raw_text::RawTextScanner;
use crate::state::{ScannerState, StateError};
use crate::tag::{AcceptedKinds, ScanOutcome};

/// External scanner for one parse session.
///
/// Holds the persisted [`ScannerState`] and the configuration. Scanning
/// reads neither from nor into the state, so a scan whose result the host
/// throws away (GLR backtracking) leaves nothing to undo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scanner {
    state: ScannerState,
    raw_text: RawTextScanner,
}

impl Scanner {
    /// Scanner with the Parsley configuration and the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScannerConfig) -> Self {
        Self {
            state: ScannerState::new(),
            raw_text: RawTextScanner::new(config),
        }
    }

    #[inline]
    pub fn state(&self) -> ScannerState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &ScannerConfig {
        self.raw_text.config()
    }

    /// Scan at the lexer's position.
    ///
    /// Declines without touching the lexer unless `accepted` contains a
    /// raw-text kind; otherwise returns the raw-text scanner's outcome.
    pub fn scan<L: Lexer + ?Sized>(&self, lexer: &mut L, accepted: AcceptedKinds) -> ScanOutcome {
        if !accepted.in_raw_text() {
            trace!(?accepted, "not in raw text");
            return ScanOutcome::Declined;
        }
        self.raw_text.scan(lexer)
    }

    /// Write the state into the host's buffer.
    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize, StateError> {
        self.state.serialize(buf)
    }

    /// Restore state from the host's buffer. Short buffers restore the
    /// initial state.
    pub fn deserialize(&mut self, bytes: &[u8]) {
        self.state = ScannerState::deserialize(bytes);
    }

    /// Replace the state directly, for hosts that keep it as a value.
    pub fn restore(&mut self, state: ScannerState) {
        self.state = state;
    }
}

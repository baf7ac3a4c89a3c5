//! Persisted scanner state.
//!
//! tree-sitter checkpoints external-scanner state on every token and
//! restores it before rescanning after an edit or while exploring GLR
//! alternatives. The state here is a single byte and a plain value: no
//! identity has to survive between calls.
//!
//! Which closing tag ends the current region is decided by lookahead on
//! every scan, not by this value. The scanner never writes it; it only
//! carries what the host restores.

use tracing::debug;

/// Which raw-text region, if any, the host recorded as open.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RawTextMode {
    /// Outside any raw-text region. Initial state.
    #[default]
    None = 0,
    /// Inside a `<style>` body.
    Style = 1,
    /// Inside a `<script>` body.
    Script = 2,
}

impl RawTextMode {
    /// Serialized byte for this mode.
    #[inline]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for RawTextMode {
    type Error = StateError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0 => Ok(RawTextMode::None),
            1 => Ok(RawTextMode::Style),
            2 => Ok(RawTextMode::Script),
            other => Err(StateError::UnknownMode(other)),
        }
    }
}

/// Errors from the state (de)serialization helpers.
///
/// Scanning itself has no error path; these only arise when a host hands
/// over a buffer the state does not fit or a byte it cannot decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// The host's serialization buffer cannot hold the state.
    #[error("serialization buffer holds {available} bytes, scanner state needs {needed}")]
    BufferTooSmall { available: usize, needed: usize },
    /// A serialized byte does not name a known mode.
    #[error("unknown raw-text mode byte 0x{0:02X}")]
    UnknownMode(u8),
}

/// Scanner state carried across incremental reparses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScannerState {
    mode: RawTextMode,
}

impl ScannerState {
    /// Bytes written by [`serialize()`](Self::serialize).
    pub const SERIALIZED_LEN: usize = 1;

    /// Initial state: no raw-text region open.
    pub const fn new() -> Self {
        Self {
            mode: RawTextMode::None,
        }
    }

    pub const fn with_mode(mode: RawTextMode) -> Self {
        Self { mode }
    }

    #[inline]
    pub const fn mode(self) -> RawTextMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RawTextMode) {
        self.mode = mode;
    }

    /// Fixed-size serialized form.
    #[inline]
    pub const fn to_bytes(self) -> [u8; Self::SERIALIZED_LEN] {
        [self.mode.as_byte()]
    }

    /// Write the state into `buf`, returning the number of bytes written.
    pub fn serialize(self, buf: &mut [u8]) -> Result<usize, StateError> {
        let bytes = self.to_bytes();
        let Some(dst) = buf.get_mut(..bytes.len()) else {
            return Err(StateError::BufferTooSmall {
                available: buf.len(),
                needed: bytes.len(),
            });
        };
        dst.copy_from_slice(&bytes);
        Ok(bytes.len())
    }

    /// Restore a state written by [`serialize()`](Self::serialize).
    ///
    /// Never fails: an empty buffer is the initial state, and an
    /// unrecognized mode byte (a stale checkpoint from a different scanner
    /// build) falls back to the initial state too. Bytes past the first are
    /// ignored.
    pub fn deserialize(bytes: &[u8]) -> Self {
        let Some(&byte) = bytes.first() else {
            return Self::new();
        };
        match RawTextMode::try_from(byte) {
            Ok(mode) => Self::with_mode(mode),
            Err(err) => {
                debug!(%err, "resetting scanner state");
                Self::new()
            }
        }
    }

    /// Strict variant of [`deserialize()`](Self::deserialize) that reports
    /// an unknown mode byte instead of resetting.
    pub fn try_deserialize(bytes: &[u8]) -> Result<Self, StateError> {
        match bytes.first() {
            None => Ok(Self::new()),
            Some(&byte) => RawTextMode::try_from(byte).map(Self::with_mode),
        }
    }
}

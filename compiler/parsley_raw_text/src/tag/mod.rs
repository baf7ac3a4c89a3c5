//! External token kinds and the host's accepted-kind flags.

use std::fmt;

use bitflags::bitflags;

/// External token kinds, in the order of the grammar's `externals` array.
///
/// The discriminant is the tree-sitter symbol index, so it must stay in
/// sync with `grammar.js`.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Literal foreign text inside a raw-text tag body.
    RawText = 0,
    /// The two-character `@{` that opens an interpolation.
    RawTextInterpolationStart = 1,
    /// Reserved for tree-sitter error recovery. Never produced.
    ErrorSentinel = 2,
}

impl TokenKind {
    /// Every external kind, in symbol order.
    pub const ALL: [TokenKind; 3] = [
        TokenKind::RawText,
        TokenKind::RawTextInterpolationStart,
        TokenKind::ErrorSentinel,
    ];

    /// Symbol index reported back to the host.
    #[inline]
    pub const fn symbol(self) -> u16 {
        self as u16
    }

    /// Inverse of [`symbol()`](Self::symbol).
    pub const fn from_symbol(symbol: u16) -> Option<Self> {
        match symbol {
            0 => Some(TokenKind::RawText),
            1 => Some(TokenKind::RawTextInterpolationStart),
            2 => Some(TokenKind::ErrorSentinel),
            _ => None,
        }
    }

    /// Name of the external rule in the grammar.
    pub const fn grammar_name(self) -> &'static str {
        match self {
            TokenKind::RawText => "raw_text",
            TokenKind::RawTextInterpolationStart => "raw_text_interpolation_start",
            TokenKind::ErrorSentinel => "error_sentinel",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.grammar_name())
    }
}

bitflags! {
    /// Token kinds the host grammar accepts at the current position.
    ///
    /// The grammar only declares the raw-text kinds inside raw-text tag
    /// bodies, so their presence is the scanner's context signal.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct AcceptedKinds: u8 {
        const RAW_TEXT = 1 << 0;
        const RAW_TEXT_INTERPOLATION_START = 1 << 1;
        const ERROR_SENTINEL = 1 << 2;

        /// Either raw-text kind.
        const RAW_TEXT_KINDS = Self::RAW_TEXT.bits() | Self::RAW_TEXT_INTERPOLATION_START.bits();
    }
}

impl AcceptedKinds {
    /// Flag for a single kind.
    pub const fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::RawText => Self::RAW_TEXT,
            TokenKind::RawTextInterpolationStart => Self::RAW_TEXT_INTERPOLATION_START,
            TokenKind::ErrorSentinel => Self::ERROR_SENTINEL,
        }
    }

    /// Build from tree-sitter's `valid_symbols` array, indexed by symbol.
    ///
    /// Entries missing from a short slice count as not accepted.
    pub fn from_valid_symbols(valid_symbols: &[bool]) -> Self {
        TokenKind::ALL
            .into_iter()
            .filter(|kind| {
                valid_symbols
                    .get(usize::from(kind.symbol()))
                    .copied()
                    .unwrap_or(false)
            })
            .fold(Self::empty(), |acc, kind| acc | Self::of(kind))
    }

    /// Returns `true` if `kind` is accepted.
    #[inline]
    pub fn accepts(self, kind: TokenKind) -> bool {
        self.contains(Self::of(kind))
    }

    /// Returns `true` if the host is inside a raw-text tag body.
    #[inline]
    pub fn in_raw_text(self) -> bool {
        self.intersects(Self::RAW_TEXT_KINDS)
    }
}

/// Result of one scan call.
///
/// `Handled` means a token of the given kind ends at the lexer's last
/// marked position. `Declined` hands the position back to the grammar; the
/// host discards any input the scan advanced over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub enum ScanOutcome {
    Handled(TokenKind),
    Declined,
}

impl ScanOutcome {
    /// The produced kind, if any.
    #[inline]
    pub fn kind(self) -> Option<TokenKind> {
        match self {
            ScanOutcome::Handled(kind) => Some(kind),
            ScanOutcome::Declined => None,
        }
    }

    #[inline]
    pub fn is_handled(self) -> bool {
        matches!(self, ScanOutcome::Handled(_))
    }
}

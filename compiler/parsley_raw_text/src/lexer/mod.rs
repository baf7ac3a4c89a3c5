//! Host cursor abstraction and an in-memory implementation.
//!
//! The scanner never owns its input. The host positions a [`Lexer`] at a
//! candidate token start and reads the token span back afterwards: the span
//! runs from that start to the last [`mark_end()`](Lexer::mark_end) call.
//! If the scan declines, the host discards whatever the lexer advanced over.

/// Cursor interface the scanner reads through.
///
/// Mirrors tree-sitter's `TSLexer`: one code point of lookahead, an advance
/// that includes the current code point in the token, and an explicit
/// token-end mark.
pub trait Lexer {
    /// Returns the current code point without consuming it.
    ///
    /// Returns `'\0'` at end of input. Interior NUL characters also return
    /// `'\0'`; use [`is_eof()`](Self::is_eof) to distinguish.
    fn lookahead(&self) -> char;

    /// Include the current code point in the token and move past it.
    ///
    /// Does nothing at end of input.
    fn advance(&mut self);

    /// Record the current position as the token end.
    ///
    /// May be called any number of times; the last call before the scan
    /// returns wins.
    fn mark_end(&mut self);

    /// Returns `true` once every code point has been consumed.
    fn is_eof(&self) -> bool;

    /// Advance past ordinary content up to the next `a`, `b`, or end of input.
    ///
    /// Returns `true` if at least one code point was consumed. Does not mark
    /// the token end. The default walks one code point at a time; in-memory
    /// lexers override it with a byte search.
    fn skip_until(&mut self, a: char, b: char) -> bool {
        skip_until_by_char(self, a, b)
    }
}

/// Scalar [`Lexer::skip_until`]: advance one code point at a time.
fn skip_until_by_char<L: Lexer + ?Sized>(lexer: &mut L, a: char, b: char) -> bool {
    let mut consumed = false;
    while !lexer.is_eof() {
        let c = lexer.lookahead();
        if c == a || c == b {
            break;
        }
        lexer.advance();
        consumed = true;
    }
    consumed
}

/// In-memory [`Lexer`] over a `&str`.
///
/// Tracks the token start (where the cursor was placed), the current
/// position, and the marked token end, all as byte offsets on UTF-8
/// character boundaries. [`Copy`], so a host can snapshot it before a scan
/// and roll back after a decline.
#[derive(Clone, Copy, Debug)]
pub struct StrLexer<'a> {
    source: &'a str,
    /// Byte offset the current token started at.
    start: usize,
    /// Current read position.
    pos: usize,
    /// Last marked token end.
    end: usize,
}

impl<'a> StrLexer<'a> {
    /// Create a lexer positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self::at(source, 0)
    }

    /// Create a lexer positioned at byte `offset`.
    ///
    /// Offsets past the end clamp to the end. An offset inside a multi-byte
    /// character moves forward to the next character boundary.
    pub fn at(source: &'a str, offset: usize) -> Self {
        let mut lexer = Self {
            source,
            start: 0,
            pos: 0,
            end: 0,
        };
        lexer.reset(offset);
        lexer
    }

    /// Start a new token at byte `offset`, discarding any progress.
    pub fn reset(&mut self, offset: usize) {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset += 1;
        }
        self.start = offset;
        self.pos = offset;
        self.end = offset;
    }

    /// The whole source this lexer reads from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current read position (byte offset).
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte offset the current token started at.
    pub fn token_start(&self) -> usize {
        self.start
    }

    /// Last marked token end (byte offset).
    pub fn token_end(&self) -> usize {
        self.end
    }

    /// Text between the token start and the last marked end.
    pub fn token_text(&self) -> &'a str {
        &self.source[self.start..self.end]
    }

    /// Unread source from the current position.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.pos..]
    }
}

impl Lexer for StrLexer<'_> {
    #[inline]
    fn lookahead(&self) -> char {
        self.remaining().chars().next().unwrap_or('\0')
    }

    #[inline]
    fn advance(&mut self) {
        if let Some(c) = self.remaining().chars().next() {
            self.pos += c.len_utf8();
        }
    }

    #[inline]
    fn mark_end(&mut self) {
        self.end = self.pos;
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// SIMD-accelerated skip when both stop characters are ASCII.
    ///
    /// ASCII bytes never occur inside a multi-byte UTF-8 sequence, so the
    /// byte found is always on a character boundary.
    fn skip_until(&mut self, a: char, b: char) -> bool {
        let (Ok(a_byte), Ok(b_byte)) = (ascii_byte(a), ascii_byte(b)) else {
            return skip_until_by_char(self, a, b);
        };
        let remaining = self.remaining().as_bytes();
        let offset = memchr::memchr2(a_byte, b_byte, remaining).unwrap_or(remaining.len());
        self.pos += offset;
        offset > 0
    }
}

/// Narrow an ASCII `char` to its byte; non-ASCII is rejected.
fn ascii_byte(c: char) -> Result<u8, char> {
    if c.is_ascii() {
        u8::try_from(c).map_err(|_| c)
    } else {
        Err(c)
    }
}

//! Host-side loop around the scanner.
//!
//! Plays the part of the tree-sitter runtime inside one raw-text region:
//! calls the scanner with both raw-text kinds accepted, and on an
//! interpolation start skips the embedded expression itself, since that is
//! the grammar's job.

use std::fmt;

use parsley_raw_text::{AcceptedKinds, ScanOutcome, Scanner, StrLexer, TokenKind};
use tracing::debug;

/// What a span of the region turned out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// A token produced by the scanner.
    Token(TokenKind),
    /// Interpolated expression body up to and including its closing `}`.
    Expression,
    /// The closing tag the scanner declined at.
    ClosingTag,
    /// Interpolated expression with no matching `}`.
    Unterminated,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Token(kind) => write!(f, "{kind:?}"),
            EntryKind::Expression => f.write_str("<expression>"),
            EntryKind::ClosingTag => f.write_str("<closing tag>"),
            EntryKind::Unterminated => f.write_str("<unterminated expression>"),
        }
    }
}

/// One reported span, as byte offsets into the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub start: usize,
    pub end: usize,
}

/// Scan `source` from `offset` as the body of an open raw-text region.
///
/// Stops at the first decline or at end of input. `offset` is clamped to
/// the source and moved forward to a character boundary.
pub fn drive(source: &str, offset: usize) -> Vec<Entry> {
    let scanner = Scanner::new();
    let mut entries = Vec::new();
    let mut pos = StrLexer::at(source, offset).position();

    loop {
        let mut lexer = StrLexer::at(source, pos);
        match scanner.scan(&mut lexer, AcceptedKinds::RAW_TEXT_KINDS) {
            ScanOutcome::Handled(kind) => {
                let end = lexer.token_end();
                if end == pos {
                    break;
                }
                entries.push(Entry {
                    kind: EntryKind::Token(kind),
                    start: pos,
                    end,
                });
                pos = end;

                if kind == TokenKind::RawTextInterpolationStart {
                    match skip_expression(source, pos) {
                        Some(close) => {
                            debug!(start = pos, end = close, "skipped interpolation");
                            entries.push(Entry {
                                kind: EntryKind::Expression,
                                start: pos,
                                end: close,
                            });
                            pos = close;
                        }
                        None => {
                            entries.push(Entry {
                                kind: EntryKind::Unterminated,
                                start: pos,
                                end: source.len(),
                            });
                            break;
                        }
                    }
                }
            }
            ScanOutcome::Declined => {
                if pos < source.len() {
                    entries.push(Entry {
                        kind: EntryKind::ClosingTag,
                        start: pos,
                        end: closing_tag_end(source, pos),
                    });
                }
                break;
            }
        }
    }

    entries
}

/// End of the expression that starts right after `@{`: the offset just past
/// the `}` that balances the opening brace.
fn skip_expression(source: &str, start: usize) -> Option<usize> {
    let mut depth = 1_usize;
    for (i, &byte) in source.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Offset just past the `>` of the closing tag at `start`, or end of input.
fn closing_tag_end(source: &str, start: usize) -> usize {
    source[start..]
        .find('>')
        .map_or(source.len(), |i| start + i + 1)
}

//! Table-driven closing-tag matcher.
//!
//! After the scanner has consumed `</`, [`match_closing_tag`] walks the
//! candidate names in lockstep, one lookahead character at a time, the way
//! a trie would. Each candidate carries its own [`CaseMode`], so `style`
//! and `script` fold ASCII case while `SQL` only matches in uppercase.
//!
//! Matched characters are consumed as the walk proceeds. tree-sitter's
//! lexer cannot rewind, so on a mismatch the characters examined so far
//! stay consumed and the caller treats them as ordinary content. The
//! mismatching character itself is never consumed.

use tracing::trace;

use crate::lexer::Lexer;

/// How a closing-tag name compares against input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaseMode {
    /// Exact match.
    Sensitive,
    /// ASCII letters match regardless of case. No Unicode folding.
    AsciiInsensitive,
}

impl CaseMode {
    /// Compare an expected name character against an input character.
    #[inline]
    pub fn matches(self, expected: char, actual: char) -> bool {
        match self {
            CaseMode::Sensitive => expected == actual,
            CaseMode::AsciiInsensitive => expected.eq_ignore_ascii_case(&actual),
        }
    }
}

/// A tag name that ends a raw-text region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClosingTag {
    name: &'static str,
    case: CaseMode,
}

impl ClosingTag {
    /// Create a closing-tag entry.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in const contexts) if `name` is empty or not
    /// ASCII.
    pub const fn new(name: &'static str, case: CaseMode) -> Self {
        assert!(!name.is_empty(), "closing tag name must not be empty");
        assert!(name.is_ascii(), "closing tag name must be ASCII");
        Self { name, case }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn case(&self) -> CaseMode {
        self.case
    }

    /// Returns `true` if `c` matches the name character at `index`.
    #[inline]
    fn matches_at(&self, index: usize, c: char) -> bool {
        self.name
            .as_bytes()
            .get(index)
            .is_some_and(|&expected| self.case.matches(char::from(expected), c))
    }

    #[inline]
    fn is_complete_at(&self, depth: usize) -> bool {
        self.name.len() == depth
    }
}

/// Closing tags that end a Parsley raw-text region.
pub const PARSLEY_CLOSING_TAGS: &[ClosingTag] = &[
    ClosingTag::new("style", CaseMode::AsciiInsensitive),
    ClosingTag::new("script", CaseMode::AsciiInsensitive),
    ClosingTag::new("SQL", CaseMode::Sensitive),
];

/// Largest table [`match_closing_tag`] walks; live candidates are a `u32`
/// bitmask.
pub const MAX_CLOSING_TAGS: usize = 32;

/// Returns `true` for a character that may follow a closing-tag name.
#[inline]
pub fn is_tag_terminator(c: char) -> bool {
    matches!(c, '>' | ' ' | '\t' | '\n' | '\r')
}

/// Bitmask with one bit per table entry.
#[inline]
fn all_candidates(len: usize) -> u32 {
    if len >= MAX_CLOSING_TAGS {
        u32::MAX
    } else {
        (1_u32 << len) - 1
    }
}

/// Match a closing-tag name at the lexer's position (just after `</`).
///
/// Returns the matched entry when a complete name is followed by a
/// terminator; the terminator is left unconsumed. Returns `None` as soon as
/// no candidate can continue, leaving the lexer on the first character that
/// failed to match. When two entries complete at the same length, the
/// earlier one in `tags` wins. Entries past [`MAX_CLOSING_TAGS`] are
/// ignored.
pub fn match_closing_tag<'t, L: Lexer + ?Sized>(
    lexer: &mut L,
    tags: &'t [ClosingTag],
) -> Option<&'t ClosingTag> {
    debug_assert!(
        tags.len() <= MAX_CLOSING_TAGS,
        "closing tag table has {} entries, max is {MAX_CLOSING_TAGS}",
        tags.len()
    );
    let tags = &tags[..tags.len().min(MAX_CLOSING_TAGS)];
    let mut live = all_candidates(tags.len());
    let mut depth = 0;

    loop {
        let at_eof = lexer.is_eof();
        let c = lexer.lookahead();

        if !at_eof && is_tag_terminator(c) {
            let complete = live_tags(tags, live).find(|(_, tag)| tag.is_complete_at(depth));
            if let Some((_, tag)) = complete {
                trace!(name = tag.name, "closing tag");
                return Some(tag);
            }
        }
        if at_eof {
            return None;
        }

        let next = live_tags(tags, live)
            .filter(|(_, tag)| tag.matches_at(depth, c))
            .fold(0_u32, |mask, (bit, _)| mask | bit);
        if next == 0 {
            return None;
        }

        lexer.advance();
        live = next;
        depth += 1;
    }
}

/// Live entries paired with their candidate bit.
fn live_tags(tags: &[ClosingTag], live: u32) -> impl Iterator<Item = (u32, &ClosingTag)> {
    tags.iter()
        .enumerate()
        .map(|(i, tag)| (1_u32 << i, tag))
        .filter(move |(bit, _)| live & bit != 0)
}

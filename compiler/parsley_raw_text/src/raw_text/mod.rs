//! Character-level scanner for raw-text tag bodies.
//!
//! One call produces at most one token:
//!
//! - `RawText` over every content character consumed before a stop
//!   condition (interpolation trigger, recognized closing tag, end of
//!   input), when there is at least one;
//! - `RawTextInterpolationStart` over exactly `@{` when it comes first;
//! - a decline when a closing tag or end of input comes first, so the
//!   grammar's own closing-tag rule matches there.
//!
//! # Token boundaries
//!
//! The scanner calls [`Lexer::mark_end`] after every character it accepts
//! as content, and once before it starts examining a possible stop
//! sequence. A stop therefore ends the `RawText` token right before the
//! sequence, while a false alarm (`@x`, `<p`, `</div>`) is folded into the
//! content by marking again after it.

use tracing::trace;

use crate::closing_tag::match_closing_tag;
use crate::config::ScannerConfig;
use crate::lexer::Lexer;
use crate::tag::{ScanOutcome, TokenKind};

/// Opening character of a closing tag.
const TAG_OPEN: char = '<';
/// Character between [`TAG_OPEN`] and a closing-tag name.
const TAG_SLASH: char = '/';

/// What one step of the scan loop found.
enum Step {
    /// Ordinary content was consumed; keep going.
    Content,
    /// A stop sequence was found; return this outcome.
    Stop(ScanOutcome),
}

/// Raw-text body scanner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawTextScanner {
    config: ScannerConfig,
}

impl RawTextScanner {
    pub const fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub const fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Scan one token starting at the lexer's position.
    pub fn scan<L: Lexer + ?Sized>(&self, lexer: &mut L) -> ScanOutcome {
        let sigil = self.config.trigger().sigil();
        let mut has_content = false;

        while !lexer.is_eof() {
            let c = lexer.lookahead();
            let step = if c == sigil {
                self.interpolation_or_sigil(lexer, has_content)
            } else if c == TAG_OPEN {
                self.closing_tag_or_angle(lexer, has_content)
            } else {
                lexer.skip_until(sigil, TAG_OPEN);
                lexer.mark_end();
                Step::Content
            };

            match step {
                Step::Content => has_content = true,
                Step::Stop(outcome) => return outcome,
            }
        }

        if has_content {
            trace!("raw text runs to end of input");
            ScanOutcome::Handled(TokenKind::RawText)
        } else {
            trace!("declining at end of input");
            ScanOutcome::Declined
        }
    }

    /// Lexer is on the trigger sigil.
    ///
    /// With pending content, stops before the trigger so the next call
    /// starts on it. Without, consumes the trigger as its own token. A sigil
    /// that is not followed by the trigger's second character is content.
    fn interpolation_or_sigil<L: Lexer + ?Sized>(&self, lexer: &mut L, has_content: bool) -> Step {
        let open = self.config.trigger().open();

        lexer.mark_end();
        lexer.advance();

        if !lexer.is_eof() && lexer.lookahead() == open {
            if has_content {
                trace!("raw text ends before interpolation");
                return Step::Stop(ScanOutcome::Handled(TokenKind::RawText));
            }
            lexer.advance();
            lexer.mark_end();
            trace!("interpolation start");
            return Step::Stop(ScanOutcome::Handled(
                TokenKind::RawTextInterpolationStart,
            ));
        }

        lexer.mark_end();
        Step::Content
    }

    /// Lexer is on `<`.
    ///
    /// A recognized closing tag stops the scan: pending content becomes a
    /// `RawText` token that excludes the tag, otherwise the scan declines.
    /// Anything else, including a partial or unknown tag name, is content up
    /// to the first character that failed to match.
    fn closing_tag_or_angle<L: Lexer + ?Sized>(&self, lexer: &mut L, has_content: bool) -> Step {
        lexer.mark_end();
        lexer.advance();

        if lexer.lookahead() == TAG_SLASH && !lexer.is_eof() {
            lexer.advance();
            if let Some(tag) = match_closing_tag(lexer, self.config.closing_tags()) {
                return if has_content {
                    trace!(name = tag.name(), "raw text ends before closing tag");
                    Step::Stop(ScanOutcome::Handled(TokenKind::RawText))
                } else {
                    trace!(name = tag.name(), "declining at closing tag");
                    Step::Stop(ScanOutcome::Declined)
                };
            }
        }

        lexer.mark_end();
        Step::Content
    }
}

#[cfg(test)]
mod tests;

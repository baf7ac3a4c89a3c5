//! Scanner configuration.
//!
//! Everything here is compile-time data. [`ScannerConfig::PARSLEY`] is the
//! only configuration the Parsley grammar uses; other tables exist so a
//! grammar can add raw-text tags without touching the scanning loop.

use crate::closing_tag::{ClosingTag, MAX_CLOSING_TAGS, PARSLEY_CLOSING_TAGS};

/// The two-character sequence that opens an interpolation inside raw text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InterpolationTrigger {
    sigil: char,
    open: char,
}

impl InterpolationTrigger {
    /// Parsley's `@{`.
    pub const PARSLEY: Self = Self::new('@', '{');

    /// # Panics
    ///
    /// Panics if `sigil` is `<`, which would shadow closing-tag detection.
    pub const fn new(sigil: char, open: char) -> Self {
        assert!(sigil != '<', "interpolation sigil must not be '<'");
        Self { sigil, open }
    }

    /// First character (`@`).
    #[inline]
    pub const fn sigil(&self) -> char {
        self.sigil
    }

    /// Second character (`{`).
    #[inline]
    pub const fn open(&self) -> char {
        self.open
    }
}

impl Default for InterpolationTrigger {
    fn default() -> Self {
        Self::PARSLEY
    }
}

/// Closing-tag table plus interpolation trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScannerConfig {
    closing_tags: &'static [ClosingTag],
    trigger: InterpolationTrigger,
}

impl ScannerConfig {
    /// `style`, `script`, `SQL` and `@{`.
    pub const PARSLEY: Self = Self::new(PARSLEY_CLOSING_TAGS, InterpolationTrigger::PARSLEY);

    /// # Panics
    ///
    /// Panics if the table holds more than [`MAX_CLOSING_TAGS`] entries.
    pub const fn new(closing_tags: &'static [ClosingTag], trigger: InterpolationTrigger) -> Self {
        assert!(
            closing_tags.len() <= MAX_CLOSING_TAGS,
            "too many closing tags"
        );
        Self {
            closing_tags,
            trigger,
        }
    }

    #[must_use]
    pub const fn with_closing_tags(self, closing_tags: &'static [ClosingTag]) -> Self {
        Self::new(closing_tags, self.trigger)
    }

    #[must_use]
    pub const fn with_trigger(self, trigger: InterpolationTrigger) -> Self {
        Self::new(self.closing_tags, trigger)
    }

    #[inline]
    pub const fn closing_tags(&self) -> &'static [ClosingTag] {
        self.closing_tags
    }

    #[inline]
    pub const fn trigger(&self) -> InterpolationTrigger {
        self.trigger
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::PARSLEY
    }
}

#[cfg(test)]
mod tests;

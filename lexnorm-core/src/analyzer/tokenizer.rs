//! Whitespace tokenizer.
//!
//! Second stage of the pipeline. Takes the filtered string (lowercase ASCII
//! letters and whitespace) and yields each maximal run of non-whitespace
//! bytes as a token.
//!
//! ## Key Features
//!
//! - **Zero Allocation**: tokens are `&str` slices of the input
//! - **Lazy**: [`Tokens`] is an iterator, nothing is collected up front
//! - **Restartable**: every call to [`Tokenizer::tokenize`] rescans from the
//!   start; no cursor survives between calls
//! - **Tolerant**: leading, trailing and repeated whitespace never produce
//!   empty tokens
//!
//! ## Usage
//!
//! ```rust
//! use lexnorm_core::analyzer::tokenizer::Tokenizer;
//!
//! let tokenizer = Tokenizer::new();
//! let tokens: Vec<&str> = tokenizer.tokenize("  free\twin \n money ").collect();
//! assert_eq!(tokens, ["free", "win", "money"]);
//!
//! tokenizer.for_each_token("click here", |text, position| {
//!     // text="click"/"here", position=0/1
//! });
//! ```
//!
//! Splitting happens only on the filter's ASCII whitespace bytes, which are
//! never part of a multi-byte UTF-8 sequence, so slicing is always valid even
//! for input that did not go through the filter.

use core::iter::FusedIterator;

use super::filter::is_filter_ws;

/// Splits filtered text into tokens.
#[derive(Debug, Default, Copy, Clone)]
pub struct Tokenizer;

impl Tokenizer {
    /// Creates a tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Returns a lazy iterator over the tokens of `filtered`.
    #[inline]
    pub fn tokenize<'a>(&self, filtered: &'a str) -> Tokens<'a> {
        Tokens {
            text: filtered,
            cursor: 0,
        }
    }

    /// Emits `(text, position)` for every token, left to right.
    ///
    /// Position is `u32`. After emitting a token at position `u32::MAX`,
    /// further emissions stop.
    #[inline]
    pub fn for_each_token<'a, F>(&self, filtered: &'a str, mut emit: F)
    where
        F: FnMut(&'a str, u32),
    {
        let mut pos = 0u32;
        for text in self.tokenize(filtered) {
            emit(text, pos);
            if pos == u32::MAX {
                return;
            }
            pos += 1;
        }
    }

    /// Counts tokens without materializing them.
    #[inline]
    pub fn count(&self, filtered: &str) -> usize {
        self.tokenize(filtered).count()
    }
}

/// Iterator over the tokens of a filtered string.
///
/// Created by [`Tokenizer::tokenize`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();
        let mut i = self.cursor;

        while i < bytes.len() && is_filter_ws(bytes[i]) {
            i += 1;
        }
        if i == bytes.len() {
            self.cursor = i;
            return None;
        }

        let start = i;
        while i < bytes.len() && !is_filter_ws(bytes[i]) {
            i += 1;
        }
        self.cursor = i;

        Some(&self.text[start..i])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text.len() - self.cursor;
        (0, Some(remaining.div_ceil(2)))
    }
}

impl FusedIterator for Tokens<'_> {}

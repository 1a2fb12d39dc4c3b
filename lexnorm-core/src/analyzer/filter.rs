//! Case folding and character filtering.
//!
//! First stage of the pipeline. Every byte of the input is classified through
//! a 256-entry table: ASCII letters map to their lowercase form, ASCII
//! whitespace maps to itself, and everything else is removed. Because the
//! surviving alphabet is pure ASCII, the output is always valid UTF-8 and the
//! scan never needs to decode characters.

use serde::Deserialize;

const DROP: u8 = 0;

const CLASS_TABLE: [u8; 256] = build_class_table();

const fn build_class_table() -> [u8; 256] {
    let mut table = [DROP; 256];

    let mut b = b'a';
    while b <= b'z' {
        table[b as usize] = b;
        table[(b - 0x20) as usize] = b;
        b += 1;
    }

    table[b' ' as usize] = b' ';
    table[b'\t' as usize] = b'\t';
    table[b'\n' as usize] = b'\n';
    table[0x0b] = 0x0b;
    table[0x0c] = 0x0c;
    table[b'\r' as usize] = b'\r';
    table
}

/// ASCII whitespace as the filter understands it.
///
/// Includes vertical tab (0x0B), unlike [`u8::is_ascii_whitespace`].
#[inline(always)]
pub const fn is_filter_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

#[inline(always)]
const fn is_utf8_continuation(b: u8) -> bool {
    b & 0xc0 == 0x80
}

/// What happens to a character that is neither a letter nor whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Remove it. Words on either side are fused: `"spam-free"` → `"spamfree"`.
    #[default]
    Delete,
    /// Replace it with a single space: `"spam-free"` → `"spam free"`.
    Space,
}

/// Lowercases ASCII letters and strips everything but `a-z` and whitespace.
///
/// # Examples
///
/// ```
/// use lexnorm_core::analyzer::filter::{CharFilter, FilterMode};
///
/// let filter = CharFilter::default();
/// assert_eq!(filter.filter("Win $100 NOW!"), "win  now");
///
/// let spacer = CharFilter::new(FilterMode::Space);
/// assert_eq!(spacer.filter("spam-free"), "spam free");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CharFilter {
    mode: FilterMode,
}

impl CharFilter {
    /// Creates a filter with the given handling for removed characters.
    #[inline]
    pub const fn new(mode: FilterMode) -> Self {
        Self { mode }
    }

    /// Returns the configured mode.
    #[inline]
    pub const fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Filters text into an existing buffer.
    ///
    /// Clears the buffer first and reuses its capacity.
    pub fn filter_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        match self.mode {
            FilterMode::Delete => {
                for &b in input.as_bytes() {
                    let mapped = CLASS_TABLE[b as usize];
                    if mapped != DROP {
                        out.push(mapped as char);
                    }
                }
            }
            FilterMode::Space => {
                for &b in input.as_bytes() {
                    let mapped = CLASS_TABLE[b as usize];
                    if mapped != DROP {
                        out.push(mapped as char);
                    } else if !is_utf8_continuation(b) {
                        // one space per removed character, not per byte
                        out.push(' ');
                    }
                }
            }
        }
    }

    /// Filters text and returns a new String.
    #[inline]
    pub fn filter(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.filter_into(input, &mut out);
        out
    }
}

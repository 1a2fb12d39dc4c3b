//! Stopword sets and filtering.
//!
//! A [`StopwordSet`] is built once at startup and only read afterwards. It is
//! `Send + Sync`, so a single instance behind `&` or `Arc` serves every
//! concurrent caller. Membership is an exact, case-sensitive match; entries
//! are stored lowercase and tokens arrive lowercase from the filter.
//!
//! Every set carries a version label and a content fingerprint. Normalized
//! data that is persisted or reused should record both, since changing the
//! list changes the output for every input containing an affected word.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lexnorm_types::StopwordError;
use rustc_hash::FxHashSet;

const ENGLISH_V1: &str = include_str!("../../assets/english-v1.txt");

/// Label of the built-in English list.
pub const ENGLISH_V1_LABEL: &str = "english-v1";

/// Immutable set of lowercase stopwords.
#[derive(Clone)]
pub struct StopwordSet {
    label: String,
    words: FxHashSet<Box<str>>,
}

impl StopwordSet {
    /// The built-in English list (NLTK English corpus, 179 words).
    pub fn english() -> Self {
        let words = ENGLISH_V1
            .lines()
            .filter_map(|line| parse_line(line).ok()?)
            .collect();
        Self {
            label: ENGLISH_V1_LABEL.to_string(),
            words,
        }
    }

    /// A set with no members; the stopword stage becomes a no-op.
    pub fn empty() -> Self {
        Self {
            label: "empty".to_string(),
            words: FxHashSet::default(),
        }
    }

    /// Builds a set from an explicit word list.
    ///
    /// Words are ASCII-lowercased; empty words are skipped.
    pub fn from_words<I, S>(label: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|w| {
                let w = w.as_ref().trim();
                (!w.is_empty()).then(|| w.to_ascii_lowercase().into_boxed_str())
            })
            .collect();
        Self {
            label: label.into(),
            words,
        }
    }

    /// Reads a list with one word per line.
    ///
    /// Blank lines and `#` comments are ignored; entries are trimmed and
    /// ASCII-lowercased.
    ///
    /// # Errors
    ///
    /// Returns `StopwordError::Io` if reading fails and
    /// `StopwordError::InvalidEntry` for an entry containing whitespace.
    pub fn from_reader<R: BufRead>(label: impl Into<String>, reader: R) -> Result<Self, StopwordError> {
        let mut words = FxHashSet::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| StopwordError::Io { path: None, source })?;
            match parse_line(&line) {
                Ok(Some(word)) => {
                    words.insert(word);
                }
                Ok(None) => {}
                Err(entry) => {
                    return Err(StopwordError::InvalidEntry {
                        line: idx + 1,
                        entry,
                    })
                }
            }
        }

        let set = Self {
            label: label.into(),
            words,
        };
        tracing::info!(
            label = %set.label,
            words = set.len(),
            fingerprint = %set.fingerprint(),
            "loaded stopword list"
        );
        Ok(set)
    }

    /// Reads a list from a file. The label is the file stem.
    ///
    /// # Errors
    ///
    /// Same as [`StopwordSet::from_reader`]; I/O errors carry the path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StopwordError> {
        let path = path.as_ref();
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let file = File::open(path).map_err(|source| StopwordError::Io {
            path: Some(path.to_path_buf()),
            source,
        })?;

        Self::from_reader(label, BufReader::new(file)).map_err(|err| match err {
            StopwordError::Io { source, .. } => StopwordError::Io {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    /// Exact membership test.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Wraps a token iterator, dropping stopwords and keeping order.
    #[inline]
    pub fn retain_non_stopwords<I>(&self, tokens: I) -> NonStopwords<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        NonStopwords {
            set: self,
            inner: tokens.into_iter(),
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if the set has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Version label, e.g. `"english-v1"`.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Entries in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let mut sorted: Vec<&str> = self.words.iter().map(|w| &**w).collect();
        sorted.sort_unstable();
        sorted.into_iter()
    }

    /// blake3 hex digest of the sorted, newline-joined entries.
    ///
    /// Independent of the label and of insertion order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for word in self.iter() {
            hasher.update(word.as_bytes());
            hasher.update(b"\n");
        }
        hasher.finalize().to_hex().to_string()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Debug for StopwordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopwordSet")
            .field("label", &self.label)
            .field("len", &self.words.len())
            .finish()
    }
}

/// `Ok(None)` for blank/comment lines, `Err(entry)` for entries with
/// internal whitespace.
fn parse_line(line: &str) -> Result<Option<Box<str>>, String> {
    let entry = line.split('#').next().unwrap_or("").trim();
    if entry.is_empty() {
        return Ok(None);
    }
    if entry.chars().any(char::is_whitespace) {
        return Err(entry.to_string());
    }
    Ok(Some(entry.to_ascii_lowercase().into_boxed_str()))
}

/// Iterator that skips stopwords.
///
/// Created by [`StopwordSet::retain_non_stopwords`].
#[derive(Debug, Clone)]
pub struct NonStopwords<'s, I> {
    set: &'s StopwordSet,
    inner: I,
}

impl<I> Iterator for NonStopwords<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        let set = self.set;
        self.inner.find(|t| !set.contains(t.as_ref()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn english_has_179_entries() {
        let set = StopwordSet::english();
        assert_eq!(set.len(), 179);
        assert_eq!(set.label(), "english-v1");
    }

    #[test]
    fn every_asset_line_parses() {
        for (idx, line) in ENGLISH_V1.lines().enumerate() {
            assert!(parse_line(line).is_ok(), "line {}: {line:?}", idx + 1);
        }
        let entries = ENGLISH_V1
            .lines()
            .filter(|l| matches!(parse_line(l), Ok(Some(_))))
            .count();
        assert_eq!(entries, StopwordSet::english().len());
    }

    #[test]
    fn english_members() {
        let set = StopwordSet::english();
        for w in ["the", "a", "an", "here", "now", "i", "don't", "wouldn"] {
            assert!(set.contains(w), "{w} should be a stopword");
        }
        for w in ["free", "win", "money", "click", "spam"] {
            assert!(!set.contains(w), "{w} should not be a stopword");
        }
    }

    #[test]
    fn match_is_exact() {
        let set = StopwordSet::english();
        assert!(!set.contains("The"));
        assert!(!set.contains("the "));
        assert!(!set.contains("th"));
    }

    #[test]
    fn asset_parses_the_same_through_reader() {
        let from_reader = StopwordSet::from_reader("english-v1", Cursor::new(ENGLISH_V1)).unwrap();
        assert_eq!(from_reader.fingerprint(), StopwordSet::english().fingerprint());
    }

    #[test]
    fn retain_preserves_order() {
        let set = StopwordSet::from_words("t", ["here", "now"]);
        let tokens = ["free", "win", "money", "now", "click", "here"];
        let kept: Vec<_> = set.retain_non_stopwords(tokens).collect();
        assert_eq!(kept, ["free", "win", "money", "click"]);
    }

    #[test]
    fn retain_accepts_owned_tokens() {
        let set = StopwordSet::from_words("t", ["b"]);
        let tokens = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let kept: Vec<String> = set.retain_non_stopwords(tokens).collect();
        assert_eq!(kept, ["a", "c"]);
    }

    #[test]
    fn empty_set_keeps_everything() {
        let set = StopwordSet::empty();
        assert!(set.is_empty());
        let kept: Vec<_> = set.retain_non_stopwords(["the", "a"]).collect();
        assert_eq!(kept, ["the", "a"]);
    }

    #[test]
    fn from_words_lowercases_and_skips_blank() {
        let set = StopwordSet::from_words("t", ["THE", " A ", ""]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("the"));
        assert!(set.contains("a"));
    }

    #[test]
    fn reader_skips_comments_and_blank_lines() {
        let text = "# header\n\nfoo\n  Bar  # trailing\n#baz\n";
        let set = StopwordSet::from_reader("custom", Cursor::new(text)).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), ["bar", "foo"]);
    }

    #[test]
    fn reader_rejects_multi_word_entry() {
        let text = "ok\nnot ok\n";
        match StopwordSet::from_reader("custom", Cursor::new(text)) {
            Err(StopwordError::InvalidEntry { line, entry }) => {
                assert_eq!(line, 2);
                assert_eq!(entry, "not ok");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn reader_reports_invalid_utf8_as_io() {
        let bytes: &[u8] = b"ok\n\xff\xfe\n";
        let err = StopwordSet::from_reader("custom", Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, StopwordError::Io { path: None, .. }));
    }

    #[test]
    fn from_path_uses_file_stem_as_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spam-v2.txt");
        std::fs::write(&path, "here\nnow\n").unwrap();

        let set = StopwordSet::from_path(&path).unwrap();
        assert_eq!(set.label(), "spam-v2");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn from_path_missing_file_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        match StopwordSet::from_path(&path) {
            Err(StopwordError::Io { path: Some(p), .. }) => assert_eq!(p, path),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn fingerprint_ignores_order_and_label() {
        let a = StopwordSet::from_words("a", ["x", "y", "z"]);
        let b = StopwordSet::from_words("b", ["z", "x", "y"]);
        let c = StopwordSet::from_words("a", ["x", "y"]);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn set_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StopwordSet>();
    }
}

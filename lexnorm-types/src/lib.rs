//! Core types and traits for the lexnorm normalization pipeline.
//!
//! This crate holds the values that cross crate and service boundaries.
//! Keeping them separate from the engine means:
//!
//! - **Stable boundaries**: the classifier side only needs these types
//! - **No engine coupling**: callers can depend on results without the pipeline
//! - **Clean errors**: load-time failures are described once, here

#![warn(missing_docs)]

use core::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Output of the normalization pipeline.
///
/// Holds the ordered stems and the single string formed by joining them
/// with one ASCII space. `text` is always `tokens.join(" ")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NormalizedResult {
    tokens: Vec<String>,
    text: String,
}

impl NormalizedResult {
    /// Builds a result from an ordered token sequence.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let text = tokens.join(" ");
        Self { tokens, text }
    }

    /// Ordered, stemmed, filtered tokens.
    #[inline]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Space-joined form handed to the classifier.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the input reduced to nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Consumes the result and returns the joined string.
    #[inline]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for NormalizedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<NormalizedResult> for String {
    #[inline]
    fn from(result: NormalizedResult) -> Self {
        result.text
    }
}

/// Spam judgment returned by a classifier.
///
/// Serializes as `{"isSpam": bool, "confidence": number}`, the shape the
/// prediction service answers with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Whether the message was judged to be spam.
    pub is_spam: bool,
    /// Probability of the predicted class, in `[0, 1]`.
    pub confidence: f32,
}

impl Verdict {
    /// Label the model uses for the positive class.
    pub const SPAM_LABEL: &'static str = "spam";

    /// Creates a verdict, rounding confidence to 4 decimal places.
    pub fn new(is_spam: bool, confidence: f32) -> Self {
        Self {
            is_spam,
            confidence: round4(confidence),
        }
    }

    /// Creates a verdict from a predicted class label.
    ///
    /// Only the exact label `"spam"` counts as spam; anything else (`"ham"`)
    /// is treated as legitimate mail.
    pub fn from_label(label: &str, confidence: f32) -> Self {
        Self::new(label == Self::SPAM_LABEL, confidence)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.is_spam { "spam" } else { "ham" };
        write!(f, "{} ({:.4})", label, self.confidence)
    }
}

#[inline]
fn round4(x: f32) -> f32 {
    (x * 10_000.0).round() / 10_000.0
}

/// External spam classifier.
///
/// The pipeline hands it the normalized string as one opaque feature input.
/// Transport, model format and scoring live on the implementor's side.
pub trait Classifier {
    /// Failure reported by the classifier (transport, model, ...).
    type Error;

    /// Classifies an already-normalized message.
    fn classify(&self, normalized: &str) -> Result<Verdict, Self::Error>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    type Error = C::Error;

    #[inline]
    fn classify(&self, normalized: &str) -> Result<Verdict, Self::Error> {
        (**self).classify(normalized)
    }
}

/// Errors that can occur when loading a stopword list.
#[derive(Debug, thiserror::Error)]
pub enum StopwordError {
    /// The list could not be read.
    #[error("failed to read stopword list {}: {source}", display_path(.path))]
    Io {
        /// File the list was read from, if any.
        path: Option<PathBuf>,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// An entry contains whitespace and could never match a token.
    #[error("invalid stopword entry on line {line}: {entry:?}")]
    InvalidEntry {
        /// 1-based line number.
        line: usize,
        /// The offending entry, trimmed.
        entry: String,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "<reader>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_joins_with_single_space() {
        let r = NormalizedResult::from_tokens(vec!["free".into(), "win".into(), "monei".into()]);
        assert_eq!(r.as_str(), "free win monei");
        assert_eq!(r.len(), 3);
        assert_eq!(r.to_string(), "free win monei");
    }

    #[test]
    fn empty_result() {
        let r = NormalizedResult::from_tokens(Vec::new());
        assert!(r.is_empty());
        assert_eq!(r.as_str(), "");
        assert_eq!(r, NormalizedResult::default());
    }

    #[test]
    fn into_string_returns_text() {
        let r = NormalizedResult::from_tokens(vec!["click".into()]);
        let s: String = r.clone().into();
        assert_eq!(s, "click");
        assert_eq!(r.into_string(), "click");
    }

    #[test]
    fn verdict_from_label() {
        assert!(Verdict::from_label("spam", 0.9).is_spam);
        assert!(!Verdict::from_label("ham", 0.9).is_spam);
        assert!(!Verdict::from_label("SPAM", 0.9).is_spam);
    }

    #[test]
    fn verdict_rounds_confidence() {
        let v = Verdict::new(true, 0.987_654);
        assert!((v.confidence - 0.9877).abs() < 1e-6);
    }

    #[test]
    fn verdict_wire_shape() {
        let v = Verdict::new(true, 0.5);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"isSpam":true,"confidence":0.5}"#);

        let back: Verdict = serde_json::from_str(r#"{"isSpam":false,"confidence":0.25}"#).unwrap();
        assert_eq!(back, Verdict::new(false, 0.25));
    }

    #[test]
    fn verdict_display() {
        assert_eq!(Verdict::new(false, 0.75).to_string(), "ham (0.7500)");
    }

    #[test]
    fn classifier_by_reference() {
        struct Always;
        impl Classifier for Always {
            type Error = ();
            fn classify(&self, _: &str) -> Result<Verdict, ()> {
                Ok(Verdict::new(true, 1.0))
            }
        }

        fn run<C: Classifier>(c: C) -> Result<Verdict, C::Error> {
            c.classify("anyth")
        }

        assert!(run(&Always).unwrap().is_spam);
    }

    #[test]
    fn stopword_error_messages() {
        let e = StopwordError::InvalidEntry {
            line: 3,
            entry: "two words".into(),
        };
        assert_eq!(e.to_string(), "invalid stopword entry on line 3: \"two words\"");

        let e = StopwordError::Io {
            path: None,
            source: io::Error::new(io::ErrorKind::Other, "boom"),
        };
        assert_eq!(e.to_string(), "failed to read stopword list <reader>: boom");
    }
}

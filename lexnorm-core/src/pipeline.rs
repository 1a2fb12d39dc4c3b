//! The normalization pipeline.
//!
//! Runs the stages in a fixed order:
//!
//! 1. [`CharFilter`]: ASCII case fold, drop everything but `a-z` and whitespace
//! 2. [`Tokenizer`]: split on whitespace runs
//! 3. [`StopwordSet`]: drop exact stopword matches
//! 4. [`PorterStemmer`]: stem each survivor
//!
//! and joins the result with single spaces. The whole thing is a pure, total
//! function of the input text and the (immutable) configuration: no I/O, no
//! locks, no shared mutable state. A [`Normalizer`] can be shared across
//! threads by reference or `Arc`.

use std::sync::Arc;

use lexnorm_types::NormalizedResult;

use crate::analyzer::filter::CharFilter;
use crate::analyzer::stemmer::PorterStemmer;
use crate::analyzer::stopwords::StopwordSet;
use crate::analyzer::tokenizer::Tokenizer;
use crate::config::{ConfigError, NormalizerConfig};

/// Normalizes `text` with the default filter and Porter stemming.
///
/// # Examples
///
/// ```
/// use lexnorm_core::{normalize, StopwordSet};
///
/// let stopwords = StopwordSet::from_words("demo", ["here", "now"]);
/// let result = normalize("FREE!! Win $$$ money now, click here", &stopwords);
/// assert_eq!(result.as_str(), "free win monei click");
/// ```
pub fn normalize(text: &str, stopwords: &StopwordSet) -> NormalizedResult {
    let filtered = CharFilter::default().filter(text);
    run_stages(&filtered, stopwords, Some(&PorterStemmer::new()))
}

fn run_stages(
    filtered: &str,
    stopwords: &StopwordSet,
    stemmer: Option<&PorterStemmer>,
) -> NormalizedResult {
    let tokens = stopwords.retain_non_stopwords(Tokenizer::new().tokenize(filtered));
    let stems: Vec<String> = match stemmer {
        Some(stemmer) => tokens.map(|t| stemmer.stem(t)).collect(),
        None => tokens.map(str::to_owned).collect(),
    };
    NormalizedResult::from_tokens(stems)
}

/// Reusable, thread-safe normalization handle.
///
/// Holds the stopword set behind an `Arc` so clones are cheap and every
/// clone reads the same immutable list.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: Arc<StopwordSet>,
    filter: CharFilter,
    stemmer: Option<PorterStemmer>,
}

impl Normalizer {
    /// Creates a normalizer with default options and the given stopwords.
    pub fn new(stopwords: impl Into<Arc<StopwordSet>>) -> Self {
        Self {
            stopwords: stopwords.into(),
            filter: CharFilter::default(),
            stemmer: Some(PorterStemmer::new()),
        }
    }

    /// Creates a normalizer with explicit options.
    ///
    /// `config.stopwords` is ignored; the given set is used instead.
    pub fn with_config(stopwords: impl Into<Arc<StopwordSet>>, config: &NormalizerConfig) -> Self {
        Self {
            stopwords: stopwords.into(),
            filter: CharFilter::new(config.filter_mode),
            stemmer: config.stemming.then(PorterStemmer::new),
        }
    }

    /// Builds a normalizer from configuration, loading its stopword list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Stopwords` if the configured list can't be loaded.
    pub fn from_config(config: &NormalizerConfig) -> Result<Self, ConfigError> {
        let stopwords = config.stopwords.load()?;
        tracing::info!(
            filter_mode = ?config.filter_mode,
            stemming = config.stemming,
            stopwords = stopwords.label(),
            stopword_count = stopwords.len(),
            "normalizer ready"
        );
        Ok(Self::with_config(stopwords, config))
    }

    /// The stopword set in use.
    #[inline]
    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// The character filter in use.
    #[inline]
    pub fn filter(&self) -> CharFilter {
        self.filter
    }

    /// Whether stemming is enabled.
    #[inline]
    pub fn stems(&self) -> bool {
        self.stemmer.is_some()
    }

    /// Runs the full pipeline.
    pub fn normalize(&self, text: &str) -> NormalizedResult {
        let filtered = self.filter.filter(text);
        run_stages(&filtered, &self.stopwords, self.stemmer.as_ref())
    }

    /// Runs the full pipeline using `scratch` for the filtered intermediate.
    ///
    /// Lets a caller in a hot loop reuse one buffer across calls.
    pub fn normalize_with(&self, text: &str, scratch: &mut String) -> NormalizedResult {
        self.filter.filter_into(text, scratch);
        run_stages(scratch, &self.stopwords, self.stemmer.as_ref())
    }

    /// Runs the full pipeline and returns only the joined string.
    #[inline]
    pub fn normalize_to_string(&self, text: &str) -> String {
        self.normalize(text).into_string()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(StopwordSet::english())
    }
}

//! Deterministic text normalization for spam classification.
//!
//! Turns arbitrary text into a space-joined sequence of lowercase Porter
//! stems with stopwords removed. The output is the single feature string an
//! external classifier consumes.
//!
//! ```
//! use lexnorm_core::{Normalizer, StopwordSet};
//!
//! let normalizer = Normalizer::new(StopwordSet::english());
//! assert_eq!(normalizer.normalize_to_string("Winning prizes! Clicked offers"), "win prize click offer");
//! ```

pub mod analyzer;
pub mod classify;
pub mod config;
pub mod pipeline;

pub use analyzer::{CharFilter, FilterMode, PorterStemmer, StopwordSet, Tokenizer};
pub use config::{ConfigError, NormalizerConfig, StopwordSource};
pub use lexnorm_types::{Classifier, NormalizedResult, StopwordError, Verdict};
pub use pipeline::{normalize, Normalizer};

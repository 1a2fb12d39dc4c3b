//! Normalize-then-classify glue.

use lexnorm_types::{Classifier, Verdict};

use crate::pipeline::Normalizer;

/// Normalizes `raw` and hands the joined string to `classifier`.
///
/// Input that reduces to nothing is still forwarded as `""`; deciding what
/// an empty feature string means is the classifier's call.
///
/// # Errors
///
/// Returns whatever the classifier reports. Normalization itself can't fail.
pub fn check<C>(normalizer: &Normalizer, classifier: &C, raw: &str) -> Result<Verdict, C::Error>
where
    C: Classifier + ?Sized,
{
    let normalized = normalizer.normalize(raw);
    tracing::trace!(tokens = normalized.len(), "classifying normalized text");
    classifier.classify(normalized.as_str())
}

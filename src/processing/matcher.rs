use crate::processing::fuzzy::{partial_ratio, ratio};

/// Decides whether an OCR span names a known field.
pub struct FieldMatcher;

impl FieldMatcher {
    /// First candidate label whose partial similarity to `text` exceeds
    /// `threshold`. Comparison is case-insensitive so labels are found
    /// inside longer, noisy spans.
    pub fn match_label<'a, S: AsRef<str>>(
        text: &str,
        candidates: &'a [S],
        threshold: f64,
    ) -> Option<&'a str> {
        let text = text.to_lowercase();
        candidates
            .iter()
            .map(AsRef::as_ref)
            .find(|label| partial_ratio(&label.to_lowercase(), &text) > threshold)
    }

    /// Closest candidate label to the whole of `text`, with its score.
    /// Ties keep the earliest candidate.
    pub fn best_label_match<'a, S: AsRef<str>>(
        text: &str,
        candidates: &'a [S],
    ) -> Option<(&'a str, f64)> {
        let text = text.to_lowercase();
        let mut best: Option<(&'a str, f64)> = None;

        for label in candidates.iter().map(AsRef::as_ref) {
            let score = ratio(&label.to_lowercase(), &text);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((label, score)),
            }
        }

        best
    }
}

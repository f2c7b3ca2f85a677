use crate::processing::fuzzy::ratio;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameMatch {
    pub field: String,
    #[serde(rename = "match")]
    pub matched: bool,
    pub score: f64,
}

/// Compares the same person's name as read from two documents.
pub struct NameValidator;

impl NameValidator {
    pub fn compare(first: &str, second: &str, threshold: f64) -> NameMatch {
        let score = ratio(&first.to_uppercase(), &second.to_uppercase());
        NameMatch {
            field: "Name".to_string(),
            matched: score >= threshold,
            score,
        }
    }
}

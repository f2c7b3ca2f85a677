use crate::models::catalog::{catalog_fields, CatalogField};
use crate::models::{OcrSpan, ValidationRule};
use crate::processing::fuzzy::partial_ratio;
use crate::processing::normalizer::normalize_digits;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// A span recognised as one of the catalog's form fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedField {
    pub field_name_en: String,
    pub field_name_np: String,
    pub raw_text: String,
    pub extracted_value: String,
    pub validation: ValidationRule,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Classification {
    /// Catalog field id -> classified span.
    pub matched_fields: IndexMap<String, ClassifiedField>,
    pub unmatched_text: Vec<String>,
}

/// Template-free extraction: every span is compared against every label
/// pattern of the insurance form catalog, and the value is read out of the
/// same span with the field's validation rule.
pub struct SpanClassifier {
    threshold: f64,
    index: Vec<(&'static str, &'static CatalogField)>,
}

impl SpanClassifier {
    pub fn new(threshold: f64) -> Self {
        let index = catalog_fields()
            .flat_map(|field| field.patterns.iter().map(move |pattern| (*pattern, field)))
            .collect();
        SpanClassifier { threshold, index }
    }

    /// Catalog field whose pattern best matches `text`, if any clears the
    /// threshold.
    pub fn find_matching_field(&self, text: &str) -> Option<&'static CatalogField> {
        let text = text.to_lowercase();
        let mut best: Option<(f64, &'static CatalogField)> = None;

        for (pattern, field) in &self.index {
            let score = partial_ratio(&pattern.to_lowercase(), &text);
            if score <= self.threshold {
                continue;
            }
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, field));
            }
        }

        best.map(|(_, field)| field)
    }

    pub fn extract_value(text: &str, field: &CatalogField) -> String {
        let text = normalize_digits(text);
        match field.validation.find(&text) {
            Some(value) => value.to_string(),
            None => text.trim().to_string(),
        }
    }

    pub fn classify(&self, spans: &[OcrSpan]) -> Classification {
        let mut classification = Classification::default();

        for span in spans {
            match self.find_matching_field(&span.text) {
                Some(field) => {
                    debug!("Span '{}' classified as {} ({})", span.text, field.id, field.name_en);
                    classification.matched_fields.insert(
                        field.id.to_string(),
                        ClassifiedField {
                            field_name_en: field.name_en.to_string(),
                            field_name_np: field.name_np.to_string(),
                            raw_text: span.text.clone(),
                            extracted_value: Self::extract_value(&span.text, field),
                            validation: field.validation,
                            confidence: span.confidence,
                        },
                    );
                }
                None => classification.unmatched_text.push(span.text.clone()),
            }
        }

        classification
    }
}

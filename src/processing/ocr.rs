use crate::models::{ExtractedField, ExtractionConfig, ExtractionResult, FieldDefinition, OcrSpan};
use crate::processing::locator::SpatialLocator;
use crate::processing::matcher::FieldMatcher;
use crate::processing::normalizer::extract_typed;
use log::debug;

/// Turns a page's OCR spans into typed field values for a template.
///
/// Holds only configuration; every call is independent, so one processor can
/// be shared across documents and threads.
#[derive(Debug, Clone)]
pub struct OcrProcessor {
    label_threshold: f64,
    locator: SpatialLocator,
}

impl Default for OcrProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrProcessor {
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    pub fn with_config(config: &ExtractionConfig) -> Self {
        OcrProcessor {
            label_threshold: config.label_threshold,
            locator: SpatialLocator::new(config.same_line_tolerance, config.next_line_distance),
        }
    }

    /// Extract a value for each field, in declared order.
    ///
    /// A field whose label, value span, or normalized value cannot be found is
    /// left out of the result.
    pub fn process_results(
        &self,
        spans: &[OcrSpan],
        fields: &[FieldDefinition],
    ) -> ExtractionResult {
        let mut extracted = ExtractionResult::new();

        for field in fields {
            let labels = field.effective_labels();

            let Some(label_index) = self.find_label(spans, &labels) else {
                debug!("No label found for field '{}'", field.name);
                continue;
            };
            let label_span = &spans[label_index];

            let Some(raw) = self.locator.find_value_near(spans, label_index) else {
                debug!(
                    "Label '{}' for field '{}' has no nearby value",
                    label_span.text, field.name
                );
                continue;
            };

            match extract_typed(raw, &field.field_type) {
                Some(value) if !value.is_empty() => {
                    debug!("Field '{}' = '{}' (raw '{}')", field.name, value, raw);
                    extracted.insert(
                        field.name.clone(),
                        ExtractedField {
                            value: Some(value),
                            raw: raw.to_string(),
                            field_type: field.field_type.clone(),
                            confidence: label_span.confidence,
                        },
                    );
                }
                _ => debug!(
                    "Value '{}' is not a valid {} for '{}'",
                    raw, field.field_type, field.name
                ),
            }
        }

        extracted
    }

    /// Index of the first span naming any of `labels`.
    fn find_label(&self, spans: &[OcrSpan], labels: &[&str]) -> Option<usize> {
        spans
            .iter()
            .position(|span| {
                FieldMatcher::match_label(&span.text, labels, self.label_threshold).is_some()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundingBox, FieldType};

    fn span(text: &str, confidence: f32, x: f32, y: f32) -> OcrSpan {
        OcrSpan::new(text, confidence, BoundingBox::from_rect(x, y, 60.0, 18.0))
    }

    #[test]
    fn test_email_to_the_right() {
        let spans = vec![span("Email", 0.91, 10.0, 10.0), span("a@b.com", 0.88, 80.0, 10.0)];
        let fields = vec![FieldDefinition::new("Email", FieldType::Email, &["Email"])];

        let result = OcrProcessor::new().process_results(&spans, &fields);

        assert_eq!(result.len(), 1);
        let email = &result["Email"];
        assert_eq!(email.value.as_deref(), Some("a@b.com"));
        assert_eq!(email.raw, "a@b.com");
        assert_eq!(email.field_type, FieldType::Email);
        assert_eq!(email.confidence, 0.91);
    }

    #[test]
    fn test_bilingual_form_page() {
        let spans = vec![
            span("जन्म मिति", 0.8, 10.0, 10.0),
            span("२०४५-०३-१५", 0.7, 150.0, 12.0),
            span("मोबाइल नं.", 0.85, 10.0, 60.0),
            span("९८४१२३४५६७", 0.9, 150.0, 61.0),
            span("मासिक आय", 0.75, 10.0, 120.0),
            span("रु. ४५,०००", 0.6, 150.0, 118.0),
        ];
        let fields = vec![
            FieldDefinition::new("Date of Birth", FieldType::Date, &["जन्म मिति", "Date of Birth"]),
            FieldDefinition::new("Mobile", FieldType::Mobile, &["मोबाइल", "Mobile"]),
            FieldDefinition::new("Monthly Income", FieldType::Currency, &["मासिक आय"]),
        ];

        let result = OcrProcessor::new().process_results(&spans, &fields);

        assert_eq!(result["Date of Birth"].value.as_deref(), Some("2045/03/15"));
        assert_eq!(result["Mobile"].value.as_deref(), Some("9841234567"));
        assert_eq!(result["Mobile"].raw, "९८४१२३४५६७");
        assert_eq!(result["Monthly Income"].value.as_deref(), Some("Rs. 45000"));
        let order: Vec<&str> = result.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["Date of Birth", "Mobile", "Monthly Income"]);
    }

    #[test]
    fn test_missing_evidence_is_omitted() {
        let spans = vec![
            span("PAN", 0.9, 10.0, 10.0),
            span("not a number", 0.9, 80.0, 10.0),
            span("Nationality", 0.9, 10.0, 200.0),
        ];
        let fields = vec![
            FieldDefinition::new("PAN", FieldType::Pan, &["PAN"]),
            FieldDefinition::new("Nationality", FieldType::Text, &["Nationality"]),
            FieldDefinition::new("Occupation", FieldType::Text, &["Occupation"]),
        ];

        let result = OcrProcessor::new().process_results(&spans, &fields);
        assert!(result.is_empty());
    }

    #[test]
    fn test_field_without_labels_matches_its_name() {
        let spans = vec![span("Ward", 0.9, 10.0, 10.0), span(" 7 ", 0.9, 80.0, 10.0)];
        let fields = vec![FieldDefinition::new("Ward", FieldType::Number, &[])];

        let result = OcrProcessor::new().process_results(&spans, &fields);
        assert_eq!(result["Ward"].value.as_deref(), Some("7"));
    }

    #[test]
    fn test_first_label_span_is_used() {
        // The second "Phone" label is never consulted, even though only it
        // has a usable value.
        let spans = vec![
            span("Phone", 0.9, 10.0, 10.0),
            span("n/a", 0.9, 80.0, 10.0),
            span("Phone", 0.9, 10.0, 200.0),
            span("9812345678", 0.9, 80.0, 200.0),
        ];
        let fields = vec![FieldDefinition::new("Phone", FieldType::Phone, &["Phone"])];

        let result = OcrProcessor::new().process_results(&spans, &fields);
        assert!(result.get("Phone").is_none());
    }

    #[test]
    fn test_processing_is_repeatable() {
        let spans = vec![span("Email", 0.5, 10.0, 10.0), span("x@y.org", 0.5, 80.0, 10.0)];
        let fields = vec![FieldDefinition::new("Email", FieldType::Email, &[])];
        let processor = OcrProcessor::new();

        assert_eq!(
            processor.process_results(&spans, &fields),
            processor.process_results(&spans, &fields)
        );
    }
}

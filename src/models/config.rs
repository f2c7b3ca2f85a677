use crate::utils::FormError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds and tolerances for matching and locating fields.
///
/// Similarity thresholds are on the 0-100 scale of `processing::fuzzy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Partial similarity a span must exceed to count as a field label.
    pub label_threshold: f64,
    /// Full similarity needed to map a span onto a template field.
    pub field_match_threshold: f64,
    /// Partial similarity a label must exceed to vote for a template.
    pub template_label_threshold: f64,
    /// Votes needed before a template is auto-selected.
    pub template_min_score: usize,
    /// Leading spans inspected during template auto-detection.
    pub template_head_spans: usize,
    /// Vertical distance (px) under which two spans share a line.
    pub same_line_tolerance: f32,
    /// Vertical distance (px) under which a lower span is the next line.
    pub next_line_distance: f32,
    /// Spans below this OCR confidence are discarded before extraction.
    pub min_confidence: f32,
    pub name_match_threshold: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            label_threshold: 75.0,
            field_match_threshold: 70.0,
            template_label_threshold: 80.0,
            template_min_score: 3,
            template_head_spans: 20,
            same_line_tolerance: 20.0,
            next_line_distance: 50.0,
            min_confidence: 0.25,
            name_match_threshold: 85.0,
        }
    }
}

impl ExtractionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, FormError> {
        let config: ExtractionConfig = serde_json::from_str(json)
            .map_err(|e| FormError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, FormError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let thresholds = [
            ("label_threshold", self.label_threshold),
            ("field_match_threshold", self.field_match_threshold),
            ("template_label_threshold", self.template_label_threshold),
            ("name_match_threshold", self.name_match_threshold),
        ];
        for (name, value) in thresholds {
            if !(0.0..=100.0).contains(&value) {
                return Err(FormError::Config(format!(
                    "{} must be within 0-100, got {}",
                    name, value
                )));
            }
        }
        if self.same_line_tolerance < 0.0 || self.next_line_distance < 0.0 {
            return Err(FormError::Config("Line tolerances must not be negative".to_string()));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(FormError::Config(format!(
                "min_confidence must be within 0-1, got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Four corner points of a recognized span, in pixel coordinates.
/// The first point is the top-left reference used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundingBox(pub [[f32; 2]; 4]);

impl BoundingBox {
    /// Axis-aligned box from its top-left corner and size.
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        BoundingBox([
            [x, y],
            [x + width, y],
            [x + width, y + height],
            [x, y + height],
        ])
    }

    /// y of the top-left reference point.
    pub fn top(&self) -> f32 {
        self.0[0][1]
    }
}

/// One text fragment as produced by the OCR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrSpan {
    pub text: String,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub bbox: BoundingBox,
}

impl OcrSpan {
    pub fn new(text: impl Into<String>, confidence: f32, bbox: BoundingBox) -> Self {
        OcrSpan {
            text: text.into(),
            confidence,
            bbox,
        }
    }
}

/// Semantic type of a form field. Drives value extraction.
///
/// Type names outside the known set are kept verbatim in `Other` and are
/// extracted as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Phone,
    Mobile,
    Email,
    Date,
    DateBs,
    Currency,
    Amount,
    Pan,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Phone => "phone",
            FieldType::Mobile => "mobile",
            FieldType::Email => "email",
            FieldType::Date => "date",
            FieldType::DateBs => "date_bs",
            FieldType::Currency => "currency",
            FieldType::Amount => "amount",
            FieldType::Pan => "pan",
            FieldType::Other(name) => name,
        }
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        match name {
            "text" => FieldType::Text,
            "number" => FieldType::Number,
            "phone" => FieldType::Phone,
            "mobile" => FieldType::Mobile,
            "email" => FieldType::Email,
            "date" => FieldType::Date,
            "date_bs" => FieldType::DateBs,
            "currency" => FieldType::Currency,
            "amount" => FieldType::Amount,
            "pan" => FieldType::Pan,
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        FieldType::from(name.as_str())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One expected field of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType, labels: &[&str]) -> Self {
        FieldDefinition {
            name: name.into(),
            field_type,
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Label variants to look for on the page. A field without labels is
    /// matched by its own name.
    pub fn effective_labels(&self) -> Vec<&str> {
        if self.labels.is_empty() {
            vec![self.name.as_str()]
        } else {
            self.labels.iter().map(String::as_str).collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

/// A normalized value pulled out of the OCR output for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedField {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub raw: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub confidence: f32,
}

/// Field name -> extracted value, in template field order.
pub type ExtractionResult = IndexMap<String, ExtractedField>;

/// Parsed data attached to a passing check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckDetail {
    Date { parsed: ParsedDate },
    Phone {
        #[serde(rename = "type")]
        kind: PhoneKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDate {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhoneKind {
    Mobile,
    Landline,
}

/// Outcome of validating a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCheck {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub detail: Option<CheckDetail>,
}

impl FieldCheck {
    pub fn pass() -> Self {
        FieldCheck {
            valid: true,
            error: None,
            detail: None,
        }
    }

    pub fn pass_with(detail: CheckDetail) -> Self {
        FieldCheck {
            valid: true,
            error: None,
            detail: Some(detail),
        }
    }

    pub fn fail(error: &str) -> Self {
        FieldCheck {
            valid: false,
            error: Some(error.to_string()),
            detail: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationCheck {
    pub field: String,
    #[serde(flatten)]
    pub outcome: FieldCheck,
}

impl VerificationCheck {
    pub fn is_valid(&self) -> bool {
        self.outcome.valid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
    pub score: String,
    pub checks: Vec<VerificationCheck>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_round_trips_unknown_names() {
        let parsed: FieldType = serde_json::from_str("\"signature\"").unwrap();
        assert_eq!(parsed, FieldType::Other("signature".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"signature\"");
        assert_eq!(FieldType::from("date_bs"), FieldType::DateBs);
    }

    #[test]
    fn test_field_definition_defaults() {
        let field: FieldDefinition = serde_json::from_str(r#"{"name": "Ward No"}"#).unwrap();
        assert_eq!(field.field_type, FieldType::Text);
        assert_eq!(field.effective_labels(), vec!["Ward No"]);
    }

    #[test]
    fn test_span_reads_easyocr_shape() {
        let json = r#"{"text": "Email", "confidence": 0.9,
                       "bbox": [[10, 12], [60, 12], [60, 30], [10, 30]]}"#;
        let span: OcrSpan = serde_json::from_str(json).unwrap();
        assert_eq!(span.bbox.0[0], [10.0, 12.0]);
        assert_eq!(span.bbox.top(), 12.0);
    }

    #[test]
    fn test_check_serializes_parsed_date() {
        let check = VerificationCheck {
            field: "Date of Birth".to_string(),
            outcome: FieldCheck::pass_with(CheckDetail::Date {
                parsed: ParsedDate { year: 2045, month: 3, day: 15 },
            }),
        };
        let value = serde_json::to_value(&check).unwrap();
        assert_eq!(value["field"], "Date of Birth");
        assert_eq!(value["valid"], true);
        assert_eq!(value["parsed"]["month"], 3);
        assert!(value.get("error").is_none());
    }
}

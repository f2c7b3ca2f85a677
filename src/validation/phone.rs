use crate::models::{CheckDetail, FieldCheck, PhoneKind};
use crate::processing::normalizer::normalize_digits;

/// Nepali phone numbers: 10-digit mobiles starting with 9, anything else
/// of 7 or more digits is taken as a landline.
pub struct PhoneValidator;

impl PhoneValidator {
    pub fn validate(text: &str) -> FieldCheck {
        if text.is_empty() {
            return FieldCheck::fail("Empty");
        }

        let digits: String = normalize_digits(text)
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();

        if digits.len() == 10 && digits.starts_with('9') {
            FieldCheck::pass_with(CheckDetail::Phone { kind: PhoneKind::Mobile })
        } else if digits.len() >= 7 {
            FieldCheck::pass_with(CheckDetail::Phone { kind: PhoneKind::Landline })
        } else {
            FieldCheck::fail("Invalid format")
        }
    }
}

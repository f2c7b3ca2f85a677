use crate::models::FieldCheck;

/// Permanent Account Number: exactly nine digits.
pub struct PanValidator;

impl PanValidator {
    pub fn validate(text: &str) -> FieldCheck {
        if text.is_empty() {
            FieldCheck::fail("Empty")
        } else if text.len() == 9 && text.bytes().all(|b| b.is_ascii_digit()) {
            FieldCheck::pass()
        } else {
            FieldCheck::fail("Must be 9 digits")
        }
    }
}

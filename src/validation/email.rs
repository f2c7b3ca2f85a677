use crate::models::{FieldCheck, ValidationRule};

pub struct EmailValidator;

impl EmailValidator {
    /// The whole value must satisfy the email rule.
    pub fn validate(text: &str) -> FieldCheck {
        if text.is_empty() {
            return FieldCheck::fail("Empty");
        }

        match ValidationRule::Email.pattern().find(text) {
            Some(m) if m.start() == 0 && m.end() == text.len() => FieldCheck::pass(),
            _ => FieldCheck::fail("Invalid format"),
        }
    }
}

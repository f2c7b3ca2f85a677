use crate::models::{ExtractionResult, FieldCheck, VerificationCheck, VerificationReport};
use crate::validation::{DateValidator, EmailValidator, PanValidator, PhoneValidator};
use log::info;

pub const DATE_OF_BIRTH: &str = "Date of Birth";
pub const PHONE: &str = "Phone";
pub const MOBILE: &str = "Mobile";
pub const EMAIL: &str = "Email";
pub const PAN: &str = "PAN";

/// Re-validates an extraction.
///
/// Only four fields are inspected: Date of Birth, Phone (or Mobile when
/// Phone is missing), Email and PAN. Every other field in the extraction is
/// ignored, whatever template produced it.
pub struct Verifier;

impl Verifier {
    pub fn verify_date(text: &str) -> FieldCheck {
        DateValidator::validate(text)
    }

    pub fn verify_phone(text: &str) -> FieldCheck {
        PhoneValidator::validate(text)
    }

    pub fn verify_email(text: &str) -> FieldCheck {
        EmailValidator::validate(text)
    }

    pub fn verify_pan(text: &str) -> FieldCheck {
        PanValidator::validate(text)
    }

    pub fn run_all_checks(extraction: &ExtractionResult) -> VerificationReport {
        let phone = match field_value(extraction, PHONE) {
            "" => field_value(extraction, MOBILE),
            value => value,
        };

        let checks = vec![
            check(DATE_OF_BIRTH, Self::verify_date(field_value(extraction, DATE_OF_BIRTH))),
            check(PHONE, Self::verify_phone(phone)),
            check(EMAIL, Self::verify_email(field_value(extraction, EMAIL))),
            check(PAN, Self::verify_pan(field_value(extraction, PAN))),
        ];

        let passed = checks.iter().filter(|c| c.is_valid()).count();
        let total = checks.len();
        info!("Verification passed {}/{}", passed, total);

        VerificationReport {
            passed,
            failed: total - passed,
            total,
            score: format!("{}/{}", passed, total),
            checks,
        }
    }
}

/// Extracted value of `name`, or "" when the field is absent.
fn field_value<'a>(extraction: &'a ExtractionResult, name: &str) -> &'a str {
    extraction
        .get(name)
        .and_then(|field| field.value.as_deref())
        .unwrap_or("")
}

fn check(field: &str, outcome: FieldCheck) -> VerificationCheck {
    VerificationCheck {
        field: field.to_string(),
        outcome,
    }
}

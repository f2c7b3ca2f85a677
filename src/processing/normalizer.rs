// Per-type value extraction for OCR'd form values.
// Every extractor works on digit-normalized text, so Devanagari and Western
// numerals give the same result.

use crate::models::{FieldType, ValidationRule};
use lazy_static::lazy_static;
use regex::Regex;

/// Devanagari digit -> Western digit.
pub const NEPALI_DIGITS: [(char, char); 10] = [
    ('०', '0'),
    ('१', '1'),
    ('२', '2'),
    ('३', '3'),
    ('४', '4'),
    ('५', '5'),
    ('६', '6'),
    ('७', '7'),
    ('८', '8'),
    ('९', '9'),
];

lazy_static! {
    static ref PHONE_PATTERNS: Vec<Regex> = vec![
        // Mobile: 97XXXXXXXX / 98XXXXXXXX
        Regex::new(r"9[78][0-9]{8}").unwrap(),
        // Landline with area code: 01-4412345
        Regex::new(r"[0-9]{2,3}-[0-9]{6,8}").unwrap(),
        Regex::new(r"[0-9]{10}").unwrap(),
    ];

    static ref DATE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"20[0-9]{2}/[01][0-9]/[0-3][0-9]").unwrap(),
        Regex::new(r"20[0-9]{2}-[01][0-9]-[0-3][0-9]").unwrap(),
        Regex::new(r"20[0-9]{2}\.[01][0-9]\.[0-3][0-9]").unwrap(),
    ];

    static ref CURRENCY_PATTERN: Regex =
        Regex::new(r"(?:Rs\.?|NPR|रु\.?)\s*([0-9,]+(?:\.[0-9]{2})?)").unwrap();

    static ref BARE_AMOUNT_PATTERN: Regex = Regex::new(r"[0-9,]{4,}").unwrap();

    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

pub fn normalize_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            NEPALI_DIGITS
                .iter()
                .find(|(nepali, _)| *nepali == c)
                .map_or(c, |(_, western)| *western)
        })
        .collect()
}

/// Trim and collapse whitespace runs to a single space.
pub fn clean_text(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

pub fn extract_phone(text: &str) -> Option<String> {
    let text = normalize_digits(text);
    PHONE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(&text))
        .map(|m| m.as_str().to_string())
}

pub fn extract_email(text: &str) -> Option<String> {
    extract_by_rule(text, ValidationRule::Email)
}

/// Bikram Sambat date as `YYYY/MM/DD`, accepting `-` or `.` separators.
pub fn extract_date_bs(text: &str) -> Option<String> {
    let text = normalize_digits(text);
    DATE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(&text))
        .map(|m| m.as_str().replace(['-', '.'], "/"))
}

pub fn extract_currency(text: &str) -> Option<String> {
    let text = normalize_digits(text).replace(',', "");

    if let Some(captures) = CURRENCY_PATTERN.captures(&text) {
        if let Some(amount) = captures.get(1) {
            return Some(format!("Rs. {}", amount.as_str()));
        }
    }

    BARE_AMOUNT_PATTERN
        .find(&text)
        .map(|m| m.as_str().to_string())
}

/// First nine consecutive digits; a longer run yields its leading nine.
pub fn extract_pan(text: &str) -> Option<String> {
    extract_by_rule(text, ValidationRule::Pan)
}

fn extract_by_rule(text: &str, rule: ValidationRule) -> Option<String> {
    rule.find(&normalize_digits(text)).map(str::to_string)
}

/// Normalized value of `text` for a field of the given type.
///
/// Returns `None` when a typed extractor finds nothing. Free-form types
/// always produce a (possibly empty) cleaned string.
pub fn extract_typed(text: &str, field_type: &FieldType) -> Option<String> {
    match field_type {
        FieldType::Phone | FieldType::Mobile => extract_phone(text),
        FieldType::Email | FieldType::Pan => {
            extract_by_rule(text, ValidationRule::for_field_type(field_type))
        }
        FieldType::Date | FieldType::DateBs => extract_date_bs(text),
        FieldType::Currency | FieldType::Amount => extract_currency(text),
        FieldType::Text | FieldType::Number | FieldType::Other(_) => {
            Some(clean_text(&normalize_digits(text)))
        }
    }
}

use crate::models::{CheckDetail, FieldCheck, ParsedDate};
use crate::processing::normalizer::normalize_digits;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BS_DATE: Regex = Regex::new(r"^([0-9]{4})/([0-9]{2})/([0-9]{2})").unwrap();
}

/// Checks a Bikram Sambat date written as `YYYY/MM/DD`, in either digit
/// system.
///
/// Days run 1-32 for every month; BS months can have 32 days and the exact
/// month lengths are not checked.
pub struct DateValidator;

impl DateValidator {
    pub fn validate(text: &str) -> FieldCheck {
        if text.is_empty() {
            return FieldCheck::fail("Empty date");
        }

        let text = normalize_digits(text);
        let Some(captures) = BS_DATE.captures(&text) else {
            return FieldCheck::fail("Invalid format");
        };
        // The pattern guarantees plain ASCII digits.
        let part = |i: usize| captures[i].parse::<u32>().unwrap_or(0);
        let (year, month, day) = (part(1), part(2), part(3));

        if !(1970..=2090).contains(&year) {
            return FieldCheck::fail("Year out of range");
        }
        if !(1..=12).contains(&month) {
            return FieldCheck::fail("Invalid month");
        }
        if !(1..=32).contains(&day) {
            return FieldCheck::fail("Invalid day");
        }

        FieldCheck::pass_with(CheckDetail::Date {
            parsed: ParsedDate { year, month, day },
        })
    }
}

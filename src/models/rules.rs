use crate::models::FieldType;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named validation rules for form values. Serialized as the rule key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ValidationRule {
    NepaliText,
    EnglishUppercase,
    Text,
    Number,
    Phone,
    Mobile,
    Email,
    Pan,
    DateBs,
    Currency,
}

impl ValidationRule {
    pub fn key(&self) -> &'static str {
        match self {
            ValidationRule::NepaliText => "nepali_text",
            ValidationRule::EnglishUppercase => "english_uppercase",
            ValidationRule::Text => "text",
            ValidationRule::Number => "number",
            ValidationRule::Phone => "phone",
            ValidationRule::Mobile => "mobile",
            ValidationRule::Email => "email",
            ValidationRule::Pan => "pan",
            ValidationRule::DateBs => "date_bs",
            ValidationRule::Currency => "currency",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL_RULES.iter().copied().find(|rule| rule.key() == key)
    }

    /// Default rule for a field type. Free-form types fall back to `Text`.
    pub fn for_field_type(field_type: &FieldType) -> Self {
        match field_type {
            FieldType::Number => ValidationRule::Number,
            FieldType::Phone => ValidationRule::Phone,
            FieldType::Mobile => ValidationRule::Mobile,
            FieldType::Email => ValidationRule::Email,
            FieldType::Date | FieldType::DateBs => ValidationRule::DateBs,
            FieldType::Currency | FieldType::Amount => ValidationRule::Currency,
            FieldType::Pan => ValidationRule::Pan,
            FieldType::Text | FieldType::Other(_) => ValidationRule::Text,
        }
    }

    pub fn pattern(&self) -> &'static Regex {
        // Every rule is inserted when the table is built.
        &VALIDATION_RULES[self]
    }

    /// First substring of `text` satisfying the rule.
    pub fn find<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.pattern().find(text).map(|m| m.as_str())
    }
}

impl From<ValidationRule> for &'static str {
    fn from(rule: ValidationRule) -> Self {
        rule.key()
    }
}

impl TryFrom<String> for ValidationRule {
    type Error = String;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        ValidationRule::from_key(&key).ok_or_else(|| format!("unknown validation rule '{}'", key))
    }
}

pub const ALL_RULES: [ValidationRule; 10] = [
    ValidationRule::NepaliText,
    ValidationRule::EnglishUppercase,
    ValidationRule::Text,
    ValidationRule::Number,
    ValidationRule::Phone,
    ValidationRule::Mobile,
    ValidationRule::Email,
    ValidationRule::Pan,
    ValidationRule::DateBs,
    ValidationRule::Currency,
];

lazy_static! {
    pub static ref VALIDATION_RULES: HashMap<ValidationRule, Regex> = {
        let mut m = HashMap::new();
        m.insert(ValidationRule::NepaliText, Regex::new(r"[\x{0900}-\x{097F}\s]+").unwrap());
        m.insert(ValidationRule::EnglishUppercase, Regex::new(r"[A-Z\s]+").unwrap());
        m.insert(ValidationRule::Text, Regex::new(r".+").unwrap());
        m.insert(ValidationRule::Number, Regex::new(r"[0-9]+").unwrap());
        m.insert(ValidationRule::Phone, Regex::new(r"[0-9]{2}-[0-9]{7,8}").unwrap());
        m.insert(ValidationRule::Mobile, Regex::new(r"9[0-9]{9}").unwrap());
        m.insert(
            ValidationRule::Email,
            Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap(),
        );
        m.insert(ValidationRule::Pan, Regex::new(r"[0-9]{9}").unwrap());
        m.insert(ValidationRule::DateBs, Regex::new(r"[0-9]{4}/[0-9]{2}/[0-9]{2}").unwrap());
        m.insert(ValidationRule::Currency, Regex::new(r"[0-9,]+").unwrap());
        m
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rule_has_a_pattern() {
        for rule in ALL_RULES {
            assert_eq!(ValidationRule::from_key(rule.key()), Some(rule));
            let _ = rule.pattern();
        }
        assert_eq!(ValidationRule::from_key("passport"), None);
    }

    #[test]
    fn test_rule_for_field_type() {
        assert_eq!(ValidationRule::for_field_type(&FieldType::Amount), ValidationRule::Currency);
        assert_eq!(
            ValidationRule::for_field_type(&FieldType::Other("signature".into())),
            ValidationRule::Text
        );
    }

    #[test]
    fn test_serde_uses_rule_key() {
        assert_eq!(serde_json::to_string(&ValidationRule::DateBs).unwrap(), "\"date_bs\"");
        let rule: ValidationRule = serde_json::from_str("\"english_uppercase\"").unwrap();
        assert_eq!(rule, ValidationRule::EnglishUppercase);
        assert!(serde_json::from_str::<ValidationRule>("\"passport\"").is_err());
    }

    #[test]
    fn test_find() {
        assert_eq!(ValidationRule::Mobile.find("Mobile: 9812345678"), Some("9812345678"));
        assert_eq!(ValidationRule::Phone.find("Tel 01-4412345"), Some("01-4412345"));
        assert_eq!(ValidationRule::NepaliText.find("नाम राम"), Some("नाम राम"));
        assert_eq!(ValidationRule::Pan.find("PAN 12345"), None);
    }
}

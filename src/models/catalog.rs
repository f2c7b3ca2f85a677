use crate::models::rules::ValidationRule;
use crate::models::FieldType;
use lazy_static::lazy_static;

/// A field of the printed insurance proposal form.
#[derive(Debug, Clone)]
pub struct CatalogField {
    pub id: &'static str,
    pub name_en: &'static str,
    pub name_np: &'static str,
    pub field_type: FieldType,
    pub patterns: Vec<&'static str>,
    pub validation: ValidationRule,
}

#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub key: &'static str,
    pub fields: Vec<CatalogField>,
}

fn field(
    id: &'static str,
    name_en: &'static str,
    name_np: &'static str,
    field_type: FieldType,
    patterns: &[&'static str],
    validation: ValidationRule,
) -> CatalogField {
    CatalogField {
        id,
        name_en,
        name_np,
        field_type,
        patterns: patterns.to_vec(),
        validation,
    }
}

lazy_static! {
    /// Bilingual life insurance proposal form (F.N.:001), two pages.
    pub static ref INSURANCE_FORM: Vec<CatalogPage> = vec![
        CatalogPage {
            key: "page_1",
            fields: vec![
                field("1.क", "Full Name (Nepali)", "नाम, थर", FieldType::Text,
                      &["नाम", "थर", "पुरा नाम"], ValidationRule::NepaliText),
                field("1.ख", "Full Name (English)", "NAME IN ENGLISH", FieldType::Text,
                      &["NAME IN ENGLISH", "BLOCK LETTER", "NAME"], ValidationRule::EnglishUppercase),
                field("1.ग.1", "District", "जिल्ला", FieldType::Text,
                      &["जिल्ला", "District"], ValidationRule::Text),
                field("1.ग.2", "Municipality", "न.पा./गा.वि.स.", FieldType::Text,
                      &["न.पा.", "गा.वि.स.", "नगरपालिका", "Municipality"], ValidationRule::Text),
                field("1.ग.3", "Ward No", "वडा नं.", FieldType::Number,
                      &["वडा", "Ward"], ValidationRule::Number),
                field("1.ग.4", "Phone", "फोन नं.", FieldType::Phone,
                      &["फोन", "Phone", "Tel"], ValidationRule::Phone),
                field("1.ग.5", "Mobile", "मोबाइल नं.", FieldType::Phone,
                      &["मोबाइल", "Mobile"], ValidationRule::Mobile),
                field("1.ग.6", "Email", "इमेल", FieldType::Email,
                      &["इमेल", "Email", "E-mail"], ValidationRule::Email),
                field("1.ङ", "PAN Number", "स्थायी लेखा नं.", FieldType::Pan,
                      &["PAN", "स्थायी लेखा", "Permanent Account"], ValidationRule::Pan),
                field("1.च", "Date of Birth", "जन्म मिति", FieldType::Date,
                      &["जन्म मिति", "Date of Birth", "DOB"], ValidationRule::DateBs),
                field("1.छ", "Nationality", "राष्ट्रियता", FieldType::Text,
                      &["राष्ट्रियता", "Nationality"], ValidationRule::Text),
                field("1.ज", "Occupation", "पेशा", FieldType::Text,
                      &["पेशा", "Occupation", "व्यवसाय"], ValidationRule::Text),
                field("1.भ", "Monthly Income", "मासिक आय", FieldType::Currency,
                      &["मासिक आय", "Monthly Income", "आम्दानी"], ValidationRule::Currency),
            ],
        },
        CatalogPage {
            key: "page_2",
            fields: vec![
                field("2.क", "Insurance Plan", "बीमा योजना", FieldType::Text,
                      &["बीमा योजना", "Plan", "Insurance Plan"], ValidationRule::Text),
                field("2.ख", "Policy Term", "बीमा अवधि", FieldType::Number,
                      &["अवधि", "Term", "वर्ष"], ValidationRule::Number),
                field("2.ग", "Sum Assured", "बीमाङ्क", FieldType::Currency,
                      &["बीमाङ्क", "Sum Assured", "बीमा रकम"], ValidationRule::Currency),
                field("3.क", "Nominee Name", "इच्छाएको व्यक्ति", FieldType::Text,
                      &["इच्छाएको", "Nominee", "हकवाला"], ValidationRule::Text),
                field("3.ङ", "Relationship", "सम्बन्ध", FieldType::Text,
                      &["सम्बन्ध", "Relationship", "नाता"], ValidationRule::Text),
            ],
        },
    ];
}

/// Every catalog field across all pages, in form order.
pub fn catalog_fields() -> impl Iterator<Item = &'static CatalogField> {
    INSURANCE_FORM.iter().flat_map(|page| page.fields.iter())
}

use crate::models::catalog::{CatalogField, CatalogPage, INSURANCE_FORM};
use crate::models::{FieldDefinition, FieldType, Template};

/// One template per insurance form page, named `insurance_<page key>`.
///
/// Field names are the English names, except the PAN field which is named
/// `PAN` so the verifier picks it up.
pub fn insurance_templates() -> Vec<Template> {
    INSURANCE_FORM
        .iter()
        .map(|page| page_template(&format!("insurance_{}", page.key), page))
        .collect()
}

fn page_template(name: &str, page: &CatalogPage) -> Template {
    Template {
        name: name.to_string(),
        fields: page.fields.iter().map(field_definition).collect(),
    }
}

fn field_definition(field: &CatalogField) -> FieldDefinition {
    let name = match field.field_type {
        FieldType::Pan => "PAN",
        _ => field.name_en,
    };
    FieldDefinition {
        name: name.to_string(),
        field_type: field.field_type.clone(),
        labels: field.patterns.iter().map(|p| p.to_string()).collect(),
    }
}

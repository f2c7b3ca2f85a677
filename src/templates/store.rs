use crate::models::{ExtractionConfig, FieldDefinition, Template};
use crate::processing::fuzzy::partial_ratio;
use crate::processing::matcher::FieldMatcher;
use crate::utils::FormError;
use indexmap::IndexMap;
use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashSet;

/// A template field chosen for a piece of OCR text.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub field: FieldDefinition,
    pub matched_label: String,
    pub score: f64,
}

/// In-memory registry of named templates.
///
/// Templates are kept in insertion order, which makes auto-detection ties
/// deterministic: the earliest saved template wins. Saving replaces a
/// template wholesale under the write lock.
pub struct TemplateStore {
    templates: RwLock<IndexMap<String, Template>>,
    config: ExtractionConfig,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        TemplateStore {
            templates: RwLock::new(IndexMap::new()),
            config,
        }
    }

    /// Store preloaded with the insurance form templates.
    pub fn with_builtin() -> Self {
        Self::with_builtin_config(ExtractionConfig::default())
    }

    pub fn with_builtin_config(config: ExtractionConfig) -> Self {
        let store = Self::with_config(config);
        for template in super::builtin::insurance_templates() {
            store.insert(template);
        }
        store
    }

    pub fn list_templates(&self) -> Vec<String> {
        self.templates.read().keys().cloned().collect()
    }

    pub fn get_template(&self, name: &str) -> Option<Template> {
        self.templates.read().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.read().is_empty()
    }

    /// Validate and store a template, replacing any template of that name.
    pub fn save_template(
        &self,
        name: &str,
        fields: Vec<FieldDefinition>,
    ) -> Result<Template, FormError> {
        validate_schema(name, &fields)?;
        let template = Template {
            name: name.to_string(),
            fields,
        };
        self.insert(template.clone());
        info!("Saved template '{}' ({} fields)", name, template.fields.len());
        Ok(template)
    }

    /// Like `save_template`, with the field list given as a JSON array.
    pub fn save_template_json(&self, name: &str, fields_json: &str) -> Result<Template, FormError> {
        let fields: Vec<FieldDefinition> = serde_json::from_str(fields_json)
            .map_err(|e| FormError::InvalidSchema(format!("Invalid field list: {}", e)))?;
        self.save_template(name, fields)
    }

    pub(crate) fn insert(&self, template: Template) {
        self.templates.write().insert(template.name.clone(), template);
    }

    /// Field of `template_name` whose label is closest to the whole of `text`.
    pub fn match_field(
        &self,
        text: &str,
        template_name: &str,
        threshold: f64,
    ) -> Option<FieldMatch> {
        let templates = self.templates.read();
        let template = templates.get(template_name)?;

        let mut labels = Vec::new();
        let mut owners = Vec::new();
        for field in &template.fields {
            for label in field.effective_labels() {
                labels.push(label);
                owners.push(field);
            }
        }

        let (label, score) = FieldMatcher::best_label_match(text, &labels)?;
        if score < threshold {
            return None;
        }

        // Labels and owners are parallel; the matched label is one of ours.
        let position = labels.iter().position(|l| *l == label)?;
        Some(FieldMatch {
            field: owners[position].clone(),
            matched_label: label.to_string(),
            score,
        })
    }

    /// Guess which template a document uses from its leading OCR texts.
    ///
    /// Each label whose partial similarity to the combined text clears the
    /// template label threshold is one vote for its template. The template
    /// with the most votes wins, provided it reaches the minimum score.
    pub fn auto_detect_template<S: AsRef<str>>(&self, texts: &[S]) -> Option<String> {
        let combined = texts
            .iter()
            .take(self.config.template_head_spans)
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let templates = self.templates.read();
        let mut best_match: Option<&str> = None;
        let mut best_score = 0usize;

        for (name, template) in templates.iter() {
            let score = template
                .fields
                .iter()
                .flat_map(|field| field.effective_labels())
                .filter(|label| {
                    partial_ratio(&label.to_lowercase(), &combined)
                        > self.config.template_label_threshold
                })
                .count();
            debug!("Template '{}' scored {}", name, score);

            if score > best_score {
                best_score = score;
                best_match = Some(name);
            }
        }

        if best_score >= self.config.template_min_score {
            best_match.map(str::to_string)
        } else {
            None
        }
    }
}

/// Template names double as file names, so they must be a single plain path
/// component.
pub(crate) fn check_template_name(name: &str) -> Result<(), FormError> {
    if name.trim().is_empty() {
        return Err(FormError::InvalidSchema("Template name is empty".to_string()));
    }
    if name.contains(['/', '\\', '\0']) || name == "." || name == ".." {
        return Err(FormError::InvalidSchema(format!("Invalid template name '{}'", name)));
    }
    Ok(())
}

fn validate_schema(name: &str, fields: &[FieldDefinition]) -> Result<(), FormError> {
    check_template_name(name)?;

    let mut seen = HashSet::new();
    for field in fields {
        if field.name.trim().is_empty() {
            return Err(FormError::InvalidSchema(format!(
                "Template '{}' has a field without a name",
                name
            )));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(FormError::InvalidSchema(format!(
                "Template '{}' defines field '{}' more than once",
                name, field.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldType;

    fn personal_fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("Date of Birth", FieldType::Date, &["Date of Birth", "जन्म मिति"]),
            FieldDefinition::new("Email", FieldType::Email, &["Email"]),
            FieldDefinition::new("Phone", FieldType::Phone, &["Phone"]),
            FieldDefinition::new("PAN", FieldType::Pan, &["Permanent Account"]),
        ]
    }

    #[test]
    fn test_save_get_list() {
        let store = TemplateStore::new();
        store.save_template("personal", personal_fields()).unwrap();
        let policy = vec![FieldDefinition::new("Sum Assured", FieldType::Currency, &[])];
        store.save_template("policy", policy).unwrap();

        assert_eq!(store.list_templates(), vec!["personal", "policy"]);
        assert_eq!(store.get_template("personal").unwrap().fields.len(), 4);
        assert!(store.get_template("missing").is_none());
    }

    #[test]
    fn test_save_replaces_wholesale() {
        let store = TemplateStore::new();
        store.save_template("personal", personal_fields()).unwrap();
        let email_only = vec![FieldDefinition::new("Email", FieldType::Email, &[])];
        store.save_template("personal", email_only).unwrap();

        let template = store.get_template("personal").unwrap();
        assert_eq!(template.fields.len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_invalid_schema_leaves_store_untouched() {
        let store = TemplateStore::new();
        store.save_template("personal", personal_fields()).unwrap();

        let duplicate = vec![
            FieldDefinition::new("Email", FieldType::Email, &[]),
            FieldDefinition::new("Email", FieldType::Text, &[]),
        ];
        assert!(matches!(
            store.save_template("personal", duplicate),
            Err(FormError::InvalidSchema(_))
        ));
        assert!(matches!(store.save_template(" ", vec![]), Err(FormError::InvalidSchema(_))));
        assert!(matches!(
            store.save_template_json("personal", r#"[{"type": "text"}]"#),
            Err(FormError::InvalidSchema(_))
        ));
        assert_eq!(store.get_template("personal").unwrap().fields.len(), 4);
    }

    #[test]
    fn test_rejects_path_like_names() {
        let store = TemplateStore::new();
        for name in ["../x", "a/b", "a\\b", "..", "."] {
            assert!(
                matches!(
                    store.save_template(name, personal_fields()),
                    Err(FormError::InvalidSchema(_))
                ),
                "{}",
                name
            );
        }
        assert!(store.is_empty());
        assert!(store.save_template("policy..v2", personal_fields()).is_ok());
    }

    #[test]
    fn test_save_template_json() {
        let store = TemplateStore::new();
        let template = store
            .save_template_json(
                "ward",
                r#"[{"name": "Ward No", "type": "number", "labels": ["वडा", "Ward"]}]"#,
            )
            .unwrap();
        assert_eq!(template.fields[0].field_type, FieldType::Number);
        assert_eq!(template.fields[0].labels, vec!["वडा", "Ward"]);
    }

    #[test]
    fn test_match_field() {
        let store = TemplateStore::new();
        store.save_template("personal", personal_fields()).unwrap();

        let matched = store.match_field("Emial", "personal", 70.0).unwrap();
        assert_eq!(matched.field.name, "Email");
        assert_eq!(matched.matched_label, "Email");

        let matched = store.match_field("जन्म मिति", "personal", 70.0).unwrap();
        assert_eq!(matched.field.name, "Date of Birth");
        assert_eq!(matched.score, 100.0);

        assert!(store.match_field("Relationship", "personal", 70.0).is_none());
        assert!(store.match_field("Email", "unknown", 70.0).is_none());
    }

    #[test]
    fn test_auto_detect_picks_highest_score() {
        let store = TemplateStore::new();
        store.save_template("personal", personal_fields()).unwrap();
        store
            .save_template(
                "policy",
                vec![
                    FieldDefinition::new("Insurance Plan", FieldType::Text, &["Insurance Plan"]),
                    FieldDefinition::new("Sum Assured", FieldType::Currency, &["Sum Assured"]),
                ],
            )
            .unwrap();

        let texts = [
            "F.N.:001",
            "Date of Birth",
            "2045/03/15",
            "Email",
            "a@b.com",
            "Phone",
            "01-4412345",
        ];
        assert_eq!(store.auto_detect_template(&texts), Some("personal".to_string()));
    }

    #[test]
    fn test_auto_detect_requires_three_votes() {
        let store = TemplateStore::new();
        store.save_template("personal", personal_fields()).unwrap();

        // Only "Email" and "Phone" are present: two votes.
        let texts = ["Email", "a@b.com", "Phone", "01-4412345"];
        assert_eq!(store.auto_detect_template(&texts), None);
    }

    #[test]
    fn test_auto_detect_only_reads_leading_spans() {
        let store = TemplateStore::new();
        store.save_template("personal", personal_fields()).unwrap();

        let mut texts: Vec<String> = (0..20).map(|i| format!("{}", i % 10)).collect();
        texts.extend(["Date of Birth", "Email", "Phone", "Permanent Account"].map(String::from));
        assert_eq!(store.auto_detect_template(&texts), None);
    }

    #[test]
    fn test_auto_detect_tie_keeps_first_saved() {
        let store = TemplateStore::new();
        store.save_template("first", personal_fields()).unwrap();
        store.save_template("second", personal_fields()).unwrap();

        let texts = ["Date of Birth", "Email", "Phone", "Permanent Account"];
        assert_eq!(store.auto_detect_template(&texts), Some("first".to_string()));
    }
}

// JSON directory persistence for templates: one `<name>.json` per template.

use crate::models::Template;
use crate::templates::store::check_template_name;
use crate::templates::TemplateStore;
use crate::utils::FormError;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Load every `*.json` template in `dir` into a new store, in file name
/// order. The directory is created if it does not exist.
pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<TemplateStore, FormError> {
    let store = TemplateStore::new();
    load_into(&store, dir)?;
    Ok(store)
}

pub fn load_into<P: AsRef<Path>>(store: &TemplateStore, dir: P) -> Result<usize, FormError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    paths.sort();

    let mut loaded = 0;
    for path in paths {
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!("Skipping template file with non UTF-8 name: {:?}", path);
            continue;
        };
        let json = fs::read_to_string(&path)?;
        let template: Template = serde_json::from_str(&json)
            .map_err(|e| FormError::InvalidSchema(format!("{}: {}", path.display(), e)))?;

        // The file name is the template's key.
        store.save_template(name, template.fields)?;
        debug!("Loaded template '{}' from {:?}", name, path);
        loaded += 1;
    }

    Ok(loaded)
}

/// Write `template` to `<dir>/<name>.json`, returning the file path.
pub fn write_template<P: AsRef<Path>>(dir: P, template: &Template) -> Result<PathBuf, FormError> {
    check_template_name(&template.name)?;
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let path = dir.join(format!("{}.json", template.name));
    let json = serde_json::to_string_pretty(template)?;
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldDefinition, FieldType};
    use tempfile::tempdir;

    #[test]
    fn test_write_then_load() {
        let dir = tempdir().unwrap();
        let template = Template {
            name: "nominee".to_string(),
            fields: vec![
                FieldDefinition::new("Nominee Name", FieldType::Text, &["इच्छाएको", "Nominee"]),
                FieldDefinition::new("Relationship", FieldType::Text, &["सम्बन्ध"]),
            ],
        };
        let path = write_template(dir.path(), &template).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("इच्छाएको"));

        let store = load_dir(dir.path()).unwrap();
        assert_eq!(store.list_templates(), vec!["nominee"]);
        assert_eq!(store.get_template("nominee").unwrap(), template);
    }

    #[test]
    fn test_load_sorted_and_skips_other_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.json"), r#"{"name": "b", "fields": []}"#).unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"{"name": "a", "fields": [{"name": "Email", "type": "email"}]}"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "not a template").unwrap();

        let store = load_dir(dir.path()).unwrap();
        assert_eq!(store.list_templates(), vec!["a", "b"]);
    }

    #[test]
    fn test_malformed_template_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{\"fields\": 3}").unwrap();
        assert!(matches!(load_dir(dir.path()), Err(FormError::InvalidSchema(_))));
    }

    #[test]
    fn test_write_refuses_to_leave_directory() {
        let dir = tempdir().unwrap();
        let templates = dir.path().join("templates");
        let template = Template {
            name: "../escaped".to_string(),
            fields: vec![],
        };
        assert!(matches!(
            write_template(&templates, &template),
            Err(FormError::InvalidSchema(_))
        ));
        assert!(!dir.path().join("escaped.json").exists());
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("templates");
        let store = load_dir(&nested).unwrap();
        assert!(store.is_empty());
        assert!(nested.is_dir());
    }
}

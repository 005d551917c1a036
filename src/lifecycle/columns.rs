use crate::error::ConsoleError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

const LABEL_PREFIX: &str = "lifeCycle.logbook.displaySteps.";

/// Which lifecycle fields are always shown and which can be toggled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleFieldConfig {
    #[serde(default)]
    pub mandatory_fields: Vec<String>,
    #[serde(default)]
    pub custom_fields: Vec<String>,
}

impl Default for LifecycleFieldConfig {
    fn default() -> Self {
        let fields = |ids: &[&str]| -> Vec<String> { ids.iter().map(|id| id.to_string()).collect() };
        Self {
            mandatory_fields: fields(&["evType", "evDateTime", "outcome", "outDetail", "outMessg"]),
            custom_fields: fields(&["evId", "evIdProc", "evTypeProc", "agId", "obId"]),
        }
    }
}

impl LifecycleFieldConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConsoleError> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| ConsoleError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Resolves display labels.
pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

/// Flat key → label bundle. Unknown keys translate to themselves.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    labels: HashMap<String, String>,
}

impl Translations {
    pub fn from_file(path: &Path) -> Result<Self, ConsoleError> {
        let raw = fs::read_to_string(path)?;
        let labels = serde_json::from_str(&raw)
            .map_err(|e| ConsoleError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(Self { labels })
    }

    pub fn builtin() -> Self {
        let labels = [
            ("evType", "Event type"),
            ("evDateTime", "Date"),
            ("outcome", "Outcome"),
            ("outDetail", "Detailed outcome"),
            ("outMessg", "Message"),
            ("evId", "Event id"),
            ("evIdProc", "Process id"),
            ("evTypeProc", "Process type"),
            ("agId", "Agent"),
            ("obId", "Object id"),
        ]
        .into_iter()
        .map(|(id, label)| (format!("{}{}", LABEL_PREFIX, id), label.to_string()))
        .collect();
        Self { labels }
    }
}

impl Translator for Translations {
    fn translate(&self, key: &str) -> String {
        self.labels
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: String,
    pub label: String,
}

pub fn build_columns(ids: &[String], translator: &dyn Translator) -> Vec<Column> {
    ids.iter()
        .map(|id| Column {
            id: id.clone(),
            label: translator.translate(&format!("{}{}", LABEL_PREFIX, id)),
        })
        .collect()
}

/// Column config for the lifecycle view. A configured file that cannot be
/// read leaves the view without columns.
pub fn load_field_config(path: Option<&Path>) -> LifecycleFieldConfig {
    match path {
        None => LifecycleFieldConfig::default(),
        Some(path) => LifecycleFieldConfig::from_file(path).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "lifecycle field config unavailable");
            LifecycleFieldConfig {
                mandatory_fields: Vec::new(),
                custom_fields: Vec::new(),
            }
        }),
    }
}

pub fn load_translations(path: Option<&Path>) -> Translations {
    match path {
        None => Translations::builtin(),
        Some(path) => Translations::from_file(path).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "translations unavailable, using built-in labels");
            Translations::builtin()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fields.json");
        fs::write(
            &path,
            r#"{"mandatoryFields": ["evType", "outcome"], "customFields": ["agId"]}"#,
        )
        .unwrap();

        let config = LifecycleFieldConfig::from_file(&path).unwrap();
        assert_eq!(config.mandatory_fields, vec!["evType", "outcome"]);
        assert_eq!(config.custom_fields, vec!["agId"]);
    }

    #[test]
    fn malformed_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fields.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            LifecycleFieldConfig::from_file(&path),
            Err(ConsoleError::Config(_))
        ));
    }

    #[test]
    fn columns_use_display_step_labels() {
        let columns = build_columns(
            &["outcome".to_string(), "unknownField".to_string()],
            &Translations::builtin(),
        );
        assert_eq!(columns[0].label, "Outcome");
        assert_eq!(
            columns[1].label,
            "lifeCycle.logbook.displaySteps.unknownField"
        );
    }

    #[test]
    fn unreadable_field_config_yields_no_columns() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_field_config(Some(&dir.path().join("absent.json")));
        assert!(config.mandatory_fields.is_empty());
        assert!(config.custom_fields.is_empty());
        assert_eq!(load_field_config(None), LifecycleFieldConfig::default());
    }

    #[test]
    fn translations_file_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fr.json");
        fs::write(
            &path,
            r#"{"lifeCycle.logbook.displaySteps.outcome": "Statut"}"#,
        )
        .unwrap();

        let translations = Translations::from_file(&path).unwrap();
        let columns = build_columns(&["outcome".to_string()], &translations);
        assert_eq!(columns[0].label, "Statut");
    }
}

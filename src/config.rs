//! Console configuration.
//!
//! Values come from `referential-console.toml` in the working directory when
//! present, then from `CONSOLE_*` environment variables.

use crate::error::ConsoleError;
use crate::lifecycle::LifecycleType;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub const CONFIG_FILE_NAME: &str = "referential-console.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// JSON file listing mandatory and custom lifecycle columns.
    #[serde(default)]
    pub lifecycle_fields: Option<PathBuf>,
    /// Flat JSON map of label keys to display labels.
    #[serde(default)]
    pub translations: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            api_prefix: default_api_prefix(),
            lifecycle_fields: None,
            translations: None,
        }
    }
}

fn default_server_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_api_prefix() -> String {
    "/ihm-demo/v1/api".to_string()
}

impl ConsoleConfig {
    /// Loads the config file from the working directory, then applies env overrides.
    pub fn load() -> Result<Self, ConsoleError> {
        let mut config = Self::from_file(Path::new(CONFIG_FILE_NAME))?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConsoleError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| ConsoleError::Config(format!("{}: {}", path.display(), e)))
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("CONSOLE_SERVER_URL") {
            self.server_url = v;
        }
        if let Some(v) = lookup("CONSOLE_API_PREFIX") {
            self.api_prefix = v;
        }
        if let Some(v) = lookup("CONSOLE_LIFECYCLE_FIELDS") {
            self.lifecycle_fields = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("CONSOLE_TRANSLATIONS") {
            self.translations = Some(PathBuf::from(v));
        }
    }

    pub fn validate(&self) -> Result<(), ConsoleError> {
        self.base_url().map(|_| ())
    }

    fn base_url(&self) -> Result<Url, ConsoleError> {
        let url = Url::parse(&self.server_url)
            .map_err(|e| ConsoleError::Config(format!("server_url {:?}: {}", self.server_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(ConsoleError::Config(format!(
                "server_url {:?} cannot be used as a base",
                self.server_url
            )));
        }
        Ok(url)
    }

    /// Endpoints sit below the server URL's own path, so a console served
    /// under `http://host/archive` keeps the `/archive` segment.
    fn endpoint(&self, path: &str) -> Result<Url, ConsoleError> {
        let mut base = self.base_url()?;
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        let prefix = self.api_prefix.trim_matches('/');
        let path = path.trim_start_matches('/');
        let full = if prefix.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", prefix, path)
        };
        base.join(&full)
            .map_err(|e| ConsoleError::Config(format!("endpoint {:?}: {}", full, e)))
    }

    pub fn format_endpoints(&self) -> Result<FormatEndpoints, ConsoleError> {
        Ok(FormatEndpoints {
            check: self.endpoint("format/check")?,
            upload: self.endpoint("format/upload")?,
            delete: self.endpoint("format/delete")?,
        })
    }

    pub fn lifecycle_url(&self, kind: LifecycleType, id: &str) -> Result<Url, ConsoleError> {
        self.endpoint(&format!("{}lifecycles/{}", kind.as_path(), id))
    }
}

/// Resolved URLs of the format referential endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEndpoints {
    pub check: Url,
    pub upload: Url,
    pub delete: Url,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConsoleConfig::from_file(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "server_url = \"https://archives.example.org\"\nlifecycle_fields = \"fields.json\"\n",
        )
        .unwrap();

        let config = ConsoleConfig::from_file(&path).unwrap();
        assert_eq!(config.server_url, "https://archives.example.org");
        assert_eq!(config.api_prefix, "/ihm-demo/v1/api");
        assert_eq!(config.lifecycle_fields, Some(PathBuf::from("fields.json")));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "server_url = [").unwrap();
        assert!(matches!(
            ConsoleConfig::from_file(&path),
            Err(ConsoleError::Config(_))
        ));
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("CONSOLE_SERVER_URL", "http://10.1.2.3:9000"),
            ("CONSOLE_TRANSLATIONS", "/etc/console/fr.json"),
        ]
        .into_iter()
        .collect();

        let mut config = ConsoleConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.server_url, "http://10.1.2.3:9000");
        assert_eq!(config.translations, Some(PathBuf::from("/etc/console/fr.json")));
        assert_eq!(config.api_prefix, "/ihm-demo/v1/api");
    }

    #[test]
    fn format_endpoints_follow_prefix() {
        let config = ConsoleConfig {
            api_prefix: "/ihm-demo/v1/api/".to_string(),
            ..ConsoleConfig::default()
        };
        let endpoints = config.format_endpoints().unwrap();
        assert_eq!(endpoints.check.as_str(), "http://localhost:8082/ihm-demo/v1/api/format/check");
        assert_eq!(endpoints.upload.as_str(), "http://localhost:8082/ihm-demo/v1/api/format/upload");
        assert_eq!(endpoints.delete.as_str(), "http://localhost:8082/ihm-demo/v1/api/format/delete");
    }

    #[test]
    fn server_path_is_kept_in_endpoints() {
        for server_url in ["https://archive.example/vitam", "https://archive.example/vitam/"] {
            let config = ConsoleConfig {
                server_url: server_url.to_string(),
                ..ConsoleConfig::default()
            };
            let endpoints = config.format_endpoints().unwrap();
            assert_eq!(
                endpoints.check.as_str(),
                "https://archive.example/vitam/ihm-demo/v1/api/format/check"
            );
            let url = config.lifecycle_url(LifecycleType::Unit, "aeaq").unwrap();
            assert_eq!(
                url.as_str(),
                "https://archive.example/vitam/ihm-demo/v1/api/unitlifecycles/aeaq"
            );
        }
    }

    #[test]
    fn empty_prefix_targets_server_root() {
        let config = ConsoleConfig {
            api_prefix: String::new(),
            ..ConsoleConfig::default()
        };
        let endpoints = config.format_endpoints().unwrap();
        assert_eq!(endpoints.delete.as_str(), "http://localhost:8082/format/delete");
    }

    #[test]
    fn lifecycle_url_uses_type_prefix() {
        let config = ConsoleConfig::default();
        let url = config
            .lifecycle_url(LifecycleType::ObjectGroup, "aeaqaaaaaaaaaaab")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8082/ihm-demo/v1/api/objectgrouplifecycles/aeaqaaaaaaaaaaab"
        );
    }

    #[test]
    fn invalid_server_url_is_rejected() {
        let config = ConsoleConfig {
            server_url: "not a url".to_string(),
            ..ConsoleConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConsoleError::Config(_))));
    }
}

//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `BOOK_FINDER__<SECTION>__<KEY>` environment variables.
//!
//! # Configuration File Format
//!
//! ```toml
//! [catalog]
//! base_url = "https://openlibrary.org"
//! request_timeout_secs = 30
//!
//! [covers]
//! base_url = "https://covers.openlibrary.org"
//! size = "M"
//! placeholder = "https://via.placeholder.com/150"
//!
//! [display]
//! card_subject_limit = 5
//! detail_subject_limit = 8
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::{HttpOptions, DEFAULT_USER_AGENT};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "book-finder.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "BOOK_FINDER";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog API settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cover image URL settings
    #[serde(default)]
    pub covers: CoverConfig,

    /// Rendering limits
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Catalog API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog host, without trailing slash
    #[serde(default = "default_catalog_url")]
    pub base_url: String,

    /// Whole-request timeout; unset means wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// User agent override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            request_timeout_secs: None,
            user_agent: None,
        }
    }
}

impl CatalogConfig {
    /// HTTP client options derived from these settings
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

fn default_catalog_url() -> String {
    "https://openlibrary.org".to_string()
}

/// Cover image size served by the covers host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverSize {
    #[serde(rename = "S")]
    Small,
    #[default]
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

impl CoverSize {
    /// Size suffix used in cover URLs
    pub fn suffix(&self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

/// Cover image URL settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverConfig {
    #[serde(default = "default_covers_url")]
    pub base_url: String,

    #[serde(default)]
    pub size: CoverSize,

    /// Image shown when a record has no cover id
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            base_url: default_covers_url(),
            size: CoverSize::default(),
            placeholder: default_placeholder(),
        }
    }
}

fn default_covers_url() -> String {
    "https://covers.openlibrary.org".to_string()
}

fn default_placeholder() -> String {
    "https://via.placeholder.com/150".to_string()
}

/// Rendering limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Subjects shown from a search record
    #[serde(default = "default_card_subjects")]
    pub card_subject_limit: usize,

    /// Subjects shown in the detail view
    #[serde(default = "default_detail_subjects")]
    pub detail_subject_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            card_subject_limit: default_card_subjects(),
            detail_subject_limit: default_detail_subjects(),
        }
    }
}

fn default_card_subjects() -> usize {
    5
}

fn default_detail_subjects() -> usize {
    8
}

/// Load configuration, layering an optional file and the environment over
/// the defaults. A path given explicitly must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(true),
        );
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Find a configuration file in the default locations: `./book-finder.toml`,
/// then `<config dir>/book-finder/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("config.toml"))
        .filter(|path| path.is_file())
}

/// Render a configuration as TOML
pub fn to_toml(config: &Config) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog.base_url, "https://openlibrary.org");
        assert_eq!(config.catalog.request_timeout_secs, None);
        assert_eq!(config.covers.size, CoverSize::Medium);
        assert_eq!(config.display.card_subject_limit, 5);
        assert_eq!(config.display.detail_subject_limit, 8);
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let toml_content = r#"
[catalog]
base_url = "http://localhost:8080"
request_timeout_secs = 12

[covers]
size = "L"

[display]
detail_subject_limit = 3
"#;
        let mut file = File::create(&path).unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.catalog.base_url, "http://localhost:8080");
        assert_eq!(config.catalog.request_timeout_secs, Some(12));
        assert_eq!(config.covers.size, CoverSize::Large);
        assert_eq!(config.covers.base_url, "https://covers.openlibrary.org");
        assert_eq!(config.display.detail_subject_limit, 3);
        assert_eq!(config.display.card_subject_limit, 5);
    }

    #[test]
    fn test_load_config_missing_file() {
        let path = PathBuf::from("/nonexistent/book-finder.toml");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_http_options() {
        let catalog = CatalogConfig {
            request_timeout_secs: Some(7),
            user_agent: Some("tester/1.0".to_string()),
            ..Default::default()
        };
        let options = catalog.http_options();
        assert_eq!(options.user_agent, "tester/1.0");
        assert_eq!(options.timeout, Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = Config::default();
        let rendered = to_toml(&config).unwrap();
        assert!(rendered.contains("[catalog]"));

        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}

//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Bearer token for the post listing API
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Post listing API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Practice repository layout and link building
    #[serde(default)]
    pub library: LibraryConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Pipeline feature flags
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Load configuration from a TOML or YAML file, picked by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            _ => Ok(toml::from_str(&content)?),
        }
    }

    /// Load `explicit` when given, else the first conventional file in `dir`.
    ///
    /// Only a missing file falls back to defaults. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn load_from(explicit: Option<&Path>, dir: impl AsRef<Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::discover(dir) {
                Some(path) => path,
                None => {
                    log::warn!("No configuration file found. Using defaults.");
                    return Ok(Self::default());
                }
            },
        };
        log::info!("Loading configuration from {}", path.display());
        Self::load(&path)
    }

    /// First existing file among the conventional config names in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        ["config.yaml", "config.yml", "config.toml"]
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|path| path.is_file())
    }

    /// The bearer token, trimmed. Missing or blank is fatal.
    pub fn bearer_token(&self) -> Result<&str> {
        self.bearer_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::config("bearer_token is not set"))
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api.base_url)
            .map_err(|e| AppError::validation(format!("api.base_url is invalid: {e}")))?;
        Url::parse(&self.library.site_url)
            .map_err(|e| AppError::validation(format!("library.site_url is invalid: {e}")))?;
        Url::parse(&self.library.profile_base_url).map_err(|e| {
            AppError::validation(format!("library.profile_base_url is invalid: {e}"))
        })?;
        if self.api.user_id.trim().is_empty() {
            return Err(AppError::validation("api.user_id is empty"));
        }
        if !(5..=100).contains(&self.api.max_results) {
            return Err(AppError::validation(
                "api.max_results must be between 5 and 100",
            ));
        }
        if self.api.timeout_secs == Some(0) {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.library.practices_dir.as_os_str().is_empty() {
            return Err(AppError::validation("library.practices_dir is empty"));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(AppError::validation("output.path is empty"));
        }
        Ok(())
    }
}

/// Post listing API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme and host of the API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Account whose posts are listed
    #[serde(default = "defaults::user_id")]
    pub user_id: String,

    /// Page size requested per call
    #[serde(default = "defaults::max_results")]
    pub max_results: u32,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds, none when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_id: defaults::user_id(),
            max_results: defaults::max_results(),
            user_agent: defaults::user_agent(),
            timeout_secs: None,
        }
    }
}

/// Practice repository and public site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default = "defaults::repo_url")]
    pub repo_url: String,

    /// Local checkout of the repository
    #[serde(default = "defaults::repo_dir")]
    pub repo_dir: PathBuf,

    #[serde(default = "defaults::branch")]
    pub branch: String,

    /// Directory holding one file per practice
    #[serde(default = "defaults::practices_dir")]
    pub practices_dir: PathBuf,

    /// Extension stripped from file names to get the slug
    #[serde(default = "defaults::document_extension")]
    pub document_extension: String,

    /// Public site root, used for practice links and icons
    #[serde(default = "defaults::site_url")]
    pub site_url: String,

    /// Path segment between the site root and the slug
    #[serde(default = "defaults::practice_path")]
    pub practice_path: String,

    /// Two-column author table (author_id, social_handle)
    #[serde(default = "defaults::authors_file")]
    pub authors_file: PathBuf,

    /// Prefix for profile links of authors without a handle
    #[serde(default = "defaults::profile_base_url")]
    pub profile_base_url: String,

    /// Marker placed before every author mention
    #[serde(default = "defaults::author_marker")]
    pub author_marker: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            repo_url: defaults::repo_url(),
            repo_dir: defaults::repo_dir(),
            branch: defaults::branch(),
            practices_dir: defaults::practices_dir(),
            document_extension: defaults::document_extension(),
            site_url: defaults::site_url(),
            practice_path: defaults::practice_path(),
            authors_file: defaults::authors_file(),
            profile_base_url: defaults::profile_base_url(),
            author_marker: defaults::author_marker(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: defaults::output_path(),
        }
    }
}

/// Pipeline feature flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Treat every practice as pending, ignoring published posts
    #[serde(default)]
    pub force_all: bool,

    /// Replace author ids with mentions from the author table
    #[serde(default = "defaults::enabled")]
    pub resolve_authors: bool,

    /// Clone or pull the practice repository before ingesting
    #[serde(default)]
    pub sync_repo: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            force_all: false,
            resolve_authors: true,
            sync_repo: false,
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // API defaults
    pub fn base_url() -> String {
        "https://api.twitter.com".into()
    }
    pub fn user_id() -> String {
        "1321838110133673984".into()
    }
    pub fn max_results() -> u32 {
        100
    }
    pub fn user_agent() -> String {
        concat!("oplbot/", env!("CARGO_PKG_VERSION")).into()
    }

    // Library defaults
    pub fn repo_url() -> String {
        "https://github.com/openpracticelibrary/openpracticelibrary.git".into()
    }
    pub fn repo_dir() -> PathBuf {
        PathBuf::from("openpracticelibrary")
    }
    pub fn branch() -> String {
        "main".into()
    }
    pub fn practices_dir() -> PathBuf {
        PathBuf::from("openpracticelibrary/src/pages/practice")
    }
    pub fn document_extension() -> String {
        "md".into()
    }
    pub fn site_url() -> String {
        "https://openpracticelibrary.com".into()
    }
    pub fn practice_path() -> String {
        "practice".into()
    }
    pub fn authors_file() -> PathBuf {
        PathBuf::from("authors.csv")
    }
    pub fn profile_base_url() -> String {
        "https://github.com/".into()
    }
    pub fn author_marker() -> String {
        "\u{1F64F}\u{1F3FB}".into()
    }

    // Output defaults
    pub fn output_path() -> PathBuf {
        PathBuf::from("opl_practices.csv")
    }

    pub fn enabled() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_page_size_out_of_range() {
        let mut config = Config::default();
        config.api.max_results = 500;
        assert!(config.validate().is_err());
        config.api.max_results = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn bearer_token_missing_is_config_error() {
        let config = Config::default();
        assert!(matches!(config.bearer_token(), Err(AppError::Config(_))));
    }

    #[test]
    fn bearer_token_blank_is_config_error() {
        let config = Config {
            bearer_token: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(config.bearer_token().is_err());
    }

    #[test]
    fn bearer_token_is_trimmed() {
        let config = Config {
            bearer_token: Some(" abc \n".to_string()),
            ..Config::default()
        };
        assert_eq!(config.bearer_token().unwrap(), "abc");
    }

    #[test]
    fn load_yaml_with_only_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "bearer_token: secret\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.bearer_token().unwrap(), "secret");
        assert_eq!(config.api.max_results, 100);
        assert!(config.pipeline.resolve_authors);
        assert!(!config.pipeline.force_all);
    }

    #[test]
    fn load_toml_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
bearer_token = "t"

[api]
user_id = "42"
timeout_secs = 10

[library]
practices_dir = "docs/practice"

[pipeline]
force_all = true
resolve_authors = false
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.user_id, "42");
        assert_eq!(config.api.timeout_secs, Some(10));
        assert_eq!(config.library.practices_dir, PathBuf::from("docs/practice"));
        assert_eq!(config.library.site_url, "https://openpracticelibrary.com");
        assert!(config.pipeline.force_all);
        assert!(!config.pipeline.resolve_authors);
    }

    #[test]
    fn load_from_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(None, dir.path()).unwrap();
        assert!(config.bearer_token.is_none());
        assert_eq!(config.output.path, PathBuf::from("opl_practices.csv"));
    }

    #[test]
    fn load_from_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let result = Config::load_from(Some(&path), dir.path());
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn load_from_malformed_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "api: [unclosed
").unwrap();
        let result = Config::load_from(Some(&path), dir.path());
        assert!(matches!(result, Err(AppError::Yaml(_))));
    }

    #[test]
    fn load_from_malformed_discovered_file_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[api
user_id = 1").unwrap();
        let result = Config::load_from(None, dir.path());
        assert!(matches!(result, Err(AppError::Toml(_))));
    }

    #[test]
    fn discover_prefers_yaml() {
        let dir = TempDir::new().unwrap();
        assert!(Config::discover(dir.path()).is_none());

        fs::write(dir.path().join("config.toml"), "").unwrap();
        fs::write(dir.path().join("config.yml"), "").unwrap();
        assert_eq!(
            Config::discover(dir.path()),
            Some(dir.path().join("config.yml"))
        );
    }
}

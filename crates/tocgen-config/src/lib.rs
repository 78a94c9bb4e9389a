//! Configuration management for tocgen.
//!
//! Parses `tocgen.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `output.base_url` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override soft line budget.
    pub soft_budget: Option<usize>,
    /// Override hard line budget.
    pub hard_budget: Option<usize>,
    /// Override content base URL.
    pub base_url: Option<String>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tocgen.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation tree configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Line budget configuration.
    pub budget: BudgetConfig,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Customization document configuration.
    pub customization: CustomizationConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    extension: Option<String>,
    exclude_names: Vec<String>,
}

/// Resolved documentation tree configuration.
#[derive(Debug)]
pub struct DocsConfig {
    /// Root of the topic document tree.
    pub source_dir: PathBuf,
    /// Topic document extension, without the dot.
    pub extension: String,
    /// Extra filenames that are never indexed as topic documents.
    pub exclude_names: Vec<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            extension: "md".to_owned(),
            exclude_names: Vec::new(),
        }
    }
}

/// Line budget configuration.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct BudgetConfig {
    /// Warning threshold for generated documents.
    pub soft: usize,
    /// Overflow trigger for generated documents.
    pub hard: usize,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self { soft: 50, hard: 75 }
    }
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    index_name: Option<String>,
    overflow_name: Option<String>,
    base_url: Option<String>,
    dir: Option<String>,
    site_title: Option<String>,
}

/// Resolved output configuration.
#[derive(Debug)]
pub struct OutputConfig {
    /// Filename of the primary index written into every directory.
    pub index_name: String,
    /// Filename of the extended index holding overflow content.
    pub overflow_name: String,
    /// Prefix for absolute content links. Relative links when `None`.
    pub base_url: Option<String>,
    /// Mirror directory for generated files. In-tree when `None`.
    pub dir: Option<PathBuf>,
    /// Title of the root index when no customization overrides it.
    pub site_title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            index_name: "INDEX.md".to_owned(),
            overflow_name: "INDEX-EXTENDED.md".to_owned(),
            base_url: None,
            dir: None,
            site_title: "Documentation".to_owned(),
        }
    }
}

/// Customization document configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CustomizationConfig {
    /// Reserved filename of per-directory customization documents.
    pub name: String,
}

impl Default for CustomizationConfig {
    fn default() -> Self {
        Self {
            name: "_index.yaml".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.base_url`").
        field: String,
        /// Error message (e.g., "${`DOCS_BASE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tocgen.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated once more after overrides.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(soft) = settings.soft_budget {
            self.budget.soft = soft;
        }
        if let Some(hard) = settings.hard_budget {
            self.budget.hard = hard;
        }
        if let Some(base_url) = &settings.base_url {
            self.output_resolved.base_url = normalize_base_url(base_url);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir = Some(output_dir.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            budget: BudgetConfig::default(),
            output: OutputConfigRaw::default(),
            customization: CustomizationConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                ..DocsConfig::default()
            },
            output_resolved: OutputConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_budget()?;
        self.validate_output()?;
        require_non_empty(&self.customization.name, "customization.name")?;
        require_non_empty(&self.docs_resolved.extension, "docs.extension")?;
        Ok(())
    }

    /// Validate line budget configuration.
    fn validate_budget(&self) -> Result<(), ConfigError> {
        if self.budget.soft == 0 || self.budget.hard == 0 {
            return Err(ConfigError::Validation(
                "budget.soft and budget.hard must be greater than 0".to_owned(),
            ));
        }
        if self.budget.soft > self.budget.hard {
            return Err(ConfigError::Validation(format!(
                "budget.soft ({}) cannot exceed budget.hard ({})",
                self.budget.soft, self.budget.hard
            )));
        }
        Ok(())
    }

    /// Validate output configuration.
    fn validate_output(&self) -> Result<(), ConfigError> {
        let output = &self.output_resolved;
        require_non_empty(&output.index_name, "output.index_name")?;
        require_non_empty(&output.overflow_name, "output.overflow_name")?;
        if output.index_name == output.overflow_name {
            return Err(ConfigError::Validation(
                "output.index_name and output.overflow_name must differ".to_owned(),
            ));
        }
        if output.index_name.contains('/') || output.overflow_name.contains('/') {
            return Err(ConfigError::Validation(
                "output filenames cannot contain '/'".to_owned(),
            ));
        }
        if let Some(ref base_url) = output.base_url {
            require_http_url(base_url, "output.base_url")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.output.base_url {
            self.output.base_url = Some(expand::expand_env(url, "output.base_url")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = OutputConfig::default();

        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
            extension: self
                .docs
                .extension
                .as_deref()
                .map_or_else(
                    || DocsConfig::default().extension,
                    |e| e.trim_start_matches('.').to_owned(),
                ),
            exclude_names: self.docs.exclude_names.clone(),
        };

        self.output_resolved = OutputConfig {
            index_name: self.output.index_name.clone().unwrap_or(defaults.index_name),
            overflow_name: self
                .output
                .overflow_name
                .clone()
                .unwrap_or(defaults.overflow_name),
            base_url: self.output.base_url.as_deref().and_then(normalize_base_url),
            dir: self.output.dir.as_deref().map(|d| config_dir.join(d)),
            site_title: self.output.site_title.clone().unwrap_or(defaults.site_title),
        };
    }
}

/// Trim a base URL, mapping an empty value to `None`.
fn normalize_base_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.extension, "md");
        assert_eq!(config.budget, BudgetConfig { soft: 50, hard: 75 });
        assert_eq!(config.output_resolved.index_name, "INDEX.md");
        assert_eq!(config.output_resolved.overflow_name, "INDEX-EXTENDED.md");
        assert_eq!(config.output_resolved.site_title, "Documentation");
        assert!(config.output_resolved.base_url.is_none());
        assert_eq!(config.customization.name, "_index.yaml");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.budget.soft, 50);
        assert_eq!(config.budget.hard, 75);
    }

    #[test]
    fn test_parse_budget_config() {
        let toml = r"
[budget]
soft = 40
hard = 60
";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.budget, BudgetConfig { soft: 40, hard: 60 });
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "knowledge"
extension = ".txt"
exclude_names = ["CHANGELOG.md"]

[output]
index_name = "llms.txt"
overflow_name = "llms-more.txt"
base_url = "https://example.com/blob/main/"
dir = "generated"
site_title = "Knowledge Base"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/knowledge")
        );
        assert_eq!(config.docs_resolved.extension, "txt");
        assert_eq!(config.docs_resolved.exclude_names, vec!["CHANGELOG.md"]);
        assert_eq!(config.output_resolved.index_name, "llms.txt");
        assert_eq!(config.output_resolved.overflow_name, "llms-more.txt");
        assert_eq!(
            config.output_resolved.base_url.as_deref(),
            Some("https://example.com/blob/main")
        );
        assert_eq!(
            config.output_resolved.dir,
            Some(PathBuf::from("/project/generated"))
        );
        assert_eq!(config.output_resolved.site_title, "Knowledge Base");
    }

    #[test]
    fn test_empty_base_url_is_none() {
        let toml = r#"
[output]
base_url = ""
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert!(config.output_resolved.base_url.is_none());
    }

    #[test]
    fn test_validate_soft_exceeds_hard() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.budget = BudgetConfig { soft: 90, hard: 75 };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("budget.soft"));
    }

    #[test]
    fn test_validate_zero_budget() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.budget.hard = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_same_output_names() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.output_resolved.overflow_name = "INDEX.md".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.output_resolved.base_url = Some("ftp://example.com".to_owned());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("output.base_url"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            hard_budget: Some(120),
            base_url: Some("https://example.com/".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(config.budget.hard, 120);
        assert_eq!(config.budget.soft, 50); // Unchanged
        assert_eq!(
            config.output_resolved.base_url.as_deref(),
            Some("https://example.com")
        );
        assert!(config.output_resolved.dir.is_none());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/tocgen.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("tocgen.toml");
        std::fs::write(&config_path, "[docs]\nsource_dir = \"content\"\n").unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(
            config.docs_resolved.source_dir,
            temp_dir.path().join("content")
        );
        assert_eq!(config.config_path, Some(config_path));
    }

    #[test]
    fn test_load_rejects_invalid_cli_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("tocgen.toml");
        std::fs::write(&config_path, "").unwrap();
        let overrides = CliSettings {
            soft_budget: Some(500),
            ..Default::default()
        };

        let result = Config::load(Some(&config_path), Some(&overrides));

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}

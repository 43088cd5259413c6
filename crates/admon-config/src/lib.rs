//! Configuration management for admon.
//!
//! Parses `admon.toml` with serde and auto-discovers it in the current
//! directory or any parent. Every setting has a default, so running without a
//! config file behaves exactly like an empty one.
//!
//! ```toml
//! [convert]
//! fix_headings = true
//! skip_code_fences = false
//!
//! [fetch]
//! user_agent = "Mozilla/5.0"
//! max_redirects = 5
//! timeout_secs = 30
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! `fetch.user_agent` supports `${VAR}` and `${VAR:-default}` expansion.

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "admon.toml";

/// Upper bound accepted for `fetch.max_redirects`.
const MAX_REDIRECTS_LIMIT: u32 = 20;

/// CLI settings that override configuration file values.
///
/// Only `Some` fields override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override heading normalization.
    pub fix_headings: Option<bool>,
    /// Override code fence skipping.
    pub skip_code_fences: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion configuration.
    pub convert: ConvertConfig,
    /// Remote fetch configuration.
    pub fetch: FetchConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Conversion configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Insert the missing space in headings like `###Title`.
    pub fix_headings: bool,
    /// Leave fenced code blocks untouched.
    pub skip_code_fences: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            fix_headings: true,
            skip_code_fences: false,
        }
    }
}

/// Remote fetch configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// `User-Agent` header sent to rentry.
    pub user_agent: String,
    /// Redirect hops followed before failing.
    pub max_redirects: u32,
    /// Global request timeout in seconds.
    pub timeout_secs: u64,
}

impl FetchConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_owned(),
            max_redirects: 5,
            timeout_secs: 30,
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
        /// Config field path (e.g., "`fetch.user_agent`").
        field: String,
        /// Error message (e.g., "${`ADMON_AGENT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `admon.toml` in the current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let start = std::env::current_dir().unwrap_or_default();
        Self::load_from(config_path, &start, cli_settings)
    }

    /// Like [`load`](Self::load) but discovers the config file starting at `start`.
    fn load_from(
        config_path: Option<&Path>,
        start: &Path,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config(start) {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(fix_headings) = settings.fix_headings {
            self.convert.fix_headings = fix_headings;
        }
        if let Some(skip_code_fences) = settings.skip_code_fences {
            self.convert.skip_code_fences = skip_code_fences;
        }
    }

    /// Search for the config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "fetch.user_agent cannot be empty".to_owned(),
            ));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "fetch.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if self.fetch.max_redirects > MAX_REDIRECTS_LIMIT {
            return Err(ConfigError::Validation(format!(
                "fetch.max_redirects cannot exceed {MAX_REDIRECTS_LIMIT}"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.fetch.user_agent = expand::expand_env(&self.fetch.user_agent, "fetch.user_agent")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.convert.fix_headings);
        assert!(!config.convert.skip_code_fences);
        assert_eq!(config.fetch.user_agent, "Mozilla/5.0");
        assert_eq!(config.fetch.max_redirects, 5);
        assert_eq!(config.fetch.timeout(), Duration::from_secs(30));
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.convert.fix_headings);
        assert_eq!(config.fetch.max_redirects, 5);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[convert]
fix_headings = false
skip_code_fences = true

[fetch]
user_agent = "admon/0.1"
max_redirects = 3
timeout_secs = 10
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.convert.fix_headings);
        assert!(config.convert.skip_code_fences);
        assert_eq!(config.fetch.user_agent, "admon/0.1");
        assert_eq!(config.fetch.max_redirects, 3);
        assert_eq!(config.fetch.timeout_secs, 10);
    }

    #[test]
    fn test_parse_partial_section_keeps_defaults() {
        let toml = r"
[fetch]
max_redirects = 1
";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.fetch.max_redirects, 1);
        assert_eq!(config.fetch.user_agent, "Mozilla/5.0");
        assert_eq!(config.fetch.timeout_secs, 30);
    }

    #[test]
    fn test_parse_wrong_type_fails() {
        let result: Result<Config, _> = toml::from_str("[fetch]\nmax_redirects = \"five\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            fix_headings: Some(false),
            skip_code_fences: Some(true),
        };

        config.apply_cli_settings(&overrides);

        assert!(!config.convert.fix_headings);
        assert!(config.convert.skip_code_fences);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config: Config = toml::from_str("[convert]\nskip_code_fences = true\n").unwrap();

        config.apply_cli_settings(&CliSettings::default());

        assert!(config.convert.skip_code_fences);
        assert!(config.convert.fix_headings);
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let mut config = Config::default();
        "  ".clone_into(&mut config.fetch.user_agent);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fetch.user_agent"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.fetch.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("timeout_secs")
        ));
    }

    #[test]
    fn test_validate_redirect_limit() {
        let mut config = Config::default();
        config.fetch.max_redirects = 21;
        assert!(config.validate().is_err());
        config.fetch.max_redirects = 20;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[fetch]\nuser_agent = \"custom\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.fetch.user_agent, "custom");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_runs_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("admon.toml");
        std::fs::write(&path, "[fetch]\ntimeout_secs = 0\n").unwrap();

        assert!(matches!(
            Config::load(Some(&path), None),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_discovers_config_in_parent() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[convert]\nskip_code_fences = true\n",
        )
        .unwrap();
        let nested = dir.path().join("docs/guides");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Config::load_from(None, &nested, None).unwrap();

        assert!(config.convert.skip_code_fences);
        assert_eq!(
            config.config_path,
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_cli_settings_override_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[convert]\nfix_headings = false\n",
        )
        .unwrap();
        let overrides = CliSettings {
            fix_headings: Some(true),
            ..CliSettings::default()
        };

        let config = Config::load_from(None, dir.path(), Some(&overrides)).unwrap();

        assert!(config.convert.fix_headings);
    }

    #[test]
    fn test_expand_env_vars_user_agent() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("ADMON_TEST_CONFIG_AGENT", "expanded-agent");
        }
        let mut config: Config =
            toml::from_str("[fetch]\nuser_agent = \"${ADMON_TEST_CONFIG_AGENT}\"\n").unwrap();

        config.expand_env_vars().unwrap();

        assert_eq!(config.fetch.user_agent, "expanded-agent");
        unsafe {
            std::env::remove_var("ADMON_TEST_CONFIG_AGENT");
        }
    }
}

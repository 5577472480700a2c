//! Configuration management for snipex.
//!
//! Parses `snipex.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "snipex.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the snippet source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the snippet output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the tab expansion width.
    pub tab_width: Option<usize>,
    /// Override the common-indentation trimming flag.
    pub trim_spaces: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extraction configuration (paths are relative strings from TOML).
    extract: ExtractConfigRaw,

    /// Resolved extraction configuration (set after loading).
    #[serde(skip)]
    pub extract_resolved: ExtractConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw extraction configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExtractConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    tab_width: Option<usize>,
    trim_spaces: Option<bool>,
}

/// Resolved extraction configuration with absolute paths.
#[derive(Debug)]
pub struct ExtractConfig {
    /// Directory scanned for snippet directives.
    pub source_dir: PathBuf,
    /// Directory the extracted snippets are written to.
    pub output_dir: PathBuf,
    /// Number of spaces a tab character expands to.
    pub tab_width: usize,
    /// Whether common leading whitespace is stripped from output.
    pub trim_spaces: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src"),
            output_dir: PathBuf::from("snippets"),
            tab_width: 4,
            trim_spaces: true,
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
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `snipex.toml` in the current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.extract_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.extract_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(tab_width) = settings.tab_width {
            self.extract_resolved.tab_width = tab_width;
        }
        if let Some(trim_spaces) = settings.trim_spaces {
            self.extract_resolved.trim_spaces = trim_spaces;
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
            extract: ExtractConfigRaw::default(),
            extract_resolved: ExtractConfig {
                source_dir: base.join("src"),
                output_dir: base.join("snippets"),
                tab_width: 4,
                trim_spaces: true,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.extract_resolved = ExtractConfig {
            source_dir: resolve(self.extract.source_dir.as_deref(), "src"),
            output_dir: resolve(self.extract.output_dir.as_deref(), "snippets"),
            tab_width: self.extract.tab_width.unwrap_or(4),
            trim_spaces: self.extract.trim_spaces.unwrap_or(true),
        };
    }
}

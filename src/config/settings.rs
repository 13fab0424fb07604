use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::pack::archive::{DEFAULT_FORMAT, DEFAULT_VERSION};
use crate::pack::Compression;
use crate::util::paths::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Default name of the question node prompting for a story
pub const DEFAULT_QUESTION_NAME: &str = "Choisis une histoire";

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Manifest format tag
    pub format: String,
    /// Manifest version number
    pub version: u32,
    /// Question node name when a description leaves it out
    pub question_name: String,
    /// Default archive path
    pub output: PathBuf,
    pub archive: ArchiveConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    pub compression: Compression,
    /// Where thumbnail working directories go (None = system temp dir)
    pub scratch_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlArchiveConfig {
    pub compression: Option<Compression>,
    pub scratch_dir: Option<PathBuf>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub format: Option<String>,
    pub version: Option<u32>,
    pub question_name: Option<String>,
    pub output: Option<PathBuf>,
    pub archive: Option<TomlArchiveConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            version: DEFAULT_VERSION,
            question_name: DEFAULT_QUESTION_NAME.to_string(),
            output: PathBuf::from("pack.zip"),
            archive: ArchiveConfig {
                compression: Compression::Deflated,
                scratch_dir: None,
            },
        }
    }
}

impl Config {
    /// Load configuration from the default file, merging with defaults
    pub fn load() -> Self {
        let config_file = config_path();

        // Create example config on first run
        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        Self::load_from(&config_file)
    }

    /// Load configuration from `path`. A missing or malformed file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Config::default();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "No config file, using defaults");
                return config;
            }
        };

        match toml::from_str::<TomlConfig>(&contents) {
            Ok(toml_config) => config.merge(toml_config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
            }
        }
        config
    }

    fn merge(&mut self, toml_config: TomlConfig) {
        if let Some(format) = toml_config.format {
            self.format = format;
        }
        if let Some(version) = toml_config.version {
            self.version = version;
        }
        if let Some(name) = toml_config.question_name {
            self.question_name = name;
        }
        if let Some(output) = toml_config.output {
            self.output = output;
        }
        if let Some(archive) = toml_config.archive {
            if let Some(compression) = archive.compression {
                self.archive.compression = compression;
            }
            if archive.scratch_dir.is_some() {
                self.archive.scratch_dir = archive.scratch_dir;
            }
        }
    }

    fn create_default_config(path: &Path) {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = output;
        self
    }
}

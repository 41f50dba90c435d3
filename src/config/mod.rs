//! Project configuration management for `sidx.toml`.
//!
//! The config file is optional: a run without one uses the built-in
//! defaults below and treats the current directory as the project root.
//! When a config file is found (searching upward from the cwd), its parent
//! directory becomes the project root, and all configured paths resolve
//! against it.
//!
//! ```toml
//! output = "public/search-index.json"
//!
//! [[corpus]]
//! root = "content/blog"
//! prefix = "/blog"
//!
//! [[corpus]]
//! root = "content/notes"
//! prefix = "/notes"
//! ```

mod error;

pub use error::ConfigError;

use crate::cli::{Cli, Commands};
use crate::{debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing sidx.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Project root directory - parent of the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Output file path, relative to the project root
    pub output: PathBuf,

    /// Document collections to index, in output order
    #[serde(rename = "corpus")]
    pub corpora: Vec<CorpusConfig>,
}

/// One document collection entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Collection root directory, relative to the project root
    pub root: PathBuf,

    /// URL prefix for records from this collection (e.g. `/blog`)
    pub prefix: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            output: PathBuf::from("public/search-index.json"),
            corpora: vec![
                CorpusConfig {
                    root: PathBuf::from("content/blog"),
                    prefix: "/blog".to_string(),
                },
                CorpusConfig {
                    root: PathBuf::from("content/notes"),
                    prefix: "/notes".to_string(),
                },
            ],
        }
    }
}

impl IndexConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from the cwd for the config file; falls back to
    /// defaults rooted at the cwd when none exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                let mut config = Self::default();
                config.root = std::env::current_dir()
                    .context("failed to get current working directory")?;
                config
            }
        };

        config.apply_command_options(cli);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides for the active command.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { args } => {
                if let Some(output) = &args.output {
                    self.output = output.clone();
                }
            }
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        // Unknown keys are worth a warning but never block a batch run
        if !ignored.is_empty() {
            print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Validate the loaded configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.corpora.is_empty() {
            return Err(ConfigError::Validation(
                "no corpora configured, nothing to index".to_string(),
            ));
        }
        for corpus in &self.corpora {
            if !corpus.prefix.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "corpus prefix `{}` must start with `/`",
                    corpus.prefix
                )));
            }
        }
        Ok(())
    }

    /// Absolute output file path.
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output)
    }
}

/// Print warning about unknown fields.
fn print_unknown_fields_warning(fields: &[String], path: &Path) {
    let display_path = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());
    log!("warning"; "unknown fields in {}, ignoring:", display_path);
    for field in fields {
        eprintln!("- {field}");
    }
}

/// Find config file by searching upward from the current directory
///
/// Starts from cwd and walks up parent directories until finding
/// `config_name`. Returns the absolute path to the config file if found.
fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site_layout() {
        let config = IndexConfig::default();
        assert_eq!(config.output, PathBuf::from("public/search-index.json"));
        assert_eq!(config.corpora.len(), 2);
        assert_eq!(config.corpora[0].prefix, "/blog");
        assert_eq!(config.corpora[1].prefix, "/notes");
    }

    #[test]
    fn test_from_str_full() {
        let config = IndexConfig::from_str(
            "output = \"dist/index.json\"\n\n\
             [[corpus]]\nroot = \"posts\"\nprefix = \"/posts\"\n",
        )
        .unwrap();

        assert_eq!(config.output, PathBuf::from("dist/index.json"));
        assert_eq!(config.corpora.len(), 1);
        assert_eq!(config.corpora[0].root, PathBuf::from("posts"));
    }

    #[test]
    fn test_from_str_empty_uses_defaults() {
        let config = IndexConfig::from_str("").unwrap();
        assert_eq!(config.corpora.len(), 2);
        assert_eq!(config.output, PathBuf::from("public/search-index.json"));
    }

    #[test]
    fn test_validate_rejects_relative_prefix() {
        let config = IndexConfig::from_str(
            "[[corpus]]\nroot = \"posts\"\nprefix = \"posts\"\n",
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_corpora() {
        let config = IndexConfig {
            corpora: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_with_ignored_collects_unknown_keys() {
        let (config, ignored) = IndexConfig::parse_with_ignored(
            "output = \"x.json\"\ntypo_field = 1\n\n\
             [[corpus]]\nroot = \"a\"\nprefix = \"/a\"\nbogus = true\n",
        )
        .unwrap();

        assert_eq!(config.output, PathBuf::from("x.json"));
        assert_eq!(ignored, vec!["typo_field", "corpus.0.bogus"]);
    }

    #[test]
    fn test_output_path_joins_root() {
        let mut config = IndexConfig::default();
        config.root = PathBuf::from("/site");
        assert_eq!(
            config.output_path(),
            PathBuf::from("/site/public/search-index.json")
        );
    }
}

//! Normalizer configuration.
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file (or no file) yields the standard pipeline: delete-mode filtering,
//! the built-in English stopwords, Porter stemming.
//!
//! ```toml
//! filter_mode = "delete"        # or "space"
//! stemming = true
//! stopwords = "english"         # or "none", or { path = "stopwords.txt" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use lexnorm_types::StopwordError;
use serde::Deserialize;

use crate::analyzer::filter::FilterMode;
use crate::analyzer::stopwords::StopwordSet;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("reading config file {}: {source}", .path.display())]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unexpected fields.
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configured stopword list could not be loaded.
    #[error(transparent)]
    Stopwords(#[from] StopwordError),
}

/// Where the stopword list comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwordSource {
    /// Built-in `english-v1` list.
    #[default]
    English,
    /// No stopword removal.
    None,
    /// One word per line from a file.
    Path(PathBuf),
}

impl StopwordSource {
    /// Builds the configured set.
    ///
    /// # Errors
    ///
    /// Only the `Path` variant can fail, with the file's load error.
    pub fn load(&self) -> Result<StopwordSet, StopwordError> {
        match self {
            StopwordSource::English => Ok(StopwordSet::english()),
            StopwordSource::None => Ok(StopwordSet::empty()),
            StopwordSource::Path(path) => StopwordSet::from_path(path),
        }
    }
}

/// Pipeline options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizerConfig {
    /// Handling of characters that are neither letters nor whitespace.
    pub filter_mode: FilterMode,
    /// Apply the Porter stemmer to surviving tokens.
    pub stemming: bool,
    /// Stopword list to remove.
    pub stopwords: StopwordSource,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            filter_mode: FilterMode::Delete,
            stemming: true,
            stopwords: StopwordSource::English,
        }
    }
}

impl NormalizerConfig {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist. A relative stopword path is resolved against the
    /// config file's directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file exists but cannot be read and
    /// `ConfigError::Parse` if it is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(
                "No config file found at {}. Using NormalizerConfig::default().",
                path.display()
            );
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg = Self::from_toml_str(&text)?;

        if let (StopwordSource::Path(list), Some(root)) = (&mut cfg.stopwords, path.parent()) {
            if list.is_relative() {
                *list = root.join(&*list);
            }
        }

        tracing::debug!(config = ?cfg, "loaded normalizer config from {}", path.display());
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let cfg = NormalizerConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, NormalizerConfig::default());
        assert!(cfg.stemming);
        assert_eq!(cfg.filter_mode, FilterMode::Delete);
        assert_eq!(cfg.stopwords, StopwordSource::English);
    }

    #[test]
    fn parses_all_fields() {
        let cfg = NormalizerConfig::from_toml_str(
            r#"
            filter_mode = "space"
            stemming = false
            stopwords = "none"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.filter_mode, FilterMode::Space);
        assert!(!cfg.stemming);
        assert_eq!(cfg.stopwords, StopwordSource::None);
    }

    #[test]
    fn parses_path_source() {
        let cfg = NormalizerConfig::from_toml_str(r#"stopwords = { path = "lists/spam.txt" }"#)
            .unwrap();
        assert_eq!(cfg.stopwords, StopwordSource::Path(PathBuf::from("lists/spam.txt")));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = NormalizerConfig::from_toml_str("lowercase = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_mode_rejected() {
        assert!(NormalizerConfig::from_toml_str(r#"filter_mode = "replace""#).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = NormalizerConfig::load(&dir.path().join("lexnorm.toml")).unwrap();
        assert_eq!(cfg, NormalizerConfig::default());
    }

    #[test]
    fn relative_stopword_path_resolved_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("lexnorm.toml");
        fs::write(&cfg_path, "stopwords = { path = \"words.txt\" }\n").unwrap();
        fs::write(dir.path().join("words.txt"), "here\nnow\n").unwrap();

        let cfg = NormalizerConfig::load(&cfg_path).unwrap();
        assert_eq!(cfg.stopwords, StopwordSource::Path(dir.path().join("words.txt")));

        let set = cfg.stopwords.load().unwrap();
        assert_eq!(set.label(), "words");
        assert!(set.contains("here"));
    }

    #[test]
    fn source_load_variants() {
        assert_eq!(StopwordSource::English.load().unwrap().len(), 179);
        assert!(StopwordSource::None.load().unwrap().is_empty());
        assert!(StopwordSource::Path(PathBuf::from("/nonexistent/list.txt"))
            .load()
            .is_err());
    }
}

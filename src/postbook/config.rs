use crate::error::{PostbookError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DOCS_DIR: &str = "docs";
const DEFAULT_BACKUPS_DIR: &str = "backups";
const DEFAULT_INDENT: usize = 4;
const DEFAULT_PREVIEW_WIDTH: usize = 30;

/// Configuration for postbook, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostbookConfig {
    /// Directory holding the documents (relative to the working directory)
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Backups directory, relative to the document being written
    #[serde(default = "default_backups_dir")]
    pub backups_dir: PathBuf,

    /// Spaces per indentation level in written documents
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Columns of parameter/code text shown in menu previews
    #[serde(default = "default_preview_width")]
    pub preview_width: usize,
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DOCS_DIR)
}

fn default_backups_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BACKUPS_DIR)
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

fn default_preview_width() -> usize {
    DEFAULT_PREVIEW_WIDTH
}

impl Default for PostbookConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            backups_dir: default_backups_dir(),
            indent: DEFAULT_INDENT,
            preview_width: DEFAULT_PREVIEW_WIDTH,
        }
    }
}

impl PostbookConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PostbookError::Io)?;
        let config: PostbookConfig =
            serde_json::from_str(&content).map_err(PostbookError::Serialization)?;
        Ok(config)
    }

    /// Every key with its current value, in a stable order
    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        vec![
            ("docs_dir", self.docs_dir.display().to_string()),
            ("backups_dir", self.backups_dir.display().to_string()),
            ("indent", self.indent.to_string()),
            ("preview_width", self.preview_width.to_string()),
        ]
    }

    pub fn get(&self, key: &str) -> Result<String> {
        self.list_all()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| unknown_key(key))
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "docs_dir" => self.docs_dir = non_empty_path(key, value)?,
            "backups_dir" => self.backups_dir = non_empty_path(key, value)?,
            "indent" => self.indent = parse_count(key, value)?,
            "preview_width" => self.preview_width = parse_count(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PostbookError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PostbookError::Serialization)?;
        fs::write(config_path, content).map_err(PostbookError::Io)?;
        Ok(())
    }
}

fn unknown_key(key: &str) -> PostbookError {
    PostbookError::InvalidInput(format!(
        "unknown config key '{}' (expected docs_dir, backups_dir, indent or preview_width)",
        key
    ))
}

fn non_empty_path(key: &str, value: &str) -> Result<PathBuf> {
    if value.is_empty() {
        return Err(PostbookError::InvalidInput(format!("{} cannot be empty", key)));
    }
    Ok(PathBuf::from(value))
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value.parse().map_err(|_| {
        PostbookError::InvalidInput(format!("{} must be a whole number, got '{}'", key, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PostbookConfig::default();
        assert_eq!(config.docs_dir, PathBuf::from("docs"));
        assert_eq!(config.backups_dir, PathBuf::from("backups"));
        assert_eq!(config.indent, 4);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = PostbookConfig::load(temp.path()).unwrap();
        assert_eq!(config, PostbookConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.json"), r#"{"indent": 2}"#).unwrap();

        let config = PostbookConfig::load(temp.path()).unwrap();
        assert_eq!(config.indent, 2);
        assert_eq!(config.preview_width, 30);
        assert_eq!(config.docs_dir, PathBuf::from("docs"));
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested");

        let config = PostbookConfig {
            docs_dir: PathBuf::from("/srv/notes"),
            ..PostbookConfig::default()
        };
        config.save(&dir).unwrap();

        let loaded = PostbookConfig::load(&dir).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = PostbookConfig::default();
        config.set("indent", "2").unwrap();
        config.set("backups_dir", "old").unwrap();

        assert_eq!(config.get("indent").unwrap(), "2");
        assert_eq!(config.backups_dir, PathBuf::from("old"));
        assert_eq!(config.list_all().len(), 4);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = PostbookConfig::default();
        assert!(matches!(
            config.set("indent", "wide").unwrap_err(),
            PostbookError::InvalidInput(_)
        ));
        assert!(config.set("color", "red").is_err());
        assert!(config.set("docs_dir", "  ").is_err());
        assert!(config.get("color").is_err());
        assert_eq!(config, PostbookConfig::default());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.json"), "indent = 2").unwrap();
        assert!(matches!(
            PostbookConfig::load(temp.path()).unwrap_err(),
            PostbookError::Serialization(_)
        ));
    }
}

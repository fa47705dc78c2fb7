//! Locating, listing and creating documents.
//!
//! A workspace is a directory of `*.json` documents. Each document's backups go
//! to a `backups/` directory beside it, which listings skip.

use crate::api::PostbookApi;
use crate::config::PostbookConfig;
use crate::error::{PostbookError, Result};
use crate::store::fs::FsBackend;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "POSTBOOK_CONFIG_DIR";

/// What a freshly created document contains.
pub const STARTER_DOCUMENT: &str = r#"{
    "basics": {
        "name": "Основы",
        "id": "basics",
        "content": {}
    }
}
"#;

/// Directory holding `config.json`: `$POSTBOOK_CONFIG_DIR`, else the
/// platform config dir.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "postbook", "postbook").map(|dirs| dirs.config_dir().to_path_buf())
}

#[derive(Debug, Clone)]
pub struct Workspace {
    docs_dir: PathBuf,
    config: PostbookConfig,
}

impl Workspace {
    /// Relative `docs_dir` values resolve against `cwd`.
    pub fn new(cwd: &Path, config: PostbookConfig, docs_override: Option<PathBuf>) -> Self {
        let docs_dir = docs_override.unwrap_or_else(|| config.docs_dir.clone());
        let docs_dir = if docs_dir.is_absolute() {
            docs_dir
        } else {
            cwd.join(docs_dir)
        };
        Self { docs_dir, config }
    }

    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    pub fn config(&self) -> &PostbookConfig {
        &self.config
    }

    /// Document file names, sorted. A missing docs directory is empty.
    pub fn list_documents(&self) -> Result<Vec<String>> {
        if !self.docs_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.docs_dir).map_err(PostbookError::Io)? {
            let path = entry.map_err(PostbookError::Io)?.path();
            if !path.is_file() {
                continue;
            }
            let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
            if let (true, Some(name)) = (is_json, path.file_name().and_then(|n| n.to_str())) {
                if !name.starts_with('.') {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Maps a document name (`rust` or `rust.json`) to its path.
    /// Anything with a path separator is taken as a path as-is.
    pub fn resolve(&self, name: &str) -> PathBuf {
        let candidate = Path::new(name);
        if candidate.components().count() > 1 || candidate.is_absolute() {
            return candidate.to_path_buf();
        }
        self.docs_dir.join(with_json_ext(name))
    }

    /// Writes the starter document under `name`. Never overwrites.
    pub fn create_document(&self, name: &str) -> Result<PathBuf> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PostbookError::InvalidInput(
                "document name cannot be empty".to_string(),
            ));
        }
        if name.starts_with('.') || name.contains(['/', '\\']) {
            return Err(PostbookError::InvalidInput(format!(
                "'{}' is not a plain file name",
                name
            )));
        }

        let path = self.docs_dir.join(with_json_ext(name));
        if path.exists() {
            return Err(PostbookError::DuplicateKey(format!(
                "document {}",
                path.display()
            )));
        }

        fs::create_dir_all(&self.docs_dir).map_err(PostbookError::Io)?;
        fs::write(&path, STARTER_DOCUMENT).map_err(PostbookError::Io)?;
        debug!(path = %path.display(), "created document");
        Ok(path)
    }

    pub fn backend_for(&self, path: impl Into<PathBuf>) -> FsBackend {
        FsBackend::new(path).with_backups_dir(&self.config.backups_dir)
    }

    /// Opens the named document as a store.
    pub fn open(&self, name: &str) -> Result<PostbookApi<FsBackend>> {
        let path = self.resolve(name);
        Ok(PostbookApi::open(self.backend_for(path))?.with_indent(self.config.indent))
    }
}

fn with_json_ext(name: &str) -> String {
    if name.ends_with(".json") {
        name.to_string()
    } else {
        format!("{}.json", name)
    }
}

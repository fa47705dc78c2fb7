use super::{StorageBackend, BACKUP_TIMESTAMP_FORMAT};
use crate::error::{PostbookError, Result};
use chrono::Local;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_BACKUPS_DIR: &str = "backups";

pub struct FsBackend {
    path: PathBuf,
    backups_dir: PathBuf,
}

impl FsBackend {
    /// Backend for the document at `path`, with backups in a `backups`
    /// directory next to it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backups_dir = parent_dir(&path).join(DEFAULT_BACKUPS_DIR);
        Self { path, backups_dir }
    }

    /// Relative directories are resolved against the document's directory.
    pub fn with_backups_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.backups_dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            parent_dir(&self.path).join(dir)
        };
        self
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(PostbookError::Io)?;
        }
        Ok(())
    }

    /// First free `<timestamp>.json`, falling back to `<timestamp>_N.json`.
    fn next_backup_path(&self) -> PathBuf {
        let stamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let candidate = self.backups_dir.join(format!("{}.json", stamp));
        if !candidate.exists() {
            return candidate;
        }
        (1..)
            .map(|n| self.backups_dir.join(format!("{}_{}.json", stamp, n)))
            .find(|p| !p.exists())
            .unwrap_or(candidate)
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

impl StorageBackend for FsBackend {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PostbookError::Io(e)),
        }
    }

    fn backup(&self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        self.ensure_dir(&self.backups_dir)?;

        let backup_path = self.next_backup_path();
        fs::copy(&self.path, &backup_path).map_err(PostbookError::Io)?;
        debug!(backup = %backup_path.display(), "backed up document");
        Ok(Some(backup_path))
    }

    fn write(&self, text: &str) -> Result<()> {
        let dir = parent_dir(&self.path);
        self.ensure_dir(&dir)?;

        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let tmp_path = dir.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));

        // Atomic write: the target is either the old or the new document
        if let Err(e) = fs::write(&tmp_path, text) {
            let _ = fs::remove_file(&tmp_path);
            return Err(PostbookError::Io(e));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(PostbookError::Io(e));
        }
        debug!(path = %self.path.display(), bytes = text.len(), "wrote document");
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}

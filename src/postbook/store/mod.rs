//! # Storage Layer
//!
//! Raw persistence for a single document. The [`StorageBackend`] trait covers the
//! "how" of storage (filesystem vs memory) while [`crate::api::PostbookApi`] owns
//! the "what": the parsed document, validation and the commit cycle.
//!
//! ## Commit Cycle
//!
//! Every mutation the API commits goes through the same three steps:
//!
//! 1. **Backup**: if a document is already persisted, copy it aside unmodified.
//! 2. **Write**: replace the document text atomically.
//! 3. **Reload**: read the text back and parse it again, so the in-memory
//!    document is always exactly what is on disk.
//!
//! ## Implementations
//!
//! - [`fs::FsBackend`]: A JSON file on disk with a sibling `backups/` directory.
//! - [`memory::MemBackend`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! docs/
//! ├── python.json                       # A document
//! ├── rust.json
//! └── backups/
//!     ├── 2024-03-01_12-30-05.json      # Copy taken before a write
//!     └── 2024-03-01_12-30-05_1.json    # Second backup within the same second
//! ```

use crate::error::Result;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Format of the backup file stem: local time, second resolution.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Abstract interface for raw document I/O.
pub trait StorageBackend {
    /// Read the persisted document text.
    /// Returns Ok(None) if nothing has been persisted yet.
    fn read(&self) -> Result<Option<String>>;

    /// Copy the persisted document aside, unmodified.
    /// Returns the backup location, or None when there was nothing to copy.
    fn backup(&self) -> Result<Option<PathBuf>>;

    /// Replace the persisted document.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, text: &str) -> Result<()>;

    /// Where the document lives. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}

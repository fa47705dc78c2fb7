use super::{StorageBackend, BACKUP_TIMESTAMP_FORMAT};
use crate::error::{PostbookError, Result};
use chrono::Local;
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since postbook is single-threaded,
/// which lets the `StorageBackend` trait use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    text: RefCell<Option<String>>,
    backups: RefCell<Vec<(PathBuf, String)>>,
    writes: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
    simulate_backup_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `text`, as if loaded from disk.
    pub fn with_text(text: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.text.borrow_mut() = Some(text.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn set_simulate_backup_error(&self, simulate: bool) {
        *self.simulate_backup_error.borrow_mut() = simulate;
    }

    pub fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }

    pub fn backups(&self) -> Vec<(PathBuf, String)> {
        self.backups.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.text.borrow().clone())
    }

    fn backup(&self) -> Result<Option<PathBuf>> {
        if *self.simulate_backup_error.borrow() {
            return Err(PostbookError::Io(std::io::Error::other(
                "simulated backup failure",
            )));
        }
        let Some(current) = self.text.borrow().clone() else {
            return Ok(None);
        };
        let mut backups = self.backups.borrow_mut();
        let stamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT);
        let path = PathBuf::from(format!("memory://backups/{}_{}.json", stamp, backups.len()));
        backups.push((path.clone(), current));
        Ok(Some(path))
    }

    fn write(&self, text: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(PostbookError::Io(std::io::Error::other(
                "simulated write failure",
            )));
        }
        *self.text.borrow_mut() = Some(text.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://document.json")
    }
}

// --- Test Fixtures ---

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use crate::model::{CodeBlock, Document, Parameter, Post, Section};

    /// The document every new workspace file starts with.
    pub const STARTER_JSON: &str = r#"{"basics":{"name":"Основы","id":"basics","content":{}}}"#;

    pub struct DocumentFixture {
        pub document: Document,
    }

    impl Default for DocumentFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl DocumentFixture {
        pub fn new() -> Self {
            Self {
                document: Document::new(),
            }
        }

        pub fn starter() -> Self {
            Self {
                document: Document::from_json(STARTER_JSON).unwrap(),
            }
        }

        pub fn with_section(mut self, name: &str, id: &str) -> Self {
            self.document
                .sections
                .insert(id.to_string(), Section::new(name, id));
            self
        }

        pub fn with_post(mut self, section_id: &str, title: &str, post_id: &str) -> Self {
            let section = self.document.section_mut(section_id).unwrap();
            section.content.insert(
                post_id.to_string(),
                Post::new(title, post_id, format!("About {}", title)),
            );
            self
        }

        pub fn with_parameters(mut self, section_id: &str, post_id: &str, names: &[&str]) -> Self {
            let post = self.document.post_mut(section_id, post_id).unwrap();
            for name in names {
                post.parameters
                    .push(Parameter::new(*name, format!("{} parameter", name)));
            }
            self
        }

        pub fn with_code(mut self, section_id: &str, post_id: &str, languages: &[&str]) -> Self {
            let post = self.document.post_mut(section_id, post_id).unwrap();
            for lang in languages {
                post.code
                    .push(CodeBlock::new(*lang, format!("// {} sample", lang)));
            }
            self
        }

        pub fn into_backend(self) -> MemBackend {
            MemBackend::with_text(self.document.to_json(4).unwrap())
        }
    }
}

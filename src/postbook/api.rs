//! # API Facade
//!
//! [`PostbookApi`] is the document store: it owns the in-memory [`Document`] and
//! mediates every read and write, whatever UI sits on top of it.
//!
//! ## Commit Discipline
//!
//! A mutating call:
//! 1. clones the current document into a draft,
//! 2. runs the command (`commands/*.rs`) against the draft,
//! 3. backs up the persisted file, writes the draft, and reloads it.
//!
//! The live document is only replaced by what was read back from storage. If the
//! command rejects its input, or any I/O step fails, the live document is exactly
//! what it was before the call.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `PostbookApi<FsBackend>`
//! - Testing: `PostbookApi<MemBackend>`

use crate::commands;
use crate::error::{PostbookError, Result};
use crate::model::{Document, Post, Section};
use crate::store::StorageBackend;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const DEFAULT_INDENT: usize = 4;

pub struct PostbookApi<B: StorageBackend> {
    backend: B,
    document: Document,
    indent: usize,
}

impl<B: StorageBackend> PostbookApi<B> {
    /// Loads and validates the persisted document.
    pub fn open(backend: B) -> Result<Self> {
        let document = load(&backend)?;
        debug!(
            location = %backend.location().display(),
            sections = document.sections.len(),
            posts = document.post_count(),
            "loaded document"
        );
        Ok(Self {
            backend,
            document,
            indent: DEFAULT_INDENT,
        })
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    // --- Reads ---

    pub fn get_section(&self, id: &str) -> Result<&Section> {
        self.document.section(id)
    }

    pub fn get_post(&self, section_id: &str, post_id: &str) -> Result<&Post> {
        self.document.post(section_id, post_id)
    }

    pub fn list_sections(&self) -> Vec<ListEntry> {
        commands::list::sections(&self.document)
    }

    pub fn list_posts(&self, section_id: &str) -> Result<Vec<ListEntry>> {
        commands::list::posts(&self.document, section_id)
    }

    pub fn list_parameters(&self, section_id: &str, post_id: &str) -> Result<Vec<ListEntry>> {
        commands::list::parameters(&self.document, section_id, post_id)
    }

    pub fn list_code(&self, section_id: &str, post_id: &str) -> Result<Vec<ListEntry>> {
        commands::list::code(&self.document, section_id, post_id)
    }

    // --- Sections ---

    pub fn create_section(&mut self, name: &str, id: &str) -> Result<CmdResult> {
        self.apply(|doc| commands::section::create(doc, name, id))
    }

    pub fn edit_section(&mut self, id: &str, new_name: &str, new_id: &str) -> Result<CmdResult> {
        self.apply(|doc| commands::section::edit(doc, id, new_name, new_id))
    }

    pub fn delete_section(&mut self, id: &str) -> Result<CmdResult> {
        self.apply(|doc| commands::section::delete(doc, id))
    }

    // --- Posts ---

    pub fn create_post(
        &mut self,
        section_id: &str,
        title: &str,
        post_id: &str,
        explanation: &str,
    ) -> Result<CmdResult> {
        self.apply(|doc| commands::post::create(doc, section_id, title, post_id, explanation))
    }

    pub fn edit_post(
        &mut self,
        section_id: &str,
        post_id: &str,
        new_title: &str,
        new_id: &str,
        new_explanation: &str,
    ) -> Result<CmdResult> {
        self.apply(|doc| {
            commands::post::edit(doc, section_id, post_id, new_title, new_id, new_explanation)
        })
    }

    pub fn delete_post(&mut self, section_id: &str, post_id: &str) -> Result<CmdResult> {
        self.apply(|doc| commands::post::delete(doc, section_id, post_id))
    }

    // --- Parameters & code ---

    pub fn create_parameter(
        &mut self,
        section_id: &str,
        post_id: &str,
        name: &str,
        description: &str,
    ) -> Result<CmdResult> {
        self.apply(|doc| commands::parameter::create(doc, section_id, post_id, name, description))
    }

    pub fn delete_parameter(
        &mut self,
        section_id: &str,
        post_id: &str,
        index: usize,
    ) -> Result<CmdResult> {
        self.apply(|doc| commands::parameter::delete(doc, section_id, post_id, index))
    }

    pub fn create_code(
        &mut self,
        section_id: &str,
        post_id: &str,
        language: &str,
        content: &str,
    ) -> Result<CmdResult> {
        self.apply(|doc| commands::code::create(doc, section_id, post_id, language, content))
    }

    pub fn delete_code(
        &mut self,
        section_id: &str,
        post_id: &str,
        index: usize,
    ) -> Result<CmdResult> {
        self.apply(|doc| commands::code::delete(doc, section_id, post_id, index))
    }

    /// Persists the current document without changing it.
    pub fn save(&mut self) -> Result<Option<PathBuf>> {
        let draft = self.document.clone();
        self.commit(&draft)
    }

    fn apply<F>(&mut self, command: F) -> Result<CmdResult>
    where
        F: FnOnce(&mut Document) -> Result<CmdResult>,
    {
        let mut draft = self.document.clone();
        let mut result = command(&mut draft)?;

        let backup = self.commit(&draft)?;
        if let Some(path) = &backup {
            result.add_message(CmdMessage::info(format!(
                "Backup created: {}",
                path.display()
            )));
        }
        result.backup = backup;

        for message in &result.messages {
            info!("{}", message.content);
        }
        Ok(result)
    }

    fn commit(&mut self, draft: &Document) -> Result<Option<PathBuf>> {
        let text = draft.to_json(self.indent)?;
        let backup = self.backend.backup()?;
        self.backend.write(&text)?;
        self.document = load(&self.backend)?;
        Ok(backup)
    }
}

fn load<B: StorageBackend>(backend: &B) -> Result<Document> {
    let location = backend.location();
    let text = backend.read()?.ok_or_else(|| {
        PostbookError::NotFound(format!("document {}", location.display()))
    })?;
    Document::from_json(&text).inspect_err(|e| {
        warn!(location = %location.display(), error = %e, "rejected document");
    })
}

pub use crate::commands::{CmdMessage, CmdResult, ListEntry, MessageLevel};

//! # Command Layer
//!
//! Pure business logic over a [`Document`](crate::model::Document). Every command
//! validates its input completely before touching the document, so an `Err` always
//! means the document was left exactly as it was.
//!
//! Commands know nothing about files or backups; [`crate::api::PostbookApi`] runs
//! them against a draft copy and commits the draft only when they succeed.

use crate::model::{Post, Section};
use std::path::PathBuf;

pub mod code;
pub mod list;
pub mod parameter;
pub mod post;
pub mod section;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_section: Option<Section>,
    pub affected_post: Option<Post>,
    pub backup: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.affected_section = Some(section);
        self
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.affected_post = Some(post);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}

/// One numbered line of a menu listing. Positions start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub position: usize,
    pub label: String,
    pub detail: String,
}

use crate::error::{PostbookError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub description: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub language: String,
    pub content: String,
}

impl CodeBlock {
    pub fn new(language: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub id: String,
    pub explanation: String,
    pub parameters: Vec<Parameter>,
    pub code: Vec<CodeBlock>,
    /// Heading shown above the parameter list in the post view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters_title: Option<String>,
    // Keys we don't model are carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    pub fn new(
        title: impl Into<String>,
        id: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            explanation: explanation.into(),
            parameters: Vec::new(),
            code: Vec::new(),
            parameters_title: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub id: String,
    pub content: IndexMap<String, Post>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Section {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            content: IndexMap::new(),
            extra: Map::new(),
        }
    }

    pub fn post(&self, post_id: &str) -> Result<&Post> {
        self.content
            .get(post_id)
            .ok_or_else(|| PostbookError::post_not_found(&self.id, post_id))
    }

    pub fn post_mut(&mut self, post_id: &str) -> Result<&mut Post> {
        let section_id = self.id.clone();
        self.content
            .get_mut(post_id)
            .ok_or_else(|| PostbookError::post_not_found(&section_id, post_id))
    }
}

/// One persisted document: sections keyed by their id, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub sections: IndexMap<String, Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a document. Shape errors and ids that disagree
    /// with their keys are reported as `MalformedDocument`.
    pub fn from_json(text: &str) -> Result<Self> {
        let doc: Document = serde_json::from_str(text)
            .map_err(|e| PostbookError::MalformedDocument(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Pretty JSON with `indent` spaces per level and a trailing newline.
    /// Non-ASCII text is written as-is.
    pub fn to_json(&self, indent: usize) -> Result<String> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(|e| PostbookError::MalformedDocument(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        for (key, section) in &self.sections {
            if &section.id != key {
                return Err(PostbookError::MalformedDocument(format!(
                    "section stored under '{}' has id '{}'",
                    key, section.id
                )));
            }
            for (post_key, post) in &section.content {
                if &post.id != post_key {
                    return Err(PostbookError::MalformedDocument(format!(
                        "post stored under '{}/{}' has id '{}'",
                        key, post_key, post.id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn contains_section(&self, id: &str) -> bool {
        self.sections.contains_key(id)
    }

    pub fn section(&self, id: &str) -> Result<&Section> {
        self.sections
            .get(id)
            .ok_or_else(|| PostbookError::section_not_found(id))
    }

    pub fn section_mut(&mut self, id: &str) -> Result<&mut Section> {
        self.sections
            .get_mut(id)
            .ok_or_else(|| PostbookError::section_not_found(id))
    }

    pub fn post(&self, section_id: &str, post_id: &str) -> Result<&Post> {
        self.section(section_id)?.post(post_id)
    }

    pub fn post_mut(&mut self, section_id: &str, post_id: &str) -> Result<&mut Post> {
        self.section_mut(section_id)?.post_mut(post_id)
    }

    pub fn post_count(&self) -> usize {
        self.sections.values().map(|s| s.content.len()).sum()
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostbookError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    DuplicateKey(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Index {index} is out of range ({len} items in {what})")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        what: String,
    },

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PostbookError {
    pub fn section_not_found(id: &str) -> Self {
        Self::NotFound(format!("section '{}'", id))
    }

    pub fn post_not_found(section_id: &str, post_id: &str) -> Self {
        Self::NotFound(format!("post '{}' in section '{}'", post_id, section_id))
    }

    /// True for the kinds a caller can recover from by asking for new input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::DuplicateKey(_)
                | Self::InvalidInput(_)
                | Self::IndexOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PostbookError>;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PostbookError, Result};
use crate::ids::require_text;
use crate::model::{CodeBlock, Document};

pub fn create(
    doc: &mut Document,
    section_id: &str,
    post_id: &str,
    language: &str,
    content: &str,
) -> Result<CmdResult> {
    let post = doc.post_mut(section_id, post_id)?;
    require_text("code language", language)?;
    require_text("code content", content)?;

    post.code.push(CodeBlock::new(language, content));

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Code block added to {}/{}: {}",
            section_id, post_id, language
        )))
        .with_post(post.clone()))
}

pub fn delete(
    doc: &mut Document,
    section_id: &str,
    post_id: &str,
    index: usize,
) -> Result<CmdResult> {
    let post = doc.post_mut(section_id, post_id)?;
    if index >= post.code.len() {
        return Err(PostbookError::IndexOutOfRange {
            index,
            len: post.code.len(),
            what: format!("code blocks of {}/{}", section_id, post_id),
        });
    }

    let removed = post.code.remove(index);

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Code block removed from {}/{}: {}",
            section_id, post_id, removed.language
        )))
        .with_post(post.clone()))
}

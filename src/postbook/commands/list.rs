use crate::commands::ListEntry;
use crate::error::Result;
use crate::model::Document;

fn numbered<I>(items: I) -> Vec<ListEntry>
where
    I: IntoIterator<Item = (String, String)>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(i, (label, detail))| ListEntry {
            position: i + 1,
            label,
            detail,
        })
        .collect()
}

/// Sections as `(name, id)`.
pub fn sections(doc: &Document) -> Vec<ListEntry> {
    numbered(
        doc.sections
            .values()
            .map(|s| (s.name.clone(), s.id.clone())),
    )
}

/// Posts of a section as `(title, id)`.
pub fn posts(doc: &Document, section_id: &str) -> Result<Vec<ListEntry>> {
    let section = doc.section(section_id)?;
    Ok(numbered(
        section
            .content
            .values()
            .map(|p| (p.title.clone(), p.id.clone())),
    ))
}

/// Parameters as `(name, description)`, in stored order.
pub fn parameters(doc: &Document, section_id: &str, post_id: &str) -> Result<Vec<ListEntry>> {
    let post = doc.post(section_id, post_id)?;
    Ok(numbered(
        post.parameters
            .iter()
            .map(|p| (p.name.clone(), p.description.clone())),
    ))
}

/// Code blocks as `(language, content)`, in stored order.
pub fn code(doc: &Document, section_id: &str, post_id: &str) -> Result<Vec<ListEntry>> {
    let post = doc.post(section_id, post_id)?;
    Ok(numbered(
        post.code
            .iter()
            .map(|c| (c.language.clone(), c.content.clone())),
    ))
}

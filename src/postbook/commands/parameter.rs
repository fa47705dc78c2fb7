use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PostbookError, Result};
use crate::ids::require_text;
use crate::model::{Document, Parameter};

pub fn create(
    doc: &mut Document,
    section_id: &str,
    post_id: &str,
    name: &str,
    description: &str,
) -> Result<CmdResult> {
    let post = doc.post_mut(section_id, post_id)?;
    require_text("parameter name", name)?;
    require_text("parameter description", description)?;

    post.parameters.push(Parameter::new(name, description));

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Parameter added to {}/{}: {}",
            section_id, post_id, name
        )))
        .with_post(post.clone()))
}

/// Removes the parameter at `index` (0-based); later parameters shift down.
pub fn delete(
    doc: &mut Document,
    section_id: &str,
    post_id: &str,
    index: usize,
) -> Result<CmdResult> {
    let post = doc.post_mut(section_id, post_id)?;
    if index >= post.parameters.len() {
        return Err(PostbookError::IndexOutOfRange {
            index,
            len: post.parameters.len(),
            what: format!("parameters of {}/{}", section_id, post_id),
        });
    }

    let removed = post.parameters.remove(index);

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Parameter removed from {}/{}: {}",
            section_id, post_id, removed.name
        )))
        .with_post(post.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::DocumentFixture;

    fn names(doc: &Document) -> Vec<String> {
        doc.post("basics", "intro")
            .unwrap()
            .parameters
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    #[test]
    fn appends_in_order() {
        let mut doc = DocumentFixture::starter()
            .with_post("basics", "Intro", "intro")
            .document;
        for name in ["a", "b", "c"] {
            create(&mut doc, "basics", "intro", name, "desc").unwrap();
        }
        assert_eq!(names(&doc), ["a", "b", "c"]);
    }

    #[test]
    fn delete_middle_keeps_order() {
        let mut doc = DocumentFixture::starter()
            .with_post("basics", "Intro", "intro")
            .with_parameters("basics", "intro", &["a", "b", "c"])
            .document;

        delete(&mut doc, "basics", "intro", 1).unwrap();
        assert_eq!(names(&doc), ["a", "c"]);
    }

    #[test]
    fn delete_from_empty_list_is_out_of_range() {
        let mut doc = DocumentFixture::starter()
            .with_post("basics", "Intro", "intro")
            .document;

        let err = delete(&mut doc, "basics", "intro", 0).unwrap_err();
        assert!(matches!(
            err,
            PostbookError::IndexOutOfRange { index: 0, len: 0, .. }
        ));
    }

    #[test]
    fn delete_past_end_leaves_list_alone() {
        let mut doc = DocumentFixture::starter()
            .with_post("basics", "Intro", "intro")
            .with_parameters("basics", "intro", &["a", "b"])
            .document;

        assert!(delete(&mut doc, "basics", "intro", 2).is_err());
        assert_eq!(names(&doc), ["a", "b"]);
    }

    #[test]
    fn unknown_post_is_not_found() {
        let mut doc = DocumentFixture::starter().document;
        let err = create(&mut doc, "basics", "ghost", "x", "y").unwrap_err();
        assert!(matches!(err, PostbookError::NotFound(_)));
        let err = delete(&mut doc, "nowhere", "ghost", 0).unwrap_err();
        assert!(matches!(err, PostbookError::NotFound(_)));
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut doc = DocumentFixture::starter()
            .with_post("basics", "Intro", "intro")
            .document;
        assert!(create(&mut doc, "basics", "intro", "", "desc").is_err());
        assert!(create(&mut doc, "basics", "intro", "x", " ").is_err());
        assert!(names(&doc).is_empty());
    }
}

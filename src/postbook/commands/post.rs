use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PostbookError, Result};
use crate::ids::{require_text, validate_id};
use crate::model::{Document, Post};

pub fn create(
    doc: &mut Document,
    section_id: &str,
    title: &str,
    post_id: &str,
    explanation: &str,
) -> Result<CmdResult> {
    let section = doc.section_mut(section_id)?;
    require_text("post title", title)?;
    require_text("post id", post_id)?;
    require_text("post explanation", explanation)?;
    validate_id(post_id)?;
    if section.content.contains_key(post_id) {
        return Err(PostbookError::DuplicateKey(format!(
            "post '{}' in section '{}'",
            post_id, section_id
        )));
    }

    let post = Post::new(title, post_id, explanation);
    section.content.insert(post_id.to_string(), post.clone());

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Post created ({}/{}): {}",
            section_id, post_id, title
        )))
        .with_post(post))
}

pub fn edit(
    doc: &mut Document,
    section_id: &str,
    post_id: &str,
    new_title: &str,
    new_id: &str,
    new_explanation: &str,
) -> Result<CmdResult> {
    let section = doc.section_mut(section_id)?;
    section.post(post_id)?;
    require_text("post title", new_title)?;
    require_text("post explanation", new_explanation)?;
    if new_id != post_id {
        validate_id(new_id)?;
        if section.content.contains_key(new_id) {
            return Err(PostbookError::DuplicateKey(format!(
                "post '{}' in section '{}'",
                new_id, section_id
            )));
        }
    }

    let (index, _, mut post) = section
        .content
        .shift_remove_full(post_id)
        .ok_or_else(|| PostbookError::post_not_found(section_id, post_id))?;
    post.title = new_title.to_string();
    post.id = new_id.to_string();
    post.explanation = new_explanation.to_string();
    section.content.shift_insert(index, new_id.to_string(), post.clone());

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Post updated ({}/{}): {}",
            section_id, new_id, new_title
        )))
        .with_post(post))
}

pub fn delete(doc: &mut Document, section_id: &str, post_id: &str) -> Result<CmdResult> {
    let section = doc.section_mut(section_id)?;
    let post = section
        .content
        .shift_remove(post_id)
        .ok_or_else(|| PostbookError::post_not_found(section_id, post_id))?;

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Post deleted ({}/{}): {}",
            section_id, post_id, post.title
        )))
        .with_post(post))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::DocumentFixture;

    #[test]
    fn creates_post_with_empty_lists() {
        let mut doc = DocumentFixture::starter().document;
        create(&mut doc, "basics", "Intro", "intro", "desc").unwrap();

        let post = doc.post("basics", "intro").unwrap();
        assert_eq!(post.title, "Intro");
        assert_eq!(post.explanation, "desc");
        assert!(post.parameters.is_empty());
        assert!(post.code.is_empty());
    }

    #[test]
    fn create_requires_every_field() {
        let mut doc = DocumentFixture::starter().document;
        let before = doc.clone();

        for (title, id, explanation) in [("", "intro", "d"), ("T", "", "d"), ("T", "intro", "")] {
            let err = create(&mut doc, "basics", title, id, explanation).unwrap_err();
            assert!(matches!(err, PostbookError::InvalidInput(_)));
        }
        assert_eq!(doc, before);
    }

    #[test]
    fn create_in_missing_section() {
        let mut doc = Document::new();
        let err = create(&mut doc, "basics", "Intro", "intro", "desc").unwrap_err();
        assert!(matches!(err, PostbookError::NotFound(_)));
    }

    #[test]
    fn create_rejects_existing_post_id() {
        let mut doc = DocumentFixture::starter()
            .with_post("basics", "Intro", "intro")
            .with_parameters("basics", "intro", &["x"])
            .document;

        let err = create(&mut doc, "basics", "Again", "intro", "desc").unwrap_err();
        assert!(matches!(err, PostbookError::DuplicateKey(_)));
        assert_eq!(doc.post("basics", "intro").unwrap().parameters.len(), 1);
    }

    #[test]
    fn edit_rekeys_post_and_keeps_lists() {
        let mut doc = DocumentFixture::starter()
            .with_post("basics", "Intro", "intro")
            .with_parameters("basics", "intro", &["x", "y"])
            .document;

        edit(&mut doc, "basics", "intro", "Start", "start", "new text").unwrap();

        assert!(doc.post("basics", "intro").is_err());
        let post = doc.post("basics", "start").unwrap();
        assert_eq!(post.id, "start");
        assert_eq!(post.title, "Start");
        assert_eq!(post.explanation, "new text");
        assert_eq!(post.parameters.len(), 2);
    }

    #[test]
    fn edit_keeps_position_in_section() {
        let mut doc = DocumentFixture::starter()
            .with_post("basics", "Zeta", "zeta")
            .with_post("basics", "Alpha", "alpha")
            .document;

        edit(&mut doc, "basics", "zeta", "Omega", "omega", "x").unwrap();

        let keys: Vec<_> = doc.section("basics").unwrap().content.keys().cloned().collect();
        assert_eq!(keys, ["omega", "alpha"]);
    }

    #[test]
    fn edit_refuses_collision() {
        let mut doc = DocumentFixture::starter()
            .with_post("basics", "Intro", "intro")
            .with_post("basics", "Loops", "loops")
            .document;
        let before = doc.clone();

        let err = edit(&mut doc, "basics", "intro", "Intro", "loops", "x").unwrap_err();
        assert!(matches!(err, PostbookError::DuplicateKey(_)));
        assert_eq!(doc, before);
    }

    #[test]
    fn edit_missing_post() {
        let mut doc = DocumentFixture::starter().document;
        let err = edit(&mut doc, "basics", "ghost", "T", "ghost", "E").unwrap_err();
        assert!(matches!(err, PostbookError::NotFound(_)));
    }

    #[test]
    fn delete_removes_only_that_post() {
        let mut doc = DocumentFixture::starter()
            .with_post("basics", "Intro", "intro")
            .with_post("basics", "Loops", "loops")
            .document;

        let result = delete(&mut doc, "basics", "intro").unwrap();
        assert_eq!(result.affected_post.unwrap().title, "Intro");
        let section = doc.section("basics").unwrap();
        assert_eq!(section.content.len(), 1);
        assert!(section.content.contains_key("loops"));
    }

    #[test]
    fn delete_missing_post() {
        let mut doc = DocumentFixture::starter().document;
        assert!(matches!(
            delete(&mut doc, "basics", "intro").unwrap_err(),
            PostbookError::NotFound(_)
        ));
    }
}

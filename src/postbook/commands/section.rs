use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PostbookError, Result};
use crate::ids::{require_text, validate_id};
use crate::model::{Document, Section};

pub fn create(doc: &mut Document, name: &str, id: &str) -> Result<CmdResult> {
    require_text("section name", name)?;
    validate_id(id)?;
    if doc.contains_section(id) {
        return Err(PostbookError::DuplicateKey(format!("section '{}'", id)));
    }

    let section = Section::new(name, id);
    doc.sections.insert(id.to_string(), section.clone());

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Section created ({}): {}",
            id, name
        )))
        .with_section(section))
}

/// Renames a section and, when `new_id` differs, moves it to the new key.
pub fn edit(doc: &mut Document, id: &str, new_name: &str, new_id: &str) -> Result<CmdResult> {
    doc.section(id)?;
    require_text("section name", new_name)?;
    // Ids that predate the id rules stay usable as long as they don't change
    if new_id != id {
        validate_id(new_id)?;
        if doc.contains_section(new_id) {
            return Err(PostbookError::DuplicateKey(format!("section '{}'", new_id)));
        }
    }

    let (index, _, mut section) = doc
        .sections
        .shift_remove_full(id)
        .ok_or_else(|| PostbookError::section_not_found(id))?;
    section.name = new_name.to_string();
    section.id = new_id.to_string();
    doc.sections.shift_insert(index, new_id.to_string(), section.clone());

    let message = if new_id != id {
        format!("Section updated ({} -> {}): {}", id, new_id, new_name)
    } else {
        format!("Section updated ({}): {}", id, new_name)
    };
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(message))
        .with_section(section))
}

pub fn delete(doc: &mut Document, id: &str) -> Result<CmdResult> {
    let section = doc
        .sections
        .shift_remove(id)
        .ok_or_else(|| PostbookError::section_not_found(id))?;

    let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
        "Section deleted ({}): {}",
        id, section.name
    )));
    if !section.content.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} post(s) removed with it",
            section.content.len()
        )));
    }
    Ok(result.with_section(section))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::DocumentFixture;

    #[test]
    fn creates_empty_section() {
        let mut doc = Document::new();
        let result = create(&mut doc, "Basics", "basics").unwrap();

        let section = doc.section("basics").unwrap();
        assert_eq!(section.name, "Basics");
        assert_eq!(section.id, "basics");
        assert!(section.content.is_empty());
        assert_eq!(result.affected_section.unwrap().id, "basics");
    }

    #[test]
    fn rejects_duplicate_id() {
        let mut doc = DocumentFixture::starter().document;
        let before = doc.clone();

        let err = create(&mut doc, "Other", "basics").unwrap_err();
        assert!(matches!(err, PostbookError::DuplicateKey(_)));
        assert_eq!(doc, before);
    }

    #[test]
    fn rejects_malformed_id() {
        let mut doc = Document::new();
        let err = create(&mut doc, "Basics", "1st").unwrap_err();
        assert!(matches!(err, PostbookError::InvalidInput(_)));
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn rejects_empty_name() {
        let mut doc = Document::new();
        assert!(create(&mut doc, "", "basics").is_err());
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn edit_in_place_keeps_key() {
        let mut doc = DocumentFixture::starter().document;
        edit(&mut doc, "basics", "Basics", "basics").unwrap();
        assert_eq!(doc.section("basics").unwrap().name, "Basics");
        assert_eq!(doc.sections.len(), 1);
    }

    #[test]
    fn edit_rekeys_and_keeps_posts() {
        let mut doc = DocumentFixture::starter()
            .with_post("basics", "Intro", "intro")
            .document;

        edit(&mut doc, "basics", "Core", "core").unwrap();

        assert!(doc.section("basics").is_err());
        let moved = doc.section("core").unwrap();
        assert_eq!(moved.id, "core");
        assert_eq!(moved.name, "Core");
        assert!(moved.content.contains_key("intro"));
    }

    #[test]
    fn edit_keeps_position() {
        let mut doc = DocumentFixture::new()
            .with_section("Variables", "variables")
            .with_section("Basics", "basics")
            .with_section("Loops", "loops")
            .document;

        edit(&mut doc, "basics", "Core", "core").unwrap();

        let keys: Vec<_> = doc.sections.keys().map(String::as_str).collect();
        assert_eq!(keys, ["variables", "core", "loops"]);
    }

    #[test]
    fn edit_allows_unchanged_legacy_id() {
        let mut doc =
            Document::from_json(r#"{"my-notes":{"name":"Notes","id":"my-notes","content":{}}}"#)
                .unwrap();

        edit(&mut doc, "my-notes", "Renamed", "my-notes").unwrap();
        assert_eq!(doc.section("my-notes").unwrap().name, "Renamed");

        let err = edit(&mut doc, "my-notes", "Renamed", "still-bad").unwrap_err();
        assert!(matches!(err, PostbookError::InvalidInput(_)));
    }

    #[test]
    fn edit_refuses_to_overwrite_another_section() {
        let mut doc = DocumentFixture::starter()
            .with_section("Advanced", "advanced")
            .document;
        let before = doc.clone();

        let err = edit(&mut doc, "basics", "Basics", "advanced").unwrap_err();
        assert!(matches!(err, PostbookError::DuplicateKey(_)));
        assert_eq!(doc, before);
    }

    #[test]
    fn edit_missing_section() {
        let mut doc = Document::new();
        let err = edit(&mut doc, "nope", "Name", "nope").unwrap_err();
        assert!(matches!(err, PostbookError::NotFound(_)));
    }

    #[test]
    fn delete_reports_removed_posts() {
        let mut doc = DocumentFixture::starter()
            .with_post("basics", "Intro", "intro")
            .document;

        let result = delete(&mut doc, "basics").unwrap();
        assert!(doc.sections.is_empty());
        assert_eq!(result.messages.len(), 2);
    }

    #[test]
    fn delete_missing_section() {
        let mut doc = Document::new();
        assert!(matches!(
            delete(&mut doc, "basics").unwrap_err(),
            PostbookError::NotFound(_)
        ));
    }
}

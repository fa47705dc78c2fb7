//! The interactive editor.
//!
//! Every screen is a numbered menu: a number picks an option, a blank line (or
//! `0`) goes back one level, and end of input unwinds all the way out. Store
//! errors the user can fix are shown and the prompt is asked again; anything
//! else ends the session with an error.

use super::render::{format_messages, preview, render_menu, render_post, MenuLine};
use console::Term;
use postbook::api::{CmdMessage, CmdResult, PostbookApi};
use postbook::error::Result;
use postbook::store::StorageBackend;
use postbook::workspace::Workspace;
use std::io::BufRead;

pub trait Console {
    fn clear(&mut self);
    fn show(&mut self, text: &str);
    /// One line of input without its newline; None at end of input.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

pub struct TermConsole {
    term: Term,
}

impl TermConsole {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TermConsole {
    fn clear(&mut self) {
        if self.term.is_term() {
            let _ = self.term.clear_screen();
        }
    }

    fn show(&mut self, text: &str) {
        let _ = self.term.write_str(text);
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        let _ = self.term.write_str(prompt);
        let _ = self.term.flush();
        if self.term.is_term() {
            return self.term.read_line().ok();
        }
        // Piped input: console's read_line only works on a tty
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Back,
    Pick(usize),
}

struct Session<'a, C: Console> {
    console: &'a mut C,
    notices: Vec<CmdMessage>,
    preview_width: usize,
    eof: bool,
}

impl<'a, C: Console> Session<'a, C> {
    fn new(console: &'a mut C, preview_width: usize) -> Self {
        Self {
            console,
            notices: Vec::new(),
            preview_width,
            eof: false,
        }
    }

    fn read(&mut self, prompt: &str) -> Option<String> {
        if self.eof {
            return None;
        }
        let line = self.console.read_line(prompt);
        if line.is_none() {
            self.eof = true;
        }
        line
    }

    /// Trimmed input; None for a blank line or end of input.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        self.read(prompt)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn choose(&mut self, title: &str, lines: &[MenuLine]) -> Choice {
        self.console.clear();
        if !self.notices.is_empty() {
            let notices = format_messages(&std::mem::take(&mut self.notices));
            self.console.show(&notices);
        }
        self.console.show(&render_menu(title, lines, true));

        loop {
            let Some(input) = self.read("Option: ") else {
                return Choice::Back;
            };
            let input = input.trim();
            if input.is_empty() || input == "0" {
                return Choice::Back;
            }
            match input.parse::<usize>() {
                Ok(n) if (1..=lines.len()).contains(&n) => return Choice::Pick(n),
                _ => {
                    let hint = CmdMessage::warning(format!(
                        "Enter a number from 1 to {}, or leave blank to go back.",
                        lines.len()
                    ));
                    self.console.show(&format_messages(&[hint]));
                }
            }
        }
    }

    fn confirm(&mut self, question: &str) -> bool {
        let options = [MenuLine::plain("Yes"), MenuLine::plain("No")];
        self.choose(question, &options) == Choice::Pick(1)
    }

    /// Queues the outcome for the next screen. Ok(false) on a user error.
    fn commit(&mut self, result: Result<CmdResult>) -> Result<bool> {
        match result {
            Ok(result) => {
                self.notices.extend(result.messages);
                Ok(true)
            }
            Err(e) if e.is_user_error() => {
                self.notices.push(CmdMessage::error(e.to_string()));
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Like `commit`, but a user error is shown right away so the caller can
    /// prompt again.
    fn attempt(&mut self, result: Result<CmdResult>) -> Result<bool> {
        match result {
            Err(e) if e.is_user_error() => {
                let text = format_messages(&[CmdMessage::error(e.to_string())]);
                self.console.show(&text);
                Ok(false)
            }
            other => self.commit(other),
        }
    }

    fn add_section<B: StorageBackend>(&mut self, api: &mut PostbookApi<B>) -> Result<()> {
        let Some(name) = self.ask("Section name: ") else {
            return Ok(());
        };
        while let Some(id) = self.ask("Section id: ") {
            if self.attempt(api.create_section(&name, &id))? {
                break;
            }
        }
        Ok(())
    }

    /// Returns the section's id after the edit.
    fn edit_section<B: StorageBackend>(
        &mut self,
        api: &mut PostbookApi<B>,
        id: &str,
    ) -> Result<String> {
        let current_name = api.get_section(id)?.name.clone();
        let name = self
            .ask(&format!("New name (blank keeps \"{}\"): ", current_name))
            .unwrap_or(current_name);
        loop {
            let new_id = self
                .ask(&format!("New id (blank keeps \"{}\"): ", id))
                .unwrap_or_else(|| id.to_string());
            // Input ran out mid-edit: nothing was confirmed
            if self.eof {
                return Ok(id.to_string());
            }
            if self.attempt(api.edit_section(id, &name, &new_id))? {
                return Ok(new_id);
            }
        }
    }

    fn add_post<B: StorageBackend>(
        &mut self,
        api: &mut PostbookApi<B>,
        section_id: &str,
    ) -> Result<()> {
        let Some(title) = self.ask("Post title: ") else {
            return Ok(());
        };
        let Some(post_id) = self.ask("Post id: ") else {
            return Ok(());
        };
        let Some(explanation) = self.ask("Post explanation: ") else {
            return Ok(());
        };
        self.commit(api.create_post(section_id, &title, &post_id, &explanation))?;
        Ok(())
    }

    fn edit_post<B: StorageBackend>(
        &mut self,
        api: &mut PostbookApi<B>,
        section_id: &str,
        post_id: &str,
    ) -> Result<String> {
        let post = api.get_post(section_id, post_id)?;
        let (title, explanation) = (post.title.clone(), post.explanation.clone());

        let title = self
            .ask(&format!("New title (blank keeps \"{}\"): ", title))
            .unwrap_or(title);
        let new_id = self
            .ask(&format!("New id (blank keeps \"{}\"): ", post_id))
            .unwrap_or_else(|| post_id.to_string());
        let explanation = self
            .ask("New explanation (blank keeps the current one): ")
            .unwrap_or(explanation);
        if self.eof {
            return Ok(post_id.to_string());
        }

        if self.commit(api.edit_post(section_id, post_id, &title, &new_id, &explanation))? {
            Ok(new_id)
        } else {
            Ok(post_id.to_string())
        }
    }
}

/// Picks a document from the workspace, or creates one. None means "quit".
pub fn choose_document<C: Console>(
    console: &mut C,
    workspace: &Workspace,
) -> Result<Option<String>> {
    let mut s = Session::new(console, 0);
    loop {
        let docs = workspace.list_documents()?;
        let mut lines = vec![MenuLine::plain("Create a new document")];
        lines.extend(docs.iter().map(MenuLine::plain));

        match s.choose("Choose a document:", &lines) {
            Choice::Back => return Ok(None),
            Choice::Pick(1) => {
                let Some(name) = s.ask("New document name (without .json): ") else {
                    continue;
                };
                match workspace.create_document(&name) {
                    Ok(_) => return Ok(Some(name)),
                    Err(e) if e.is_user_error() => {
                        s.notices.push(CmdMessage::error(e.to_string()));
                    }
                    Err(e) => return Err(e),
                }
            }
            Choice::Pick(n) => return Ok(Some(docs[n - 2].clone())),
        }
    }
}

/// The section list: the top of the editor for one document.
pub fn edit_document<C: Console, B: StorageBackend>(
    console: &mut C,
    api: &mut PostbookApi<B>,
    preview_width: usize,
) -> Result<()> {
    let mut s = Session::new(console, preview_width);
    loop {
        let sections = api.list_sections();
        let mut lines = vec![MenuLine::plain("Add section")];
        lines.extend(sections.iter().map(|e| MenuLine::new(&e.label, &e.detail)));

        match s.choose("Choose a section:", &lines) {
            Choice::Back => return Ok(()),
            Choice::Pick(1) => s.add_section(api)?,
            Choice::Pick(n) => section_menu(&mut s, api, sections[n - 2].detail.clone())?,
        }
    }
}

fn section_menu<C: Console, B: StorageBackend>(
    s: &mut Session<'_, C>,
    api: &mut PostbookApi<B>,
    mut id: String,
) -> Result<()> {
    let actions = [
        MenuLine::plain("Manage posts"),
        MenuLine::plain("Edit section"),
        MenuLine::plain("Delete section"),
    ];
    loop {
        let name = match api.get_section(&id) {
            Ok(section) => section.name.clone(),
            Err(_) => return Ok(()),
        };
        match s.choose(&name, &actions) {
            Choice::Pick(1) => posts_menu(s, api, &id)?,
            Choice::Pick(2) => id = s.edit_section(api, &id)?,
            Choice::Pick(3) => {
                if s.confirm(&format!("Delete section {}?", name))
                    && s.commit(api.delete_section(&id))?
                {
                    return Ok(());
                }
            }
            _ => return Ok(()),
        }
    }
}

fn posts_menu<C: Console, B: StorageBackend>(
    s: &mut Session<'_, C>,
    api: &mut PostbookApi<B>,
    section_id: &str,
) -> Result<()> {
    loop {
        let posts = api.list_posts(section_id)?;
        let mut lines = vec![MenuLine::plain("Add post")];
        lines.extend(posts.iter().map(|e| MenuLine::new(&e.label, &e.detail)));

        match s.choose("Choose a post:", &lines) {
            Choice::Back => return Ok(()),
            Choice::Pick(1) => s.add_post(api, section_id)?,
            Choice::Pick(n) => post_menu(s, api, section_id, posts[n - 2].detail.clone())?,
        }
    }
}

fn post_menu<C: Console, B: StorageBackend>(
    s: &mut Session<'_, C>,
    api: &mut PostbookApi<B>,
    section_id: &str,
    mut post_id: String,
) -> Result<()> {
    let actions = [
        MenuLine::plain("View"),
        MenuLine::plain("Edit"),
        MenuLine::plain("Parameters"),
        MenuLine::plain("Code"),
        MenuLine::plain("Delete post"),
    ];
    loop {
        let title = match api.get_post(section_id, &post_id) {
            Ok(post) => post.title.clone(),
            Err(_) => return Ok(()),
        };
        match s.choose(&title, &actions) {
            Choice::Pick(1) => {
                let view = render_post(api.get_post(section_id, &post_id)?);
                s.console.clear();
                s.console.show(&view);
                s.read("Press Enter to go back");
            }
            Choice::Pick(2) => post_id = s.edit_post(api, section_id, &post_id)?,
            Choice::Pick(3) => list_menu(s, api, section_id, &post_id, ListKind::Parameters)?,
            Choice::Pick(4) => list_menu(s, api, section_id, &post_id, ListKind::Code)?,
            Choice::Pick(5) => {
                if s.confirm(&format!("Delete post {}?", title))
                    && s.commit(api.delete_post(section_id, &post_id))?
                {
                    return Ok(());
                }
            }
            _ => return Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ListKind {
    Parameters,
    Code,
}

/// Parameters and code blocks share one screen: add, or pick one to delete.
fn list_menu<C: Console, B: StorageBackend>(
    s: &mut Session<'_, C>,
    api: &mut PostbookApi<B>,
    section_id: &str,
    post_id: &str,
    kind: ListKind,
) -> Result<()> {
    loop {
        let (entries, title, add_label) = match kind {
            ListKind::Parameters => (
                api.list_parameters(section_id, post_id)?,
                "Choose a parameter:",
                "Add parameter",
            ),
            ListKind::Code => (
                api.list_code(section_id, post_id)?,
                "Choose a code block:",
                "Add code block",
            ),
        };
        let mut lines = vec![MenuLine::plain(add_label)];
        lines.extend(entries.iter().map(|e| {
            MenuLine::plain(format!(
                "{}: {}",
                e.label,
                preview(&e.detail, s.preview_width)
            ))
        }));

        match s.choose(title, &lines) {
            Choice::Back => return Ok(()),
            Choice::Pick(1) => {
                let (first, second) = match kind {
                    ListKind::Parameters => ("Parameter name: ", "Parameter description: "),
                    ListKind::Code => ("Language: ", "Code (use \\n for new lines): "),
                };
                let Some(a) = s.ask(first) else { continue };
                let Some(b) = s.ask(second) else { continue };
                let result = match kind {
                    ListKind::Parameters => api.create_parameter(section_id, post_id, &a, &b),
                    ListKind::Code => {
                        api.create_code(section_id, post_id, &a, &b.replace("\\n", "\n"))
                    }
                };
                s.commit(result)?;
            }
            Choice::Pick(n) => {
                let index = n - 2;
                let entry = &entries[index];
                if s.confirm(&format!("Delete {}?", entry.label)) {
                    let result = match kind {
                        ListKind::Parameters => api.delete_parameter(section_id, post_id, index),
                        ListKind::Code => api.delete_code(section_id, post_id, index),
                    };
                    s.commit(result)?;
                }
            }
        }
    }
}

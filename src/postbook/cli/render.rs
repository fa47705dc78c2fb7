//! # Rendering Module
//!
//! Box-drawn frames for menus and posts. Layout math (width, wrapping,
//! truncation) is done on plain text with Unicode-aware widths; styles are
//! applied only after a cell has been padded, so escape codes never count
//! towards a column.

use super::styles::{CODE_LANGUAGE, FRAME_DETAIL, FRAME_TITLE, POST_TITLE};
use colored::Colorize;
use postbook::api::{CmdMessage, MessageLevel};
use postbook::model::Post;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Outer width of the post view, borders included.
pub const POST_WIDTH: usize = 80;
const POST_INNER: usize = POST_WIDTH - 4;
const COLUMN_GAP: usize = 2;
const DEFAULT_PARAMETERS_TITLE: &str = "Parameters:";

/// One menu row: a label and an optional right-hand detail column.
#[derive(Debug, Clone)]
pub struct MenuLine {
    pub label: String,
    pub detail: String,
}

impl MenuLine {
    pub fn new(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
        }
    }

    pub fn plain(label: impl Into<String>) -> Self {
        Self::new(label, "")
    }
}

pub fn format_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// Single-line preview: newlines folded to spaces, then truncated.
pub fn preview(s: &str, max_width: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    truncate_to_width(&flat, max_width)
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn center_to_width(s: &str, width: usize) -> String {
    let total = width.saturating_sub(s.width());
    let left = total / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(total - left))
}

/// Greedy word wrap on whitespace. Words wider than `width` get a line of
/// their own, truncated.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = truncate_to_width(word, width);
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = truncate_to_width(word, width);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// A numbered (or plain) menu in a double-line frame.
pub fn render_menu(title: &str, lines: &[MenuLine], numbered: bool) -> String {
    let label_width = lines.iter().map(|l| l.label.width()).max().unwrap_or(0);
    let detail_width = lines.iter().map(|l| l.detail.width()).max().unwrap_or(0);
    let number_width = if numbered {
        format!("{}. ", lines.len()).width()
    } else {
        0
    };

    let mut content_width = number_width + label_width;
    if detail_width > 0 {
        content_width += COLUMN_GAP + detail_width;
    }
    let inner = content_width.max(title.width());
    let border = "═".repeat(inner + 2);

    let mut out = String::new();
    out.push_str(&format!("╔{}╗\n", border));
    out.push_str(&format!(
        "║ {} ║\n",
        FRAME_TITLE.apply_to(center_to_width(title, inner))
    ));
    out.push_str(&format!("║{}║\n", "─".repeat(inner + 2)));

    for (i, line) in lines.iter().enumerate() {
        let number = if numbered {
            pad_to_width(&format!("{}. ", i + 1), number_width)
        } else {
            String::new()
        };
        let cell_width = inner - number_width;
        let row = if line.detail.is_empty() {
            pad_to_width(&line.label, cell_width)
        } else {
            let label = pad_to_width(&line.label, label_width + COLUMN_GAP);
            let detail = pad_to_width(&line.detail, cell_width - label.width());
            format!("{}{}", label, FRAME_DETAIL.apply_to(detail))
        };
        out.push_str(&format!("║ {}{} ║\n", number, row));
    }

    out.push_str(&format!("╚{}╝\n", border));
    out
}

fn framed(line: &str) -> String {
    format!("║ {} ║", pad_to_width(line, POST_INNER))
}

/// `left` flush left, `right` flush right, within the post frame.
fn two_columns(left: &str, right: &str, right_styled: String) -> String {
    let room = POST_INNER.saturating_sub(right.width() + 1);
    let left = pad_to_width(
        &truncate_to_width(left, room),
        POST_INNER.saturating_sub(right.width()),
    );
    format!("║ {}{} ║", left, right_styled)
}

fn blank() -> String {
    format!("║{}║", " ".repeat(POST_WIDTH - 2))
}

/// The full view of one post.
pub fn render_post(post: &Post) -> String {
    let mut lines = Vec::new();
    lines.push(format!("╔{}╗", "═".repeat(POST_WIDTH - 2)));

    let id_text = format!("ID: {}", post.id);
    let title = truncate_to_width(&post.title, POST_INNER.saturating_sub(id_text.width() + 1));
    let padded_title = pad_to_width(&title, POST_INNER.saturating_sub(id_text.width()));
    lines.push(format!(
        "║ {}{} ║",
        POST_TITLE.apply_to(padded_title),
        id_text
    ));
    lines.push(format!("║{}║", "═".repeat(POST_WIDTH - 2)));

    if !post.explanation.trim().is_empty() {
        for paragraph in post.explanation.lines() {
            lines.extend(wrap(paragraph, POST_INNER).iter().map(|l| framed(l)));
        }
        lines.push(blank());
    }

    let parameters_title = post
        .parameters_title
        .as_deref()
        .unwrap_or(DEFAULT_PARAMETERS_TITLE);
    lines.push(framed(parameters_title));
    for param in &post.parameters {
        let text = format!("• {}: {}", param.name, param.description);
        for (i, line) in wrap(&text, POST_INNER - 4).iter().enumerate() {
            let indent = if i == 0 { "  " } else { "    " };
            lines.push(framed(&format!("{}{}", indent, line)));
        }
    }
    if !post.parameters.is_empty() {
        lines.push(blank());
    }

    for (i, block) in post.code.iter().enumerate() {
        lines.push(format!("║{}║", "─".repeat(POST_WIDTH - 2)));
        let mut code_lines = block.content.lines();
        let first = code_lines.next().unwrap_or("");
        lines.push(two_columns(
            first,
            &block.language,
            CODE_LANGUAGE.apply_to(&block.language).to_string(),
        ));
        for code_line in code_lines {
            lines.push(framed(&truncate_to_width(code_line, POST_INNER)));
        }
        if i + 1 < post.code.len() {
            lines.push(blank());
        }
    }

    lines.push(format!("╚{}╝", "═".repeat(POST_WIDTH - 2)));
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

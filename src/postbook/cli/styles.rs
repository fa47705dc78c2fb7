use console::Style;
use once_cell::sync::Lazy;

pub static FRAME_TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static FRAME_DETAIL: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static POST_TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold().cyan());
pub static CODE_LANGUAGE: Lazy<Style> = Lazy::new(|| Style::new().yellow());

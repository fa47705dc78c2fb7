//! # CLI Layer
//!
//! One possible client of the postbook library, and the only code that knows
//! about the terminal.
//!
//! - `setup`: clap definitions
//! - `commands`: `run()`, context setup and one handler per subcommand
//! - `menu`: the interactive editor loop, written against the [`menu::Console`]
//!   trait so it can be driven by scripted input in tests
//! - `render`: frames for menus and posts
//! - `styles`: terminal styles

mod commands;
mod menu;
mod render;
mod setup;
mod styles;

pub use commands::run;

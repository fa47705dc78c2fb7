use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "postbook", bin_name = "postbook", version)]
#[command(
    about = "Edit sectioned JSON post documents, with a backup before every write",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Documents directory (defaults to the configured docs dir)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub docs: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the documents in the docs directory
    #[command(alias = "ls", display_order = 1)]
    Docs,

    /// Create a new document from the starter template
    #[command(alias = "n", display_order = 2)]
    New {
        /// File name, with or without .json
        name: String,
    },

    /// Open the interactive editor (default command)
    #[command(alias = "e", display_order = 3)]
    Edit {
        /// Document to open; prompts for one if omitted
        document: Option<String>,
    },

    /// Print one post
    #[command(alias = "v", display_order = 4)]
    Show {
        /// Document name or path
        document: String,

        /// Section id
        section: String,

        /// Post id
        post: String,
    },

    /// Load a document and report whether it is well formed
    #[command(display_order = 5)]
    Check {
        /// Document name or path
        document: String,
    },

    /// Show or change settings
    #[command(display_order = 6)]
    Config {
        /// Setting to show or change; omit to list all
        key: Option<String>,

        /// New value for the setting
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_edit() {
        let cli = Cli::parse_from(["postbook"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_show() {
        let cli = Cli::parse_from(["postbook", "v", "rust", "basics", "intro"]);
        match cli.command {
            Some(Commands::Show {
                document,
                section,
                post,
            }) => {
                assert_eq!(document, "rust");
                assert_eq!(section, "basics");
                assert_eq!(post, "intro");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_config_set() {
        let cli = Cli::parse_from(["postbook", "config", "indent", "2"]);
        match cli.command {
            Some(Commands::Config { key, value }) => {
                assert_eq!(key.as_deref(), Some("indent"));
                assert_eq!(value.as_deref(), Some("2"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn docs_flag_is_global() {
        let cli = Cli::parse_from(["postbook", "new", "rust", "--docs", "/tmp/d"]);
        assert_eq!(cli.docs, Some(PathBuf::from("/tmp/d")));
    }
}

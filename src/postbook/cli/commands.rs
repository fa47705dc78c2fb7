use super::menu::{self, TermConsole};
use super::render::render_post;
use super::setup::{Cli, Commands};
use clap::Parser;
use colored::Colorize;
use postbook::config::PostbookConfig;
use postbook::error::{PostbookError, Result};
use postbook::workspace::{config_dir, Workspace};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let workspace = init_workspace(&cli)?;

    match cli.command {
        Some(Commands::Docs) => handle_docs(&workspace),
        Some(Commands::New { name }) => handle_new(&workspace, &name),
        Some(Commands::Edit { document }) => handle_edit(&workspace, document),
        Some(Commands::Show {
            document,
            section,
            post,
        }) => handle_show(&workspace, &document, &section, &post),
        Some(Commands::Check { document }) => handle_check(&workspace, &document),
        Some(Commands::Config { key, value }) => handle_config(&workspace, key, value),
        None => handle_edit(&workspace, None),
    }
}

/// Logs go to stderr: `warn` by default, `debug` with `--verbose`, or
/// whatever `RUST_LOG` asks for.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_workspace(cli: &Cli) -> Result<Workspace> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = match config_dir() {
        Some(dir) => PostbookConfig::load(&dir).unwrap_or_else(|e| {
            warn!(dir = %dir.display(), error = %e, "ignoring unreadable config");
            PostbookConfig::default()
        }),
        None => PostbookConfig::default(),
    };

    Ok(Workspace::new(&cwd, config, cli.docs.clone()))
}

fn handle_docs(workspace: &Workspace) -> Result<()> {
    let docs = workspace.list_documents()?;
    if docs.is_empty() {
        println!(
            "{}",
            format!("No documents in {}", workspace.docs_dir().display()).dimmed()
        );
        return Ok(());
    }
    for doc in docs {
        println!("{}", doc);
    }
    Ok(())
}

fn handle_new(workspace: &Workspace, name: &str) -> Result<()> {
    let path = workspace.create_document(name)?;
    println!("{}", format!("Created {}", path.display()).green());
    Ok(())
}

fn handle_edit(workspace: &Workspace, document: Option<String>) -> Result<()> {
    let mut console = TermConsole::new();
    let name = match document {
        Some(name) => name,
        None => match menu::choose_document(&mut console, workspace)? {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    let mut api = workspace.open(&name)?;
    let preview_width = workspace.config().preview_width;
    menu::edit_document(&mut console, &mut api, preview_width)
}

fn handle_show(workspace: &Workspace, document: &str, section: &str, post: &str) -> Result<()> {
    let api = workspace.open(document)?;
    let post = api.get_post(section, post)?;
    print!("{}", render_post(post));
    Ok(())
}

fn handle_check(workspace: &Workspace, document: &str) -> Result<()> {
    let api = workspace.open(document)?;
    let doc = api.document();
    println!(
        "{}",
        format!(
            "{}: {} section(s), {} post(s)",
            api.location().display(),
            doc.sections.len(),
            doc.post_count()
        )
        .green()
    );
    Ok(())
}

fn handle_config(workspace: &Workspace, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = workspace.config().clone();
    match (key, value) {
        (None, _) => {
            for (k, v) in config.list_all() {
                println!("{} = {}", k, v);
            }
        }
        (Some(key), None) => println!("{}", config.get(&key)?),
        (Some(key), Some(value)) => {
            let dir = config_dir().ok_or_else(|| {
                PostbookError::InvalidInput("no config directory on this system".to_string())
            })?;
            config.set(&key, &value)?;
            config.save(&dir)?;
            println!("{}", format!("{} = {}", key, config.get(&key)?).green());
        }
    }
    Ok(())
}

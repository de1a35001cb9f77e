// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use anyhow::Result;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use likedex::{Category, Config};

mod cli;
use cli::{
    CommandContext, DetailsCommand, LikesCommand, OutputFormat, PopularCommand, SearchCommand,
};

fn cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default())
}

#[derive(Parser)]
#[command(name = "likedex")]
#[command(about = "Browse movies, TV shows and anime and keep a list of the ones you like")]
#[command(version)]
#[command(styles = cargo_style())]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging to file (likedex_debug.log)
    #[arg(long, global = true)]
    debug_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show popular titles (all categories if none given)
    Popular {
        /// Category (movie, show, anime)
        category: Option<String>,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Search movies, TV shows and anime
    Search {
        /// Search query
        query: String,
        /// Only search one category (movie, show, anime)
        #[arg(short = 't', long)]
        r#type: Option<String>,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show details for one title
    Details {
        /// Category (movie, show, anime)
        category: String,
        /// Catalog id
        id: u64,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Like a title, or unlike it if it is already liked
    Like {
        /// Category (movie, show, anime)
        category: String,
        /// Catalog id
        id: u64,
        /// Title to store (looked up from the catalog when omitted)
        #[arg(long)]
        title: Option<String>,
    },

    /// List liked titles
    Liked {
        /// Category (movie, show, anime)
        category: Option<String>,
        /// Fuzzy filter on titles
        #[arg(long)]
        filter: Option<String>,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Remove every liked title in a category
    Clear {
        /// Category (movie, show, anime)
        category: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive configuration
    Setup,
}

fn init_logging(cli: &Cli) -> Result<()> {
    if cli.debug_log {
        let file = File::create("likedex_debug.log")?;
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(file_layer)
            .with(
                EnvFilter::from_default_env()
                    .add_directive("likedex=debug".parse()?)
                    .add_directive("hyper_util=error".parse()?),
            )
            .init();
    } else if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive(tracing::Level::DEBUG.into())
                    .add_directive("hyper_util=error".parse()?),
            )
            .init();
    } else if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("hyper_util=error".parse()?),
            )
            .init();
    }
    Ok(())
}

fn parse_category(value: Option<&str>) -> Result<Option<Category>> {
    value.map(Category::from_str).transpose()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config_path = Config::config_path();
    let mut config = Config::load_or_default(&config_path);
    config.apply_env();

    if likedex::setup::should_run_setup(&config_path, &config) {
        match &cli.command {
            Commands::Setup => {}
            Commands::Popular { .. } | Commands::Search { .. } => {
                if std::io::stdin().is_terminal() {
                    config = likedex::setup::interactive_setup(config).await?;
                } else {
                    eprintln!(
                        "No TMDB API key configured; only anime results will be shown. Run 'likedex setup'."
                    );
                }
            }
            _ => {}
        }
    }

    let show_progress = std::io::stderr().is_terminal();

    match cli.command {
        Commands::Setup => {
            likedex::setup::interactive_setup(config).await?;
        }

        Commands::Popular {
            category,
            page,
            format,
        } => {
            let cmd = PopularCommand {
                category: parse_category(category.as_deref())?,
                page,
                format: OutputFormat::from_str(&format)?,
            };
            cmd.execute(CommandContext::new(&config, show_progress)?)
                .await?;
        }

        Commands::Search {
            query,
            r#type,
            page,
            format,
        } => {
            let cmd = SearchCommand {
                query,
                category: parse_category(r#type.as_deref())?,
                page,
                format: OutputFormat::from_str(&format)?,
            };
            cmd.execute(CommandContext::new(&config, show_progress)?)
                .await?;
        }

        Commands::Details {
            category,
            id,
            format,
        } => {
            let cmd = DetailsCommand {
                category: Category::from_str(&category)?,
                id,
                format: OutputFormat::from_str(&format)?,
            };
            cmd.execute(CommandContext::new(&config, show_progress)?)
                .await?;
        }

        Commands::Like {
            category,
            id,
            title,
        } => {
            let cmd = LikesCommand::Toggle {
                category: Category::from_str(&category)?,
                id,
                title,
            };
            cmd.execute(CommandContext::new(&config, show_progress)?)
                .await?;
        }

        Commands::Liked {
            category,
            filter,
            format,
        } => {
            let cmd = LikesCommand::List {
                category: parse_category(category.as_deref())?,
                filter,
                format: OutputFormat::from_str(&format)?,
            };
            cmd.execute(CommandContext::new(&config, show_progress)?)
                .await?;
        }

        Commands::Clear { category, yes } => {
            let cmd = LikesCommand::Clear {
                category: Category::from_str(&category)?,
                yes,
            };
            cmd.execute(CommandContext::new(&config, show_progress)?)
                .await?;
        }
    }

    Ok(())
}

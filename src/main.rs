//! folio - a Markdown blog front-end with a scroll-synced table of contents.

mod cli;
mod config;
mod core;
mod embed;
mod logger;
mod markdown;
mod page;
mod post;
mod toc;
mod utils;
mod view;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    logger::set_verbose(cli.verbose);

    let config = init_config(SiteConfig::load(&cli)?);

    match &cli.command {
        Commands::Serve { .. } => cli::serve::bind_server()?.run(),
        Commands::List { tag, json } => cli::list::list_posts(&config, tag.as_deref(), *json),
        Commands::Show { slug, page } => cli::show::show_post(&config, slug, *page),
        Commands::Toc { slug, json } => cli::toc::print_toc(&config, slug, *json),
        Commands::Check { slugs } => cli::check::check_posts(&config, slugs),
    }
}

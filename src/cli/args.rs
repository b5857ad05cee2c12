//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Markdown blog front-end: post list, post detail, and a scroll-synced table of contents
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: folio.toml)
    #[arg(short = 'C', long, global = true, default_value = crate::config::DEFAULT_CONFIG, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Post document directory (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub documents: Option<PathBuf>,

    /// Post content location: a directory or an http(s):// base URL
    #[arg(short, long, global = true)]
    pub objects: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve the blog with live table-of-contents tracking
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable the live channel (scroll tracking, in-page navigation, clock)
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        live: Option<bool>,
    },

    /// List posts, optionally filtered by tag
    #[command(visible_alias = "l")]
    List {
        /// Only posts carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Print JSON instead of a table
        #[arg(short, long)]
        json: bool,
    },

    /// Render one post to HTML on stdout
    Show {
        /// Post slug
        slug: String,

        /// Wrap the fragment in the full detail page
        #[arg(short, long)]
        page: bool,
    },

    /// Print a post's table of contents
    #[command(visible_alias = "t")]
    Toc {
        /// Post slug
        slug: String,

        /// Print JSON instead of an indented outline
        #[arg(short, long)]
        json: bool,
    },

    /// Fetch and render posts, reporting failures and heading id collisions
    #[command(visible_alias = "c")]
    Check {
        /// Slugs to check. If omitted, checks every post.
        #[arg(value_name = "SLUG")]
        slugs: Vec<String>,
    },
}

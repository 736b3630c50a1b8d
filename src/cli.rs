//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// wikiview renderer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Config file (default: wiki.toml, built-in defaults if absent)
    #[arg(short = 'C', long, default_value = "wiki.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render a JSON value tree to HTML
    Render {
        /// JSON file, `-` for stdin
        input: PathBuf,

        /// Mapping key the value sits under (e.g. `schema`)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Build an Atom feed from a JSON array of entries
    Feed {
        /// JSON file, `-` for stdin
        input: PathBuf,

        /// Scheme and host of the site, e.g. https://wiki.example.com
        #[arg(long)]
        host: String,

        /// Page title for a single collection feed (site-wide feed if omitted)
        #[arg(short, long)]
        title: Option<String>,

        /// Compute the body but print only its length, like a HEAD request
        #[arg(long)]
        head: bool,
    },

    /// Print the template context for a request as JSON
    Context {
        /// Full request URL
        url: String,

        /// User-Agent header
        #[arg(short = 'a', long)]
        user_agent: Option<String>,

        /// Email of the signed-in user
        #[arg(short, long)]
        user: Option<String>,

        /// Userpage title preference of the signed-in user
        #[arg(long, requires = "user")]
        userpage: Option<String>,
    },
}

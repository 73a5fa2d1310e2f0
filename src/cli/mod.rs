//! CLI module - Command-line interface for anidex
//!
//! Every command prints its result as JSON on stdout; logs go to stderr.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// anidex - Anime catalog lookup
/// Scrapes the catalog site and cross-references titles with `AniList`
#[derive(Parser)]
#[command(name = "anidex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default search paths
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog and enrich the results
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
        /// Result page
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Show the airing schedule for a day
    Schedule {
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show trending and top lists from the home page
    Discover,

    /// List episodes of an anime
    #[command(alias = "eps")]
    Episodes {
        /// Catalog URL, slug or numeric ID
        anime: String,
    },

    /// Show the detail page of an anime with its metadata
    #[command(alias = "i")]
    Info {
        /// Catalog URL or slug
        anime: String,
    },

    /// Group the seasons and parts of a franchise
    #[command(alias = "f")]
    Franchise {
        /// Title of any entry in the franchise
        #[arg(required = true)]
        title: Vec<String>,
        /// Require the candidate title to start with the base title's words
        #[arg(long)]
        strict: bool,
    },

    /// Look up metadata by title or `AniList` ID
    #[command(alias = "m")]
    Metadata {
        /// Title, or an `AniList` ID when all digits
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Resolve a catalog URL or slug into its IDs
    Resolve {
        /// Catalog URL, watch URL or slug
        input: String,
    },

    /// Create default config file
    Init,
}

//! CLI module - Command-line interface for the catalog service
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// C-Drama - short drama catalog service
#[derive(Parser)]
#[command(name = "cdrama")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Load and validate the config, then print the effective values
    CheckConfig,

    /// Show how many records each collection holds
    Stats,
}

pub use commands::*;

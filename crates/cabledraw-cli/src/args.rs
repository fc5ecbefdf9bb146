//! Command-line argument definitions for the Cabledraw CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration and
//! template selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Cabledraw layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input cable design (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output geometry file (JSON)
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to a template pack manifest; its page replaces the configured one
    #[arg(short, long)]
    pub template: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

//! CLI argument parsing module for nuspec-meta

use crate::domain::SemVer;
use crate::error::ConfigError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse a version for `--check`
fn parse_version(s: &str) -> Result<SemVer, String> {
    SemVer::parse(s).map_err(|e| e.to_string())
}

/// NuGet version ranges and nuspec metadata
#[derive(Parser, Debug, Clone)]
#[command(
    name = "nuspec-meta",
    version,
    about = "NuGet version ranges and nuspec metadata"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    // Output options
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Parse a NuGet version range and print its canonical form
    Range {
        /// Range text, e.g. "[1.0,2.0)"; empty means any version
        #[arg(allow_hyphen_values = true)]
        text: String,

        /// Test whether this version satisfies the range
        #[arg(long, value_parser = parse_version)]
        check: Option<SemVer>,
    },

    /// Load a .nuspec manifest and print its metadata
    Nuspec {
        /// Path to the manifest; a missing file is reported as "all references"
        path: PathBuf,
    },
}

impl CliArgs {
    /// Reject option combinations that have no sensible output
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.json && self.quiet {
            return Err(ConfigError::ConflictingOptions {
                message: "--json and --quiet cannot be used together".to_string(),
            });
        }
        Ok(())
    }
}

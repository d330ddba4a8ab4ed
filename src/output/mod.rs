//! Output formatting for range and manifest reports
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::{SemVer, VersionRequirement};
use crate::manifest::Nuspec;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(format: OutputFormat, verbosity: Verbosity) -> Self {
        Self {
            format,
            verbosity,
            color: true,
        }
    }

    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, verbose: bool, quiet: bool, no_color: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            verbosity,
            color: !no_color,
        }
    }
}

/// Outcome of testing one version against a requirement
#[derive(Debug, Clone)]
pub struct RangeCheck {
    pub version: SemVer,
    pub satisfied: bool,
}

/// A parsed range, as reported by the `range` command
#[derive(Debug, Clone)]
pub struct RangeReport {
    /// Text as given on the command line
    pub input: String,
    pub requirement: VersionRequirement,
    pub check: Option<RangeCheck>,
}

impl RangeReport {
    /// Create a report without a version check
    pub fn new(input: impl Into<String>, requirement: VersionRequirement) -> Self {
        Self {
            input: input.into(),
            requirement,
            check: None,
        }
    }

    /// Test `version` against the requirement and record the outcome
    pub fn with_check(mut self, version: SemVer) -> Self {
        let satisfied = self.requirement.is_in_range(&version);
        self.check = Some(RangeCheck { version, satisfied });
        self
    }

    /// False only when a check ran and failed
    pub fn passed(&self) -> bool {
        self.check.as_ref().map_or(true, |check| check.satisfied)
    }
}

/// A loaded manifest, as reported by the `nuspec` command
#[derive(Debug, Clone)]
pub struct NuspecReport {
    pub path: PathBuf,
    /// False when the file was absent and the sentinel manifest was used
    pub found: bool,
    pub nuspec: Nuspec,
}

impl NuspecReport {
    pub fn new(path: impl AsRef<Path>, found: bool, nuspec: Nuspec) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            found,
            nuspec,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write a range report
    fn format_range(&self, report: &RangeReport, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format and write a manifest report
    fn format_nuspec(&self, report: &NuspecReport, writer: &mut dyn Write)
        -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_verbosity_default() {
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert!(config.color);
    }

    #[test]
    fn test_output_config_from_cli_json() {
        let config = OutputConfig::from_cli(true, false, false, false);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_output_config_from_cli_verbose() {
        let config = OutputConfig::from_cli(false, true, false, false);
        assert_eq!(config.verbosity, Verbosity::Verbose);
    }

    #[test]
    fn test_output_config_from_cli_quiet_wins() {
        let config = OutputConfig::from_cli(false, true, true, false);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_output_config_from_cli_no_color() {
        let config = OutputConfig::from_cli(false, false, false, true);
        assert!(!config.color);
    }

    #[test]
    fn test_range_report_check() {
        let requirement = VersionRequirement::parse("[1.0,2.0)").unwrap();
        let report = RangeReport::new("[1.0,2.0)", requirement.clone());
        assert!(report.passed());

        let report = RangeReport::new("[1.0,2.0)", requirement.clone())
            .with_check(SemVer::parse("1.5").unwrap());
        assert!(report.passed());

        let report =
            RangeReport::new("[1.0,2.0)", requirement).with_check(SemVer::parse("2.0").unwrap());
        assert!(!report.passed());
    }
}

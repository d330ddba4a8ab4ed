//! nuspec-meta - NuGet version range and nuspec metadata CLI tool
//!
//! Subcommands:
//! - `range`: parse a version range, print its canonical form, optionally check a version
//! - `nuspec`: load a .nuspec manifest and print its dependencies and references

use clap::Parser;
use nuspec_meta::cli::{CliArgs, Command};
use nuspec_meta::domain::VersionRequirement;
use nuspec_meta::manifest::Nuspec;
use nuspec_meta::output::{create_formatter, NuspecReport, OutputConfig, RangeReport};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_ansi(!args.no_color)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    // Run the main logic and handle errors
    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    args.validate()?;

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet, args.no_color);
    let formatter = create_formatter(output_config);
    let mut stdout = io::stdout().lock();

    let exit_code = match &args.command {
        Command::Range { text, check } => {
            let requirement = VersionRequirement::parse(text)?;
            let mut report = RangeReport::new(text.as_str(), requirement);
            if let Some(version) = check {
                report = report.with_check(version.clone());
            }
            formatter.format_range(&report, &mut stdout)?;

            if report.passed() {
                ExitCode::SUCCESS
            } else {
                // Check failed
                ExitCode::from(2)
            }
        }
        Command::Nuspec { path } => {
            let found = path.exists();
            let nuspec = Nuspec::load(path)?;
            formatter.format_nuspec(&NuspecReport::new(path, found, nuspec), &mut stdout)?;
            ExitCode::SUCCESS
        }
    };

    stdout.flush()?;
    Ok(exit_code)
}

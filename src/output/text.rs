//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Canonical range text with its comparison form
//! - Version check results
//! - Manifest dependency, framework assembly and reference listings

use crate::domain::{FrameworkRestrictions, PreReleaseStatus, VersionRequirement};
use crate::manifest::NuspecReferences;
use crate::output::{NuspecReport, OutputFormatter, RangeReport, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn pre_release_label(status: &PreReleaseStatus) -> String {
        match status {
            PreReleaseStatus::No => "none".to_string(),
            PreReleaseStatus::All => "all".to_string(),
            PreReleaseStatus::Concrete(names) => names.join(", "),
        }
    }

    fn restrictions_label(restrictions: &FrameworkRestrictions) -> String {
        if restrictions.is_empty() {
            return "all frameworks".to_string();
        }
        restrictions
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Canonical text, or a placeholder for the empty "any version" form
    fn requirement_label(requirement: &VersionRequirement) -> String {
        let text = requirement.format();
        if text.is_empty() {
            "(any)".to_string()
        } else {
            text
        }
    }

    fn section_header(
        &self,
        title: &str,
        count: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.color {
            writeln!(
                writer,
                "  {} {}",
                format!("{}:", title).bold(),
                format!("({})", count).dimmed()
            )
        } else {
            writeln!(writer, "  {}: ({})", title, count)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_range(&self, report: &RangeReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let requirement = &report.requirement;

        if self.verbosity == Verbosity::Quiet {
            return writeln!(writer, "{}", requirement.format());
        }

        let canonical = Self::requirement_label(requirement);
        let description = requirement.range().describe();
        if self.color {
            writeln!(writer, "{}  {}", canonical.bold(), description.dimmed())?;
        } else {
            writeln!(writer, "{}  {}", canonical, description)?;
        }

        if self.verbosity == Verbosity::Verbose {
            writeln!(writer, "  input:        {:?}", report.input)?;
            writeln!(writer, "  kind:         {}", requirement.range().kind())?;
            writeln!(
                writer,
                "  pre-releases: {}",
                Self::pre_release_label(requirement.pre_releases())
            )?;
        }

        if let Some(check) = &report.check {
            let verdict = if check.satisfied {
                "satisfies"
            } else {
                "does not satisfy"
            };
            if self.color {
                let verdict = if check.satisfied {
                    verdict.green()
                } else {
                    verdict.red()
                };
                writeln!(writer, "  {} {}", check.version.to_string().bold(), verdict)?;
            } else {
                writeln!(writer, "  {} {}", check.version, verdict)?;
            }
        }

        Ok(())
    }

    fn format_nuspec(&self, report: &NuspecReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let nuspec = &report.nuspec;

        if self.verbosity == Verbosity::Quiet {
            for dependency in nuspec.dependencies() {
                writeln!(
                    writer,
                    "{} {}",
                    dependency.name,
                    dependency.requirement.format()
                )?;
            }
            return Ok(());
        }

        let path_display = report.path.display().to_string();
        if !report.found {
            if self.color {
                writeln!(
                    writer,
                    "{} {}",
                    path_display.bold(),
                    "(no manifest, all references)".dimmed()
                )?;
            } else {
                writeln!(writer, "{} (no manifest, all references)", path_display)?;
            }
            return Ok(());
        }

        if self.color {
            writeln!(
                writer,
                "{} {}",
                nuspec.official_name().bold(),
                format!("({})", path_display).dimmed()
            )?;
        } else {
            writeln!(writer, "{} ({})", nuspec.official_name(), path_display)?;
        }

        let dependencies = nuspec.dependencies();
        self.section_header("Dependencies", dependencies.len(), writer)?;
        let width = dependencies
            .iter()
            .map(|d| d.name.len())
            .max()
            .unwrap_or(0)
            .max(20);
        for dependency in dependencies {
            let requirement = Self::requirement_label(&dependency.requirement);
            let restrictions = Self::restrictions_label(&dependency.restrictions);
            if self.color {
                let name = format!("{:width$}", dependency.name, width = width);
                write!(
                    writer,
                    "    {} {} {}",
                    name,
                    requirement.bright_white(),
                    restrictions.dimmed()
                )?;
            } else {
                write!(
                    writer,
                    "    {:width$} {} {}",
                    dependency.name,
                    requirement,
                    restrictions,
                    width = width
                )?;
            }
            if self.verbosity == Verbosity::Verbose {
                write!(writer, " [{}]", dependency.requirement.range().describe())?;
            }
            writeln!(writer)?;
        }

        let assemblies = nuspec.framework_assembly_references();
        self.section_header("Framework assemblies", assemblies.len(), writer)?;
        for assembly in assemblies {
            let restrictions = Self::restrictions_label(&assembly.framework_restrictions);
            if self.color {
                writeln!(
                    writer,
                    "    {} {}",
                    assembly.assembly_name,
                    restrictions.dimmed()
                )?;
            } else {
                writeln!(writer, "    {} {}", assembly.assembly_name, restrictions)?;
            }
        }

        match nuspec.references() {
            NuspecReferences::All => writeln!(writer, "  References: all")?,
            NuspecReferences::Explicit(files) => {
                writeln!(writer, "  References: {}", files.join(", "))?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SemVer;
    use crate::manifest::Nuspec;

    fn render_range(formatter: &TextFormatter, report: &RangeReport) -> String {
        let mut buf = Vec::new();
        formatter.format_range(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn render_nuspec(formatter: &TextFormatter, report: &NuspecReport) -> String {
        let mut buf = Vec::new();
        formatter.format_nuspec(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn report(text: &str) -> RangeReport {
        RangeReport::new(text, VersionRequirement::parse(text).unwrap())
    }

    fn sample_nuspec() -> Nuspec {
        Nuspec::from_xml(
            r#"<package><metadata><id>Sample</id>
              <dependencies>
                <group targetFramework="net40"><dependency id="Newtonsoft.Json" version="[6.0,7.0)" /></group>
                <group targetFramework="net45" />
              </dependencies>
              <frameworkAssemblies>
                <frameworkAssembly assemblyName="System.Net.Http" />
              </frameworkAssemblies>
              <references><reference file="Sample.dll" /></references>
            </metadata></package>"#,
            "Sample.nuspec",
        )
        .unwrap()
    }

    #[test]
    fn test_range_normal() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let output = render_range(&formatter, &report("[1.0,2.0)"));
        assert_eq!(output, "[1.0,2.0)  1.0 <= x < 2.0\n");
    }

    #[test]
    fn test_range_any_version() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let output = render_range(&formatter, &report(""));
        assert_eq!(output, "(any)  any version\n");
    }

    #[test]
    fn test_range_quiet_prints_canonical_text_only() {
        let formatter = TextFormatter::with_color(Verbosity::Quiet, false);
        let output = render_range(&formatter, &report(" (1.0,) "));
        assert_eq!(output, "(1.0,)\n");
    }

    #[test]
    fn test_range_verbose() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false);
        let output = render_range(&formatter, &report("[1.2.3]"));
        assert!(output.contains("kind:         specific"));
        assert!(output.contains("pre-releases: none"));
    }

    #[test]
    fn test_range_check() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let output = render_range(
            &formatter,
            &report("[1.0,2.0)").with_check(SemVer::parse("1.5").unwrap()),
        );
        assert!(output.contains("  1.5 satisfies\n"));

        let output = render_range(
            &formatter,
            &report("[1.0,2.0)").with_check(SemVer::parse("2.0").unwrap()),
        );
        assert!(output.contains("  2.0 does not satisfy\n"));
    }

    #[test]
    fn test_nuspec_normal() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let output = render_nuspec(
            &formatter,
            &NuspecReport::new("Sample.nuspec", true, sample_nuspec()),
        );
        assert!(output.starts_with("Sample (Sample.nuspec)\n"));
        assert!(output.contains("  Dependencies: (1)\n"));
        assert!(output.contains("Newtonsoft.Json"));
        assert!(output.contains("[6.0,7.0) net40"));
        assert!(output.contains("    System.Net.Http all frameworks\n"));
        assert!(output.contains("  References: Sample.dll\n"));
    }

    #[test]
    fn test_nuspec_quiet() {
        let formatter = TextFormatter::with_color(Verbosity::Quiet, false);
        let output = render_nuspec(
            &formatter,
            &NuspecReport::new("Sample.nuspec", true, sample_nuspec()),
        );
        assert_eq!(output, "Newtonsoft.Json [6.0,7.0)\n");
    }

    #[test]
    fn test_nuspec_missing_file() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let output = render_nuspec(
            &formatter,
            &NuspecReport::new("Missing.nuspec", false, Nuspec::all()),
        );
        assert_eq!(output, "Missing.nuspec (no manifest, all references)\n");
    }
}

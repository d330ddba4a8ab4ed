//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of parsed ranges and version checks
//! - JSON serialization of loaded manifests

use crate::domain::{PreReleaseStatus, SemVer, VersionRange};
use crate::manifest::Nuspec;
use crate::output::{NuspecReport, OutputFormatter, RangeReport, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn write_json<T: Serialize>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

/// JSON representation of a range report
#[derive(Serialize)]
struct JsonRange<'a> {
    /// Text as given
    input: &'a str,
    /// Canonical NuGet text
    canonical: String,
    kind: &'static str,
    range: &'a VersionRange,
    pre_releases: &'a PreReleaseStatus,
    /// Comparison form (only in verbose mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<JsonCheck<'a>>,
}

/// JSON representation of a version check
#[derive(Serialize)]
struct JsonCheck<'a> {
    version: &'a SemVer,
    satisfied: bool,
}

/// JSON representation of a manifest report
#[derive(Serialize)]
struct JsonNuspec<'a> {
    path: String,
    found: bool,
    #[serde(flatten)]
    nuspec: &'a Nuspec,
}

impl OutputFormatter for JsonFormatter {
    fn format_range(&self, report: &RangeReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let range = report.requirement.range();
        let output = JsonRange {
            input: &report.input,
            canonical: report.requirement.format(),
            kind: range.kind(),
            range,
            pre_releases: report.requirement.pre_releases(),
            description: (self.verbosity == Verbosity::Verbose).then(|| range.describe()),
            check: report.check.as_ref().map(|check| JsonCheck {
                version: &check.version,
                satisfied: check.satisfied,
            }),
        };
        Self::write_json(&output, writer)
    }

    fn format_nuspec(&self, report: &NuspecReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonNuspec {
            path: report.path.display().to_string(),
            found: report.found,
            nuspec: &report.nuspec,
        };
        Self::write_json(&output, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VersionRequirement;
    use serde_json::Value;

    fn render_range(formatter: &JsonFormatter, report: &RangeReport) -> Value {
        let mut buf = Vec::new();
        formatter.format_range(report, &mut buf).unwrap();
        serde_json::from_slice(&buf).unwrap()
    }

    fn render_nuspec(formatter: &JsonFormatter, report: &NuspecReport) -> Value {
        let mut buf = Vec::new();
        formatter.format_nuspec(report, &mut buf).unwrap();
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn test_range_json() {
        let requirement = VersionRequirement::parse("(1.0,)").unwrap();
        let report = RangeReport::new("(1.0,)", requirement);
        let json = render_range(&JsonFormatter::new(Verbosity::Normal), &report);

        assert_eq!(json["input"], "(1.0,)");
        assert_eq!(json["canonical"], "(1.0,)");
        assert_eq!(json["kind"], "greater_than");
        assert_eq!(json["range"], "(1.0,)");
        assert_eq!(json["pre_releases"], "no");
        assert!(json.get("description").is_none());
        assert!(json.get("check").is_none());
    }

    #[test]
    fn test_range_json_verbose_with_check() {
        let requirement = VersionRequirement::parse("[1.0,2.0)").unwrap();
        let report =
            RangeReport::new("[1.0,2.0)", requirement).with_check(SemVer::parse("2.0").unwrap());
        let json = render_range(&JsonFormatter::new(Verbosity::Verbose), &report);

        assert_eq!(json["description"], "1.0 <= x < 2.0");
        assert_eq!(json["check"]["version"], "2.0");
        assert_eq!(json["check"]["satisfied"], false);
    }

    #[test]
    fn test_unrestricted_range_json() {
        let report = RangeReport::new("", VersionRequirement::parse("").unwrap());
        let json = render_range(&JsonFormatter::new(Verbosity::Normal), &report);
        assert_eq!(json["canonical"], "");
        assert_eq!(json["kind"], "minimum");
        assert_eq!(json["pre_releases"], "all");
    }

    #[test]
    fn test_nuspec_json() {
        let nuspec = Nuspec::from_xml(
            r#"<package><metadata><id>Sample</id>
              <dependencies>
                <group targetFramework="net45"><dependency id="A" version="1.0" /></group>
              </dependencies>
            </metadata></package>"#,
            "Sample.nuspec",
        )
        .unwrap();
        let report = NuspecReport::new("Sample.nuspec", true, nuspec);
        let json = render_nuspec(&JsonFormatter::new(Verbosity::Normal), &report);

        assert_eq!(json["path"], "Sample.nuspec");
        assert_eq!(json["found"], true);
        assert_eq!(json["official_name"], "Sample");
        assert_eq!(json["dependencies"][0]["name"], "A");
        assert_eq!(json["dependencies"][0]["requirement"]["range"], "1.0");
        assert_eq!(json["dependencies"][0]["restrictions"][0], "net45");
        assert_eq!(json["references"]["kind"], "all");
    }

    #[test]
    fn test_missing_nuspec_json() {
        let report = NuspecReport::new("Missing.nuspec", false, Nuspec::all());
        let json = render_nuspec(&JsonFormatter::new(Verbosity::Normal), &report);
        assert_eq!(json["found"], false);
        assert_eq!(json["official_name"], "");
        assert_eq!(json["dependencies"].as_array().unwrap().len(), 0);
    }
}

//! NuGet version-range syntax
//!
//! Handles version formats:
//! - Unconstrained: ``, `null`
//! - Minimum: `1.0` (>= 1.0)
//! - Exact: `[1.0]`
//! - Interval: `[1.0,2.0)`, `(1.0,2.0]`
//! - One-sided: `(1.0,)`, `[1.0,]`, `(,1.0]`, `(,1.0)`

use crate::domain::{PreReleaseStatus, SemVer, VersionRange, VersionRangeBound, VersionRequirement};
use crate::error::ParseError;
use tracing::trace;

const UNCONSTRAINED: &str = "null";
const DELIMITERS: [char; 4] = ['[', ']', '(', ')'];

/// Parse NuGet range text into a requirement.
///
/// Empty text and the literal `null` yield [`VersionRequirement::all_releases`].
/// Everything else yields a release-only requirement; pre-release admission
/// is decided by the caller.
pub fn parse(text: &str) -> Result<VersionRequirement, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == UNCONSTRAINED {
        return Ok(VersionRequirement::all_releases());
    }

    let range = parse_range(trimmed)?;
    trace!(input = trimmed, range = ?range, "parsed version range");
    Ok(VersionRequirement::new(range, PreReleaseStatus::No))
}

/// Parse optional range text, treating an absent value as unconstrained
pub fn parse_optional(text: Option<&str>) -> Result<VersionRequirement, ParseError> {
    parse(text.unwrap_or_default())
}

fn parse_version(text: &str, token: &str) -> Result<SemVer, ParseError> {
    SemVer::parse(token).map_err(|e| ParseError::invalid_version(text, e))
}

fn parse_range(text: &str) -> Result<VersionRange, ParseError> {
    if !text.contains(',') {
        if text.starts_with('[') {
            let inner = text.trim_start_matches('[').trim_end_matches(']');
            return Ok(VersionRange::Specific(parse_version(text, inner)?));
        }
        return Ok(VersionRange::Minimum(parse_version(text, text)?));
    }

    let first = text.chars().next().unwrap_or_default();
    let last = text.chars().last().unwrap_or_default();
    let from = match first {
        '[' => VersionRangeBound::Including,
        '(' => VersionRangeBound::Excluding,
        other => return Err(ParseError::invalid_bound(text, other)),
    };
    let to = match last {
        ']' => VersionRangeBound::Including,
        ')' => VersionRangeBound::Excluding,
        other => return Err(ParseError::invalid_bound(text, other)),
    };

    let stripped: String = text.chars().filter(|c| !DELIMITERS.contains(c)).collect();
    let versions = stripped
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| parse_version(text, segment))
        .collect::<Result<Vec<_>, _>>()?;

    match versions.as_slice() {
        [low, high] => VersionRange::between(from, low.clone(), high.clone(), to)
            .ok_or_else(|| ParseError::InvertedRange {
                text: text.to_string(),
            }),
        [version] => {
            let version = version.clone();
            let upper_only = text[first.len_utf8()..].trim_start().starts_with(',');
            if upper_only {
                match (from, to) {
                    (VersionRangeBound::Excluding, VersionRangeBound::Including)
                    | (VersionRangeBound::Including, VersionRangeBound::Including) => {
                        Ok(VersionRange::Maximum(version))
                    }
                    (VersionRangeBound::Excluding, VersionRangeBound::Excluding) => {
                        Ok(VersionRange::LessThan(version))
                    }
                    (VersionRangeBound::Including, VersionRangeBound::Excluding) => {
                        Err(ParseError::invalid_bound_combination(text))
                    }
                }
            } else {
                match (from, to) {
                    (VersionRangeBound::Excluding, VersionRangeBound::Excluding) => {
                        Ok(VersionRange::GreaterThan(version))
                    }
                    (VersionRangeBound::Including, VersionRangeBound::Including) => {
                        Ok(VersionRange::Minimum(version))
                    }
                    _ => Err(ParseError::invalid_bound_combination(text)),
                }
            }
        }
        other => Err(ParseError::invalid_version_count(text, other.len())),
    }
}

/// Format a range as NuGet text.
///
/// `Specific` and `OverrideAll` both format as `[v]`, so the override tag
/// does not survive a format/parse round trip.
pub fn format(range: &VersionRange) -> String {
    match range {
        VersionRange::Minimum(version) => {
            let text = version.to_string();
            if text == "0" {
                String::new()
            } else {
                text
            }
        }
        VersionRange::GreaterThan(version) => format!("({},)", version),
        VersionRange::Maximum(version) => format!("(,{}]", version),
        VersionRange::LessThan(version) => format!("(,{})", version),
        VersionRange::Specific(version) | VersionRange::OverrideAll(version) => {
            format!("[{}]", version)
        }
        VersionRange::Range(from, low, high, to) => {
            format!("{}{},{}{}", from.opening(), low, high, to.closing())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> SemVer {
        SemVer::parse(text).unwrap()
    }

    fn range(text: &str) -> VersionRange {
        parse(text).unwrap().range().clone()
    }

    #[test]
    fn test_parse_unconstrained_sentinels() {
        for text in ["", "null", "  "] {
            assert_eq!(parse(text).unwrap(), VersionRequirement::all_releases());
        }
        assert_eq!(
            parse_optional(None).unwrap(),
            VersionRequirement::all_releases()
        );
    }

    #[test]
    fn test_parse_plain_version_is_minimum() {
        assert_eq!(range("1.2.3"), VersionRange::Minimum(v("1.2.3")));
        assert_eq!(range("0"), VersionRange::Minimum(v("0")));
        assert_eq!(
            parse("1.2.3").unwrap().pre_releases(),
            &PreReleaseStatus::No
        );
    }

    #[test]
    fn test_parse_specific() {
        assert_eq!(range("[1.2.3]"), VersionRange::Specific(v("1.2.3")));
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(
            range("[1.0.0,2.0.0)"),
            VersionRange::Range(
                VersionRangeBound::Including,
                v("1.0.0"),
                v("2.0.0"),
                VersionRangeBound::Excluding
            )
        );
        assert_eq!(
            range("(1.0, 2.0]"),
            VersionRange::Range(
                VersionRangeBound::Excluding,
                v("1.0"),
                v("2.0"),
                VersionRangeBound::Including
            )
        );
    }

    #[test]
    fn test_parse_upper_bound_only() {
        assert_eq!(range("(,1.0]"), VersionRange::Maximum(v("1.0")));
        assert_eq!(range("[,1.0]"), VersionRange::Maximum(v("1.0")));
        assert_eq!(range("(,1.0)"), VersionRange::LessThan(v("1.0")));
    }

    #[test]
    fn test_parse_lower_bound_only() {
        assert_eq!(range("(1.0,)"), VersionRange::GreaterThan(v("1.0")));
        assert_eq!(range("[1.0,]"), VersionRange::Minimum(v("1.0")));
    }

    #[test]
    fn test_parse_invalid_bound_combinations() {
        assert_eq!(
            parse("[,1.0)").unwrap_err(),
            ParseError::invalid_bound_combination("[,1.0)")
        );
        assert_eq!(
            parse("[1.0,)").unwrap_err(),
            ParseError::invalid_bound_combination("[1.0,)")
        );
        assert_eq!(
            parse("(1.0,]").unwrap_err(),
            ParseError::invalid_bound_combination("(1.0,]")
        );
    }

    #[test]
    fn test_parse_invalid_bound_character() {
        assert_eq!(
            parse("{1.0,2.0]").unwrap_err(),
            ParseError::invalid_bound("{1.0,2.0]", '{')
        );
        assert_eq!(
            parse("[1.0,2.0").unwrap_err(),
            ParseError::invalid_bound("[1.0,2.0", '0')
        );
    }

    #[test]
    fn test_parse_invalid_version() {
        let err = parse("[1.0,abc)").unwrap_err();
        assert!(matches!(
            &err,
            ParseError::InvalidVersion { version, .. } if version == "abc"
        ));
        assert_eq!(err.text(), "[1.0,abc)");
        assert!(parse("not-a-version").is_err());
    }

    #[test]
    fn test_parse_wrong_version_count() {
        assert_eq!(
            parse("(,)").unwrap_err(),
            ParseError::invalid_version_count("(,)", 0)
        );
        assert_eq!(
            parse("[1.0,2.0,3.0]").unwrap_err(),
            ParseError::invalid_version_count("[1.0,2.0,3.0]", 3)
        );
    }

    #[test]
    fn test_parse_inverted_interval() {
        assert!(matches!(
            parse("[2.0,1.0]").unwrap_err(),
            ParseError::InvertedRange { .. }
        ));
    }

    #[test]
    fn test_exact_interval_membership() {
        let requirement = parse("[1.0.0,2.0.0)").unwrap();
        assert!(requirement.is_in_range(&v("1.0.0")));
        assert!(requirement.is_in_range(&v("1.9.9")));
        assert!(!requirement.is_in_range(&v("0.9.9")));
        assert!(!requirement.is_in_range(&v("2.0.0")));
    }

    #[test]
    fn test_open_lower_bound_membership() {
        let requirement = parse("(1.0.0,)").unwrap();
        assert!(!requirement.is_in_range(&v("1.0.0")));
        assert!(requirement.is_in_range(&v("1.0.1")));
    }

    #[test]
    fn test_pinned_membership() {
        let requirement = parse("[1.2.3]").unwrap();
        assert!(requirement.is_in_range(&v("1.2.3")));
        assert!(!requirement.is_in_range(&v("1.2.4")));
        assert!(!requirement.is_in_range(&v("1.2.2")));
    }

    #[test]
    fn test_format_each_shape() {
        assert_eq!(format(&VersionRange::Minimum(v("0"))), "");
        assert_eq!(format(&VersionRange::Minimum(v("1.0"))), "1.0");
        assert_eq!(format(&VersionRange::GreaterThan(v("1.0"))), "(1.0,)");
        assert_eq!(format(&VersionRange::Maximum(v("1.0"))), "(,1.0]");
        assert_eq!(format(&VersionRange::LessThan(v("1.0"))), "(,1.0)");
        assert_eq!(format(&VersionRange::Specific(v("1.0"))), "[1.0]");
        assert_eq!(
            format(&VersionRange::Range(
                VersionRangeBound::Excluding,
                v("1.0"),
                v("2.0"),
                VersionRangeBound::Including
            )),
            "(1.0,2.0]"
        );
    }

    #[test]
    fn test_override_all_formats_like_specific() {
        let pinned = VersionRange::Specific(v("3.1"));
        let overriding = VersionRange::OverrideAll(v("3.1"));
        assert_eq!(format(&pinned), format(&overriding));
        assert_eq!(range(&format(&overriding)), pinned);
    }

    #[test]
    fn test_round_trip_preserves_accepted_versions() {
        let probes: Vec<SemVer> = ["0.5", "1.0", "1.0.1", "1.5", "2.0", "2.0.1", "3.0"]
            .iter()
            .map(|text| v(text))
            .collect();
        let inputs = [
            "", "1.0", "[1.0]", "(1.0,)", "[1.0,]", "(,2.0]", "(,2.0)", "[1.0,2.0]",
            "[1.0,2.0)", "(1.0,2.0]", "(1.0,2.0)",
        ];
        for input in inputs {
            let original = parse(input).unwrap();
            let reparsed = parse(&format(original.range())).unwrap();
            for probe in &probes {
                assert_eq!(
                    original.range().is_in_range(probe),
                    reparsed.range().is_in_range(probe),
                    "range {} disagrees on {}",
                    input,
                    probe
                );
            }
        }
    }
}

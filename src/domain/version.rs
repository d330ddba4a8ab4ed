//! Semantic version values as they appear in NuGet manifests
//!
//! NuGet versions are looser than SemVer 2.0:
//! - One to four numeric parts: `1`, `1.0`, `1.0.0`, `1.0.0.0`
//! - Optional pre-release suffix: `1.0.0-beta2`
//! - Optional build metadata: `1.0.0+sha.1234`
//!
//! Missing numeric parts default to zero, so `1.0` and `1.0.0` compare equal.
//! The original text is kept for display.

use crate::error::SemVerError;
use semver::Prerelease;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Pre-release part of a version (`beta2` in `1.0.0-beta2`)
#[derive(Debug, Clone)]
pub struct PreRelease {
    /// Alphabetic lead of the first identifier (`beta` for `beta2`)
    pub name: String,
    /// The pre-release text as written
    pub original: String,
    ordering: Prerelease,
}

impl PreRelease {
    /// Parse a pre-release suffix (without the leading `-`)
    pub fn parse(text: &str) -> Result<Self, String> {
        if text.is_empty() {
            return Err("empty pre-release".to_string());
        }
        let ordering = Prerelease::new(text).map_err(|e| e.to_string())?;
        let name: String = text
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        Ok(Self {
            name: if name.is_empty() {
                text.to_string()
            } else {
                name
            },
            original: text.to_string(),
            ordering,
        })
    }
}

impl PartialEq for PreRelease {
    fn eq(&self, other: &Self) -> bool {
        self.ordering == other.ordering
    }
}

impl Eq for PreRelease {}

impl Hash for PreRelease {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordering.hash(state);
    }
}

impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordering.cmp(&other.ordering)
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// A NuGet version
#[derive(Debug, Clone)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Fourth numeric part (`4` in `1.2.3.4`)
    pub build: u64,
    pub pre_release: Option<PreRelease>,
    /// Build metadata after `+`; ignored for ordering
    pub build_metadata: String,
    original: Option<String>,
}

impl SemVer {
    /// Creates a release version from its three main parts
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            build: 0,
            pre_release: None,
            build_metadata: String::new(),
            original: None,
        }
    }

    /// The version written as `0`, used by the "any version" requirement
    pub fn zero() -> Self {
        Self {
            original: Some("0".to_string()),
            ..Self::new(0, 0, 0)
        }
    }

    /// Parse a NuGet version
    pub fn parse(text: &str) -> Result<Self, SemVerError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SemVerError::new(text, "empty version"));
        }

        let (rest, build_metadata) = match trimmed.split_once('+') {
            Some((rest, metadata)) => (rest, metadata.to_string()),
            None => (trimmed, String::new()),
        };
        let (numbers, pre) = match rest.split_once('-') {
            Some((numbers, pre)) => (numbers, Some(pre)),
            None => (rest, None),
        };

        let parts: Vec<&str> = numbers.split('.').collect();
        if parts.len() > 4 {
            return Err(SemVerError::new(text, "more than four numeric parts"));
        }

        let mut values = [0u64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| SemVerError::new(text, format!("'{}' is not a number", part)))?;
        }

        let pre_release = pre
            .map(PreRelease::parse)
            .transpose()
            .map_err(|message| SemVerError::new(text, message))?;

        Ok(Self {
            major: values[0],
            minor: values[1],
            patch: values[2],
            build: values[3],
            pre_release,
            build_metadata,
            original: Some(trimmed.to_string()),
        })
    }

    /// Returns true if this version carries a pre-release suffix
    pub fn is_prerelease(&self) -> bool {
        self.pre_release.is_some()
    }

    /// Normalized text, independent of how the version was written
    pub fn normalize(&self) -> String {
        let mut text = format!("{}.{}.{}", self.major, self.minor, self.patch);
        if self.build > 0 {
            text.push_str(&format!(".{}", self.build));
        }
        if let Some(pre) = &self.pre_release {
            text.push('-');
            text.push_str(&pre.original);
        }
        text
    }
}

impl PartialEq for SemVer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemVer {}

impl Hash for SemVer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.build.hash(state);
        self.pre_release.hash(state);
    }
}

impl Ord for SemVer {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch, self.build)
            .cmp(&(other.major, other.minor, other.patch, other.build))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for SemVer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.original {
            Some(original) => write!(f, "{}", original),
            None => write!(f, "{}", self.normalize()),
        }
    }
}

impl FromStr for SemVer {
    type Err = SemVerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SemVer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> SemVer {
        SemVer::parse(text).unwrap()
    }

    #[test]
    fn test_parse_three_parts() {
        let version = v("1.2.3");
        assert_eq!((version.major, version.minor, version.patch), (1, 2, 3));
        assert_eq!(version.build, 0);
        assert!(!version.is_prerelease());
    }

    #[test]
    fn test_parse_short_forms_default_to_zero() {
        assert_eq!(v("1"), SemVer::new(1, 0, 0));
        assert_eq!(v("1.5"), SemVer::new(1, 5, 0));
        assert_eq!(v("0"), SemVer::new(0, 0, 0));
    }

    #[test]
    fn test_parse_four_parts() {
        let version = v("4.0.30319.17929");
        assert_eq!(version.build, 17929);
        assert!(version > v("4.0.30319"));
    }

    #[test]
    fn test_parse_prerelease_and_metadata() {
        let version = v("2.0.0-beta2+sha.abc");
        let pre = version.pre_release.as_ref().unwrap();
        assert_eq!(pre.name, "beta");
        assert_eq!(pre.original, "beta2");
        assert_eq!(version.build_metadata, "sha.abc");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(SemVer::parse("").is_err());
        assert!(SemVer::parse("abc").is_err());
        assert!(SemVer::parse("1.x").is_err());
        assert!(SemVer::parse("1.2.3.4.5").is_err());
        assert!(SemVer::parse("1.0-").is_err());
        assert!(SemVer::parse("1..2").is_err());
    }

    #[test]
    fn test_parse_error_names_input() {
        let err = SemVer::parse("1.x").unwrap_err();
        assert_eq!(err.text, "1.x");
    }

    #[test]
    fn test_display_keeps_original_text() {
        assert_eq!(v("0").to_string(), "0");
        assert_eq!(v("1.0").to_string(), "1.0");
        assert_eq!(SemVer::zero().to_string(), "0");
        assert_eq!(SemVer::new(1, 2, 3).to_string(), "1.2.3");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(v("1.0").normalize(), "1.0.0");
        assert_eq!(v("1.0.0.4-rc1").normalize(), "1.0.0.4-rc1");
    }

    #[test]
    fn test_ordering() {
        assert!(v("1.0.0") < v("1.0.1"));
        assert!(v("1.9.9") < v("2.0.0"));
        assert!(v("2.0.0-beta") < v("2.0.0"));
        assert!(v("2.0.0-alpha") < v("2.0.0-beta"));
        assert!(v("2.0.0-beta.2") < v("2.0.0-beta.11"));
        assert!(v("1.9.9") < v("2.0.0-alpha"));
    }

    #[test]
    fn test_equality_ignores_metadata_and_spelling() {
        assert_eq!(v("1.0+build"), v("1.0.0"));
        assert_ne!(v("1.0.0-beta"), v("1.0.0"));
    }

    #[test]
    fn test_from_str() {
        let version: SemVer = "3.1".parse().unwrap();
        assert_eq!(version, SemVer::new(3, 1, 0));
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&v("1.2.3-rc1")).unwrap();
        assert_eq!(json, "\"1.2.3-rc1\"");
    }
}

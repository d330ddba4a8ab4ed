//! Version requirements: a range plus a pre-release policy

use super::{SemVer, VersionRange};
use crate::error::ParseError;
use serde::Serialize;
use std::fmt;

/// Which pre-release versions a requirement admits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreReleaseStatus {
    /// Releases only
    No,
    /// Every pre-release
    All,
    /// Pre-releases whose name is listed (e.g. `beta`, `rc`)
    Concrete(Vec<String>),
}

impl PreReleaseStatus {
    fn admits(&self, version: &SemVer) -> bool {
        match &version.pre_release {
            None => true,
            Some(pre) => match self {
                PreReleaseStatus::No => false,
                PreReleaseStatus::All => true,
                PreReleaseStatus::Concrete(names) => names.iter().any(|n| *n == pre.name),
            },
        }
    }
}

/// A version range combined with a pre-release inclusion policy
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VersionRequirement {
    range: VersionRange,
    pre_releases: PreReleaseStatus,
}

impl VersionRequirement {
    /// Creates a new requirement
    pub fn new(range: VersionRange, pre_releases: PreReleaseStatus) -> Self {
        Self {
            range,
            pre_releases,
        }
    }

    /// The "no constraint" requirement: any version, pre-releases included
    pub fn all_releases() -> Self {
        Self::new(VersionRange::Minimum(SemVer::zero()), PreReleaseStatus::All)
    }

    /// Parse NuGet range text; see [`crate::parser::parse`]
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        crate::parser::parse(text)
    }

    /// Returns the version range
    pub fn range(&self) -> &VersionRange {
        &self.range
    }

    /// Returns the pre-release policy
    pub fn pre_releases(&self) -> &PreReleaseStatus {
        &self.pre_releases
    }

    /// Returns a copy of this requirement with a different pre-release policy
    pub fn with_pre_releases(&self, pre_releases: PreReleaseStatus) -> Self {
        Self::new(self.range.clone(), pre_releases)
    }

    /// Returns true if `version` satisfies both the range and the pre-release policy.
    ///
    /// Pins bypass the policy: `[1.0.0-beta]` is satisfied by `1.0.0-beta`.
    pub fn is_in_range(&self, version: &SemVer) -> bool {
        if self.range.is_unrestricted() && self.pre_releases == PreReleaseStatus::All {
            return true;
        }
        if self.range.is_pinned() {
            return self.range.is_in_range(version);
        }
        self.pre_releases.admits(version) && self.range.is_in_range(version)
    }

    /// Returns true if `version` lies in the range, whatever its pre-release status
    pub fn is_in_range_ignoring_prerelease(&self, version: &SemVer) -> bool {
        self.range.is_in_range(version)
    }

    /// NuGet text form of the range; the pre-release policy is not written
    pub fn format(&self) -> String {
        crate::parser::format(&self.range)
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

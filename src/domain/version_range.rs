//! Version range types
//!
//! A [`VersionRange`] is one of a closed set of bound shapes. The NuGet text
//! form of each shape is produced by [`crate::parser::format`].

use super::SemVer;
use serde::{Serialize, Serializer};
use std::fmt;

/// Whether an interval end includes its version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionRangeBound {
    Excluding,
    Including,
}

impl VersionRangeBound {
    /// Delimiter opening an interval with this bound
    pub fn opening(&self) -> char {
        match self {
            VersionRangeBound::Including => '[',
            VersionRangeBound::Excluding => '(',
        }
    }

    /// Delimiter closing an interval with this bound
    pub fn closing(&self) -> char {
        match self {
            VersionRangeBound::Including => ']',
            VersionRangeBound::Excluding => ')',
        }
    }
}

/// The set of versions a dependency accepts
///
/// `==` is structural and tag-sensitive: `[1.0,1.0]` as a `Range` is not equal
/// to `Specific(1.0)` even though both accept the same versions. Compare with
/// [`VersionRange::is_in_range`] when the accepted set is what matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionRange {
    /// `>= v`; `Minimum(0)` accepts every version
    Minimum(SemVer),
    /// `> v`
    GreaterThan(SemVer),
    /// `<= v`
    Maximum(SemVer),
    /// `< v`
    LessThan(SemVer),
    /// `== v`
    Specific(SemVer),
    /// `== v`, and the pin overrides ranges requested transitively.
    ///
    /// Formats exactly like `Specific`: the distinction only lives in memory
    /// and is lost once the range is written out as NuGet text.
    OverrideAll(SemVer),
    /// `low..high`, each end including or excluding its version; `low <= high`
    Range(VersionRangeBound, SemVer, SemVer, VersionRangeBound),
}

impl VersionRange {
    /// Builds an interval, refusing one whose lower version is above its upper
    pub fn between(
        from: VersionRangeBound,
        low: SemVer,
        high: SemVer,
        to: VersionRangeBound,
    ) -> Option<Self> {
        (low <= high).then_some(VersionRange::Range(from, low, high, to))
    }

    /// Returns true if `version` lies inside this range
    pub fn is_in_range(&self, version: &SemVer) -> bool {
        match self {
            VersionRange::Minimum(v) => version >= v,
            VersionRange::GreaterThan(v) => version > v,
            VersionRange::Maximum(v) => version <= v,
            VersionRange::LessThan(v) => version < v,
            VersionRange::Specific(v) | VersionRange::OverrideAll(v) => version == v,
            VersionRange::Range(from, low, high, to) => {
                let above = match from {
                    VersionRangeBound::Including => version >= low,
                    VersionRangeBound::Excluding => version > low,
                };
                let below = match to {
                    VersionRangeBound::Including => version <= high,
                    VersionRangeBound::Excluding => version < high,
                };
                above && below
            }
        }
    }

    /// Returns true if this range pins exactly one version
    pub fn is_pinned(&self) -> bool {
        matches!(self, VersionRange::Specific(_) | VersionRange::OverrideAll(_))
    }

    /// Returns true if this pin overrides transitively requested ranges
    pub fn is_global_override(&self) -> bool {
        matches!(self, VersionRange::OverrideAll(_))
    }

    /// Returns true if this range accepts every version
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, VersionRange::Minimum(v) if *v == SemVer::new(0, 0, 0))
    }

    /// Short name of the shape, as used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            VersionRange::Minimum(_) => "minimum",
            VersionRange::GreaterThan(_) => "greater_than",
            VersionRange::Maximum(_) => "maximum",
            VersionRange::LessThan(_) => "less_than",
            VersionRange::Specific(_) => "specific",
            VersionRange::OverrideAll(_) => "override_all",
            VersionRange::Range(..) => "range",
        }
    }

    /// Human-readable comparison form, e.g. `>= 1.0` or `1.0 <= x < 2.0`
    pub fn describe(&self) -> String {
        match self {
            range if range.is_unrestricted() => "any version".to_string(),
            VersionRange::Minimum(v) => format!(">= {}", v),
            VersionRange::GreaterThan(v) => format!("> {}", v),
            VersionRange::Maximum(v) => format!("<= {}", v),
            VersionRange::LessThan(v) => format!("< {}", v),
            VersionRange::Specific(v) => format!("= {}", v),
            VersionRange::OverrideAll(v) => format!("= {} (overrides all)", v),
            VersionRange::Range(from, low, high, to) => {
                let lower = match from {
                    VersionRangeBound::Including => "<=",
                    VersionRangeBound::Excluding => "<",
                };
                let upper = match to {
                    VersionRangeBound::Including => "<=",
                    VersionRangeBound::Excluding => "<",
                };
                format!("{} {} x {} {}", low, lower, upper, high)
            }
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::parser::format(self))
    }
}

impl Serialize for VersionRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

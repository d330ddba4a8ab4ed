//! Core domain models for nuspec-meta
//!
//! This module contains the fundamental types used throughout the library:
//! - NuGet semantic versions
//! - Version ranges and requirements
//! - Target framework identifiers and restrictions

mod framework;
mod version;
mod version_range;
mod version_requirement;

pub use framework::{
    DotNetVersion, FrameworkDetection, FrameworkIdentifier, FrameworkRestriction,
    FrameworkRestrictions,
};
pub use version::{PreRelease, SemVer};
pub use version_range::{VersionRange, VersionRangeBound};
pub use version_requirement::{PreReleaseStatus, VersionRequirement};

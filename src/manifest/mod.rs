//! Nuspec manifest model and loading
//!
//! This module provides functionality to:
//! - Represent a package's dependencies, file references and framework assemblies
//! - Load a `.nuspec` XML manifest into that model
//! - Merge and simplify framework restrictions per dependency

mod document;
mod nuspec;
mod restrictions;

pub use document::ManifestNode;
pub use nuspec::{read_nuspec, read_nuspec_with};
pub use restrictions::{DefaultOptimizer, RestrictionOptimizer};

use crate::domain::{FrameworkRestrictions, VersionRequirement};
use serde::Serialize;

/// Files the consuming project should reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "files", rename_all = "snake_case")]
pub enum NuspecReferences {
    /// No explicit list: every assembly in the package may be referenced
    All,
    /// Only these files, in declaration order
    Explicit(Vec<String>),
}

/// A framework assembly (GAC reference) the package needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkAssemblyReference {
    pub assembly_name: String,
    /// Frameworks needing the reference; empty means every framework
    pub framework_restrictions: FrameworkRestrictions,
}

/// A declared package dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NuspecDependency {
    pub name: String,
    pub requirement: VersionRequirement,
    /// Frameworks the dependency applies to; empty means every framework
    pub restrictions: FrameworkRestrictions,
}

impl NuspecDependency {
    /// Creates a new dependency entry
    pub fn new(
        name: impl Into<String>,
        requirement: VersionRequirement,
        restrictions: FrameworkRestrictions,
    ) -> Self {
        Self {
            name: name.into(),
            requirement,
            restrictions,
        }
    }
}

/// Metadata loaded from a package manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Nuspec {
    official_name: String,
    dependencies: Vec<NuspecDependency>,
    framework_assembly_references: Vec<FrameworkAssemblyReference>,
    references: NuspecReferences,
}

impl Nuspec {
    pub(crate) fn new(
        official_name: String,
        dependencies: Vec<NuspecDependency>,
        framework_assembly_references: Vec<FrameworkAssemblyReference>,
        references: NuspecReferences,
    ) -> Self {
        Self {
            official_name,
            dependencies,
            framework_assembly_references,
            references,
        }
    }

    /// The manifest of a package without one: no name, no dependencies, all references
    pub fn all() -> Self {
        Self::new(String::new(), Vec::new(), Vec::new(), NuspecReferences::All)
    }

    /// Package id from `package/metadata/id`; empty only for [`Nuspec::all`]
    pub fn official_name(&self) -> &str {
        &self.official_name
    }

    /// Dependencies after restriction merging, in first-declaration order
    pub fn dependencies(&self) -> &[NuspecDependency] {
        &self.dependencies
    }

    /// One entry per distinct assembly name
    pub fn framework_assembly_references(&self) -> &[FrameworkAssemblyReference] {
        &self.framework_assembly_references
    }

    pub fn references(&self) -> &NuspecReferences {
        &self.references
    }

    /// Finds a dependency by package name
    pub fn dependency(&self, name: &str) -> Option<&NuspecDependency> {
        self.dependencies.iter().find(|d| d.name == name)
    }
}

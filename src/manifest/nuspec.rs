//! `.nuspec` loader
//!
//! Handles:
//! - `package/metadata/id` (required)
//! - `dependency` elements, optionally inside `group targetFramework="..."`
//! - `reference file="..."` elements
//! - `frameworkAssembly assemblyName="..." targetFramework="..."` elements

use super::document::ManifestNode;
use super::{
    DefaultOptimizer, FrameworkAssemblyReference, Nuspec, NuspecDependency, NuspecReferences,
    RestrictionOptimizer,
};
use crate::domain::{
    FrameworkDetection, FrameworkRestriction, FrameworkRestrictions, VersionRequirement,
};
use crate::error::ManifestError;
use crate::parser;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, trace};

const GROUP: &str = "group";
const TARGET_FRAMEWORK: &str = "targetFramework";

impl Nuspec {
    /// Load a manifest file.
    ///
    /// A missing file is not an error: it yields [`Nuspec::all`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no manifest file, assuming all references");
                return Ok(Self::all());
            }
            Err(e) => return Err(ManifestError::read_error(path, e)),
        };
        Self::from_xml(&content, path)
    }

    /// Load a manifest from XML text; `path` is only used in error messages
    pub fn from_xml(content: &str, path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = content.trim_start_matches('\u{feff}');
        let document = roxmltree::Document::parse(content)
            .map_err(|e| ManifestError::xml_parse_error(path, e.to_string()))?;
        read_nuspec(document.root_element(), path)
    }
}

/// Build a [`Nuspec`] from the `package` element of a manifest document
pub fn read_nuspec<N: ManifestNode>(root: N, path: &Path) -> Result<Nuspec, ManifestError> {
    read_nuspec_with(root, path, &DefaultOptimizer)
}

/// Like [`read_nuspec`], with a caller-chosen restriction optimizer
pub fn read_nuspec_with<N: ManifestNode>(
    root: N,
    path: &Path,
    optimizer: &dyn RestrictionOptimizer,
) -> Result<Nuspec, ManifestError> {
    let official_name = official_name(root).ok_or_else(|| ManifestError::missing_id(path))?;

    let mut entries = root
        .descendants_named("dependency")
        .into_iter()
        .map(|node| read_dependency(node, path))
        .collect::<Result<Vec<_>, _>>()?;
    entries.extend(empty_group_placeholders(root));
    let dependencies = optimizer.optimize(entries);

    let files: Vec<String> = root
        .descendants_named("reference")
        .iter()
        .filter_map(|node| node.attribute("file").map(str::to_string))
        .collect();
    let references = if files.is_empty() {
        NuspecReferences::All
    } else {
        NuspecReferences::Explicit(files)
    };

    let framework_assembly_references = read_framework_assemblies(root);

    debug!(
        path = %path.display(),
        package = %official_name,
        dependencies = dependencies.len(),
        framework_assemblies = framework_assembly_references.len(),
        "loaded nuspec"
    );

    Ok(Nuspec::new(
        official_name,
        dependencies,
        framework_assembly_references,
        references,
    ))
}

fn official_name<N: ManifestNode>(root: N) -> Option<String> {
    if root.name() != "package" {
        return None;
    }
    root.child_named("metadata")?
        .child_named("id")?
        .text()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn group_restrictions<N: ManifestNode>(group: N) -> FrameworkRestrictions {
    group
        .attribute(TARGET_FRAMEWORK)
        .and_then(FrameworkDetection::extract)
        .map(FrameworkRestriction::Exactly)
        .into_iter()
        .collect()
}

fn read_dependency<N: ManifestNode>(
    node: N,
    path: &Path,
) -> Result<NuspecDependency, ManifestError> {
    let name = node
        .attribute("id")
        .ok_or_else(|| ManifestError::missing_dependency_id(path))?;
    let requirement = parser::parse(node.attribute("version").unwrap_or("0"))
        .map_err(|e| ManifestError::invalid_version(path, e))?;

    let restrictions = match node.parent_element() {
        Some(parent) if parent.name() == GROUP => group_restrictions(parent),
        _ => Vec::new(),
    };

    trace!(dependency = name, requirement = %requirement, "read dependency");
    Ok(NuspecDependency::new(name, requirement, restrictions))
}

/// Placeholders for dependency groups that target a framework but list nothing
fn empty_group_placeholders<N: ManifestNode>(root: N) -> Vec<NuspecDependency> {
    root.descendants_named(GROUP)
        .into_iter()
        .filter(|group| {
            group.attribute(TARGET_FRAMEWORK).is_some()
                && group
                    .parent_element()
                    .is_some_and(|parent| parent.name() == "dependencies")
                && group.child_named("dependency").is_none()
        })
        .map(|group| {
            NuspecDependency::new(
                "",
                VersionRequirement::all_releases(),
                group_restrictions(group),
            )
        })
        .collect()
}

fn read_framework_assemblies<N: ManifestNode>(root: N) -> Vec<FrameworkAssemblyReference> {
    let mut merged: Vec<FrameworkAssemblyReference> = Vec::new();

    for node in root.descendants_named("frameworkAssembly") {
        let Some(assembly_name) = node.attribute("assemblyName") else {
            continue;
        };

        let targets = node
            .attribute(TARGET_FRAMEWORK)
            .map(str::trim)
            .filter(|frameworks| !frameworks.is_empty());
        let restrictions: FrameworkRestrictions = match targets {
            None => Vec::new(),
            Some(frameworks) => {
                let recognized: FrameworkRestrictions = frameworks
                    .split([',', ' '])
                    .filter(|token| !token.is_empty())
                    .filter_map(FrameworkDetection::extract)
                    .map(FrameworkRestriction::Exactly)
                    .collect();
                if recognized.is_empty() {
                    debug!(
                        assembly = assembly_name,
                        frameworks, "no known framework, skipping framework assembly"
                    );
                    continue;
                }
                recognized
            }
        };

        match merged.iter_mut().find(|r| r.assembly_name == assembly_name) {
            Some(existing) => {
                for restriction in restrictions {
                    if !existing.framework_restrictions.contains(&restriction) {
                        existing.framework_restrictions.push(restriction);
                    }
                }
            }
            None => merged.push(FrameworkAssemblyReference {
                assembly_name: assembly_name.to_string(),
                framework_restrictions: restrictions,
            }),
        }
    }

    merged
}

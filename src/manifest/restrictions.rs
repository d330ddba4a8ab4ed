//! Framework restriction merging
//!
//! A dependency declared in several framework groups arrives at the
//! optimizer once per group. The optimizer folds those entries into one per
//! (name, requirement) and simplifies the combined restriction set.

use super::NuspecDependency;
use crate::domain::{
    DotNetVersion, FrameworkIdentifier, FrameworkRestriction, FrameworkRestrictions,
    VersionRequirement,
};

/// Merges per-group dependency entries into one entry per dependency
pub trait RestrictionOptimizer {
    /// Merge and simplify; names and requirements pass through unchanged
    fn optimize(&self, dependencies: Vec<NuspecDependency>) -> Vec<NuspecDependency>;
}

/// Default merge rules:
/// 1. Entries with an empty name (framework group placeholders) are dropped
///    after they have contributed to the manifest-wide framework maximum.
/// 2. An unrestricted entry makes the merged dependency unrestricted.
/// 3. Otherwise restrictions are unioned, with `net40-client` folded into `net40`.
/// 4. For a dependency declared in more than one group, its highest .NET
///    restriction becomes `AtLeast` when no group in the manifest targets a
///    later .NET Framework. A lone group keeps its declared `Exactly`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultOptimizer;

impl DefaultOptimizer {
    /// Create a new optimizer
    pub fn new() -> Self {
        Self
    }
}

fn normalize(restriction: FrameworkRestriction) -> FrameworkRestriction {
    match restriction {
        FrameworkRestriction::Exactly(FrameworkIdentifier::DotNet(version)) => {
            FrameworkRestriction::Exactly(FrameworkIdentifier::DotNet(
                version.without_client_profile(),
            ))
        }
        other => other,
    }
}

fn max_dotnet<'a>(
    restrictions: impl Iterator<Item = &'a FrameworkRestriction>,
) -> Option<DotNetVersion> {
    restrictions
        .filter_map(|r| r.framework().dotnet_version())
        .map(DotNetVersion::without_client_profile)
        .max()
}

fn merge(
    sets: Vec<FrameworkRestrictions>,
    manifest_max: Option<DotNetVersion>,
) -> FrameworkRestrictions {
    if sets.iter().any(|set| set.is_empty()) {
        return Vec::new();
    }
    let declared_in_several_groups = sets.len() > 1;

    let mut merged: FrameworkRestrictions = Vec::new();
    for restriction in sets.into_iter().flatten().map(normalize) {
        if !merged.contains(&restriction) {
            merged.push(restriction);
        }
    }

    let local_max = max_dotnet(merged.iter()).filter(|_| declared_in_several_groups);
    if let Some(version) = local_max.filter(|v| Some(*v) == manifest_max) {
        let highest = FrameworkRestriction::Exactly(FrameworkIdentifier::DotNet(version));
        for restriction in merged.iter_mut() {
            if *restriction == highest {
                *restriction = FrameworkRestriction::AtLeast(FrameworkIdentifier::DotNet(version));
            }
        }
    }

    merged
}

impl RestrictionOptimizer for DefaultOptimizer {
    fn optimize(&self, dependencies: Vec<NuspecDependency>) -> Vec<NuspecDependency> {
        let manifest_max = max_dotnet(dependencies.iter().flat_map(|d| d.restrictions.iter()));

        let mut grouped: Vec<(String, VersionRequirement, Vec<FrameworkRestrictions>)> =
            Vec::new();
        for dependency in dependencies {
            if dependency.name.is_empty() {
                continue;
            }
            match grouped
                .iter_mut()
                .find(|(name, requirement, _)| {
                    *name == dependency.name && *requirement == dependency.requirement
                }) {
                Some((_, _, sets)) => sets.push(dependency.restrictions),
                None => grouped.push((
                    dependency.name,
                    dependency.requirement,
                    vec![dependency.restrictions],
                )),
            }
        }

        grouped
            .into_iter()
            .map(|(name, requirement, sets)| {
                NuspecDependency::new(name, requirement, merge(sets, manifest_max))
            })
            .collect()
    }
}

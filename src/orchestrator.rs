//! Add workflow orchestrator
//!
//! This module sequences the "add a package" workflow:
//! validate → declare → resolve → reference in projects → install
//!
//! The declaration file is saved before resolution runs. Any failing step
//! aborts the remaining ones.

use crate::domain::VersionRequirement;
use crate::error::AddError;
use crate::workspace::{
    DeclarationFile, InstallOptions, Installer, Project, ProjectScanner, Prompt, Resolver,
};
use tracing::{debug, info};

/// Options for a single add
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Force resolution and installation
    pub force: bool,
    /// Ask, per project, whether to add a reference to the package
    pub interactive: bool,
    /// Run the installer after resolution
    pub install: bool,
    /// Passed to the installer
    pub hard: bool,
    /// Passed to the installer
    pub no_file_copy: bool,
}

impl AddOptions {
    fn install_options(&self) -> InstallOptions {
        InstallOptions {
            force: self.force,
            hard: self.hard,
            no_file_copy: self.no_file_copy,
        }
    }
}

/// Result of a completed add
#[derive(Debug)]
pub struct AddOutcome<D, L> {
    /// Declarations including the new package, as saved
    pub declarations: D,
    /// Lock state produced by resolution
    pub lock: L,
    /// The validated version requirement
    pub requirement: VersionRequirement,
    /// Projects that received a new reference, in scan order
    pub referenced_projects: Vec<String>,
    /// Whether the installer ran
    pub installed: bool,
}

/// Coordinates the collaborators of the add workflow
pub struct AddOrchestrator<'a, R, S, I, P> {
    resolver: &'a R,
    scanner: &'a S,
    installer: &'a I,
    prompt: &'a P,
}

impl<'a, R, S, I, P> AddOrchestrator<'a, R, S, I, P>
where
    R: Resolver,
    S: ProjectScanner,
    I: Installer<Lock = R::Lock>,
    P: Prompt,
{
    /// Create a new orchestrator over the given collaborators
    pub fn new(resolver: &'a R, scanner: &'a S, installer: &'a I, prompt: &'a P) -> Self {
        Self {
            resolver,
            scanner,
            installer,
            prompt,
        }
    }

    /// Add `package` at `version` to the declarations and run the workflow
    pub fn add(
        &self,
        declarations: &R::Declarations,
        package: &str,
        version: &str,
        options: AddOptions,
    ) -> Result<AddOutcome<R::Declarations, R::Lock>, AddError> {
        let requirement = VersionRequirement::parse(version)?;
        info!(package, version = %requirement, "adding package");

        let declarations = declarations
            .add(package, version)
            .map_err(|source| AddError::Declarations { source })?;
        declarations
            .save()
            .map_err(|source| AddError::Declarations { source })?;

        let lock = self
            .resolver
            .selective_update(&declarations, Some(package), options.force)
            .map_err(|source| AddError::Resolution {
                package: package.to_string(),
                source,
            })?;
        debug!(package, "resolution finished");

        let referenced_projects = if options.interactive {
            self.reference_in_projects(&declarations, package)?
        } else {
            Vec::new()
        };

        if options.install {
            let sources = declarations.all_package_sources();
            info!(sources = sources.len(), "installing packages");
            self.installer
                .install(&sources, options.install_options(), &lock)
                .map_err(|source| AddError::Install { source })?;
        }

        Ok(AddOutcome {
            declarations,
            lock,
            requirement,
            referenced_projects,
            installed: options.install,
        })
    }

    fn reference_in_projects(
        &self,
        declarations: &R::Declarations,
        package: &str,
    ) -> Result<Vec<String>, AddError> {
        let root = declarations.root_dir();
        let projects = self
            .scanner
            .find_projects(root)
            .map_err(|source| AddError::ProjectScan {
                path: root.to_path_buf(),
                source,
            })?;

        let mut referenced = Vec::new();
        for project in projects {
            if project.has_package_installed(package) {
                debug!(project = project.name(), package, "already referenced");
                continue;
            }
            if !self
                .prompt
                .confirm(&format!("Install '{}' to {}?", package, project.name()))
            {
                continue;
            }

            let project = project.add_reference(package);
            project.save().map_err(|source| AddError::ProjectSave {
                project: project.name().to_string(),
                source,
            })?;
            info!(project = project.name(), package, "added reference");
            referenced.push(project.name().to_string());
        }
        Ok(referenced)
    }
}

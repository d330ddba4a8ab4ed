//! Collaborators of the add workflow
//!
//! The declaration file, resolver, installer, project files and prompt live
//! outside this crate. The add workflow only sequences calls through these
//! traits.

use crate::error::CollaboratorError;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A package feed the installer may download from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackageSource {
    pub url: String,
}

impl PackageSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl fmt::Display for PackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Flags forwarded to the installer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Re-download packages that are already present
    pub force: bool,
    /// Replace existing project references instead of merging
    pub hard: bool,
    /// Skip copying package content files into projects
    pub no_file_copy: bool,
}

/// The dependency declaration file
pub trait DeclarationFile: Sized {
    /// Returns the declarations with the package added or its version replaced
    fn add(&self, package: &str, version: &str) -> Result<Self, CollaboratorError>;

    /// Persists the declarations
    fn save(&self) -> Result<(), CollaboratorError>;

    fn all_package_sources(&self) -> Vec<PackageSource>;

    /// Directory the declaration file lives in; projects are searched below it
    fn root_dir(&self) -> &Path;
}

/// Dependency resolution
pub trait Resolver {
    type Declarations: DeclarationFile;
    type Lock;

    /// Resolve, updating only `package` (or everything when `None`)
    fn selective_update(
        &self,
        declarations: &Self::Declarations,
        package: Option<&str>,
        force: bool,
    ) -> Result<Self::Lock, CollaboratorError>;
}

/// Materializes resolved packages on disk
pub trait Installer {
    type Lock;

    fn install(
        &self,
        sources: &[PackageSource],
        options: InstallOptions,
        lock: &Self::Lock,
    ) -> Result<(), CollaboratorError>;
}

/// A consuming project's reference file
pub trait Project: Sized {
    fn name(&self) -> &str;

    fn has_package_installed(&self, package: &str) -> bool;

    /// Returns the project with a reference to `package` added
    fn add_reference(&self, package: &str) -> Self;

    fn save(&self) -> Result<(), CollaboratorError>;
}

/// Enumerates projects below a directory
pub trait ProjectScanner {
    type Project: Project;

    fn find_projects(&self, dir: &Path) -> Result<Vec<Self::Project>, CollaboratorError>;
}

/// Yes/no questions asked in interactive mode
pub trait Prompt {
    fn confirm(&self, question: &str) -> bool;
}

/// Prompt that declines every question
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclineAll;

impl Prompt for DeclineAll {
    fn confirm(&self, _question: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_source_display() {
        let source = PackageSource::new("https://api.nuget.org/v3/index.json");
        assert_eq!(source.to_string(), "https://api.nuget.org/v3/index.json");
    }

    #[test]
    fn test_install_options_default_is_all_off() {
        let options = InstallOptions::default();
        assert!(!options.force);
        assert!(!options.hard);
        assert!(!options.no_file_copy);
    }

    #[test]
    fn test_decline_all() {
        assert!(!DeclineAll.confirm("Install to Foo.csproj?"));
    }
}

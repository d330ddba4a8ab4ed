//! Application error types using thiserror
//!
//! Error hierarchy:
//! - SemVerError: A single version token could not be parsed
//! - ParseError: Issues with NuGet version-range text
//! - ManifestError: Issues with nuspec manifest loading
//! - AddError: A step of the add workflow failed
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Error type returned by external collaborators (resolver, installer, projects)
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Version token errors
    #[error(transparent)]
    SemVer(#[from] SemVerError),

    /// Version range errors
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Add workflow errors
    #[error(transparent)]
    Add(#[from] AddError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A version token that is not a valid NuGet version
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid version '{text}': {message}")]
pub struct SemVerError {
    /// The offending text
    pub text: String,
    /// What was wrong with it
    pub message: String,
}

impl SemVerError {
    /// Creates a new SemVerError
    pub fn new(text: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            message: message.into(),
        }
    }
}

/// Errors produced while parsing NuGet version-range text
///
/// Every variant carries the complete input text so the caller can point at
/// the malformed attribute.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The interval does not open with `[`/`(` or close with `]`/`)`
    #[error("unable to parse bound '{bound}' in version range '{text}'")]
    InvalidBound { text: String, bound: char },

    /// A version inside the range is not a valid version
    #[error("unable to parse version '{version}' in version range '{text}': {message}")]
    InvalidVersion {
        text: String,
        version: String,
        message: String,
    },

    /// One-sided interval with a bound pair that has no meaning, e.g. `[,1.0)`
    #[error("unsupported bound combination in version range '{text}'")]
    InvalidBoundCombination { text: String },

    /// Interval form with zero or more than two versions
    #[error("expected one or two versions in version range '{text}', found {count}")]
    InvalidVersionCount { text: String, count: usize },

    /// Interval whose lower version is above its upper version
    #[error("lower version is greater than upper version in version range '{text}'")]
    InvertedRange { text: String },
}

impl ParseError {
    /// Creates a new InvalidBound error
    pub fn invalid_bound(text: impl Into<String>, bound: char) -> Self {
        ParseError::InvalidBound {
            text: text.into(),
            bound,
        }
    }

    /// Creates a new InvalidVersion error from a failed version token
    pub fn invalid_version(text: impl Into<String>, source: SemVerError) -> Self {
        ParseError::InvalidVersion {
            text: text.into(),
            version: source.text,
            message: source.message,
        }
    }

    /// Creates a new InvalidBoundCombination error
    pub fn invalid_bound_combination(text: impl Into<String>) -> Self {
        ParseError::InvalidBoundCombination { text: text.into() }
    }

    /// Creates a new InvalidVersionCount error
    pub fn invalid_version_count(text: impl Into<String>, count: usize) -> Self {
        ParseError::InvalidVersionCount {
            text: text.into(),
            count,
        }
    }

    /// Returns the raw range text that failed to parse
    pub fn text(&self) -> &str {
        match self {
            ParseError::InvalidBound { text, .. }
            | ParseError::InvalidVersion { text, .. }
            | ParseError::InvalidBoundCombination { text }
            | ParseError::InvalidVersionCount { text, .. }
            | ParseError::InvertedRange { text } => text,
        }
    }
}

/// Errors related to nuspec manifest loading
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML
    #[error("failed to parse XML in {path}: {message}")]
    XmlParseError { path: PathBuf, message: String },

    /// `package/metadata/id` is absent or empty
    #[error("unable to find package id in {path}")]
    MissingId { path: PathBuf },

    /// A `dependency` element without an `id` attribute
    #[error("dependency without id attribute in {path}")]
    MissingDependencyId { path: PathBuf },

    /// A `dependency` element whose version attribute is not a valid range
    #[error("invalid dependency version in {path}: {source}")]
    InvalidVersion {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new XmlParseError
    pub fn xml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::XmlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new MissingId error
    pub fn missing_id(path: impl Into<PathBuf>) -> Self {
        ManifestError::MissingId { path: path.into() }
    }

    /// Creates a new MissingDependencyId error
    pub fn missing_dependency_id(path: impl Into<PathBuf>) -> Self {
        ManifestError::MissingDependencyId { path: path.into() }
    }

    /// Creates a new InvalidVersion error
    pub fn invalid_version(path: impl Into<PathBuf>, source: ParseError) -> Self {
        ManifestError::InvalidVersion {
            path: path.into(),
            source,
        }
    }

    /// Returns the manifest path this error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            ManifestError::ReadError { path, .. }
            | ManifestError::XmlParseError { path, .. }
            | ManifestError::MissingId { path }
            | ManifestError::MissingDependencyId { path }
            | ManifestError::InvalidVersion { path, .. } => path,
        }
    }
}

/// Errors raised by the add workflow, tagged with the step that failed
#[derive(Error, Debug)]
pub enum AddError {
    /// The requested version is not a valid range
    #[error(transparent)]
    InvalidVersion(#[from] ParseError),

    /// Reading, updating or saving the dependency declarations failed
    #[error("failed to update dependency declarations: {source}")]
    Declarations {
        #[source]
        source: CollaboratorError,
    },

    /// Selective resolution failed
    #[error("failed to resolve '{package}': {source}")]
    Resolution {
        package: String,
        #[source]
        source: CollaboratorError,
    },

    /// Enumerating projects failed
    #[error("failed to find projects in {path}: {source}")]
    ProjectScan {
        path: PathBuf,
        #[source]
        source: CollaboratorError,
    },

    /// Writing a project's reference file failed
    #[error("failed to save project {project}: {source}")]
    ProjectSave {
        project: String,
        #[source]
        source: CollaboratorError,
    },

    /// Installation failed
    #[error("failed to install packages: {source}")]
    Install {
        #[source]
        source: CollaboratorError,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

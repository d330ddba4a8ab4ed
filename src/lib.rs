//! nuspec-meta - NuGet package metadata library
//!
//! This library provides:
//! - The NuGet version-range algebra (parse, format, membership)
//! - A `.nuspec` manifest loader with framework restriction merging
//! - The "add a package" workflow over pluggable collaborators

pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod workspace;

//! Version-range text parsers
//!
//! This module provides the NuGet range syntax used by nuspec `version`
//! attributes and by callers supplying raw range text.

mod nuget;

pub use nuget::{format, parse, parse_optional};

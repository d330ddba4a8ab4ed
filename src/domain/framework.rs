//! Target framework identifiers and restrictions
//!
//! Handles monikers like:
//! - .NET Framework: `net45`, `net40-client`, `net4.5.1`, `.NETFramework4.5`
//! - Silverlight: `sl5`
//! - Windows Phone: `wp8`, `wpa81`
//! - Windows Store: `win8`, `netcore45`
//! - Xamarin: `monoandroid`, `monotouch`, `xamarinios`, `xamarinmac`

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// .NET Framework versions, in release order
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DotNetVersion {
    V1,
    V1_1,
    V2,
    V3,
    V3_5,
    V4_Client,
    V4,
    V4_5,
    V4_5_1,
    V4_5_2,
    V4_5_3,
    V4_6,
    V4_6_1,
    V4_6_2,
}

impl DotNetVersion {
    /// Returns the short moniker for this version
    pub fn moniker(&self) -> &'static str {
        match self {
            DotNetVersion::V1 => "net10",
            DotNetVersion::V1_1 => "net11",
            DotNetVersion::V2 => "net20",
            DotNetVersion::V3 => "net30",
            DotNetVersion::V3_5 => "net35",
            DotNetVersion::V4_Client => "net40-client",
            DotNetVersion::V4 => "net40",
            DotNetVersion::V4_5 => "net45",
            DotNetVersion::V4_5_1 => "net451",
            DotNetVersion::V4_5_2 => "net452",
            DotNetVersion::V4_5_3 => "net453",
            DotNetVersion::V4_6 => "net46",
            DotNetVersion::V4_6_1 => "net461",
            DotNetVersion::V4_6_2 => "net462",
        }
    }

    /// Maps the client profile onto the full framework it is a subset of
    pub fn without_client_profile(self) -> Self {
        match self {
            DotNetVersion::V4_Client => DotNetVersion::V4,
            other => other,
        }
    }
}

/// A target platform a package can be restricted to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrameworkIdentifier {
    DotNet(DotNetVersion),
    /// Silverlight with its version, e.g. `v5.0`
    Silverlight(String),
    /// Windows Phone with its version, e.g. `v8.0`
    WindowsPhone(String),
    /// Windows Store (netcore) with its version, e.g. `v4.5`
    Windows(String),
    MonoAndroid,
    MonoTouch,
    XamariniOS,
    XamarinMac,
}

impl FrameworkIdentifier {
    /// Returns the .NET Framework version if this is a desktop framework
    pub fn dotnet_version(&self) -> Option<DotNetVersion> {
        match self {
            FrameworkIdentifier::DotNet(version) => Some(*version),
            _ => None,
        }
    }
}

fn compact(version: &str) -> String {
    version.trim_start_matches('v').replace('.', "")
}

impl fmt::Display for FrameworkIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameworkIdentifier::DotNet(version) => write!(f, "{}", version.moniker()),
            FrameworkIdentifier::Silverlight(version) => write!(f, "sl{}", compact(version)),
            FrameworkIdentifier::WindowsPhone(version) if version == "v8.1" => write!(f, "wpa81"),
            FrameworkIdentifier::WindowsPhone(version) => write!(f, "wp{}", compact(version)),
            FrameworkIdentifier::Windows(version) => write!(f, "netcore{}", compact(version)),
            FrameworkIdentifier::MonoAndroid => write!(f, "monoandroid"),
            FrameworkIdentifier::MonoTouch => write!(f, "monotouch"),
            FrameworkIdentifier::XamariniOS => write!(f, "xamarinios"),
            FrameworkIdentifier::XamarinMac => write!(f, "xamarinmac"),
        }
    }
}

impl Serialize for FrameworkIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// `net` followed by version digits (dots already removed) and an optional profile
static DOTNET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^net(\d{1,3})(-client|-full)?$").unwrap());

/// Detection of framework identifiers from manifest monikers
pub struct FrameworkDetection;

impl FrameworkDetection {
    /// Extract a framework from a moniker; unknown monikers yield `None`
    pub fn extract(token: &str) -> Option<FrameworkIdentifier> {
        let lowered = token.trim().to_ascii_lowercase();
        if lowered.is_empty() {
            return None;
        }

        let normalized = match lowered.strip_prefix(".netframework") {
            Some(rest) => format!(
                "net{}",
                rest.trim_start_matches(",version=").trim_start_matches('v')
            ),
            None => lowered,
        };

        if normalized.starts_with("net") && !normalized.starts_with("netcore") {
            return Self::extract_dotnet(&normalized.replace('.', ""));
        }

        match normalized.as_str() {
            "sl3" | "sl30" => Some(FrameworkIdentifier::Silverlight("v3.0".to_string())),
            "sl4" | "sl40" => Some(FrameworkIdentifier::Silverlight("v4.0".to_string())),
            "sl5" | "sl50" => Some(FrameworkIdentifier::Silverlight("v5.0".to_string())),
            "win8" | "windows8" | "win80" | "netcore45" | "win" | "winv45" => {
                Some(FrameworkIdentifier::Windows("v4.5".to_string()))
            }
            "win81" | "windows81" | "netcore451" | "win8.1" => {
                Some(FrameworkIdentifier::Windows("v4.5.1".to_string()))
            }
            "wp7" | "wp70" | "sl4-wp7" | "sl4-wp70" => {
                Some(FrameworkIdentifier::WindowsPhone("v7.0".to_string()))
            }
            "wp71" | "sl4-wp71" | "sl4-wp" => {
                Some(FrameworkIdentifier::WindowsPhone("v7.1".to_string()))
            }
            "wp8" | "wp80" => Some(FrameworkIdentifier::WindowsPhone("v8.0".to_string())),
            "wpa81" => Some(FrameworkIdentifier::WindowsPhone("v8.1".to_string())),
            "monoandroid" => Some(FrameworkIdentifier::MonoAndroid),
            "monotouch" => Some(FrameworkIdentifier::MonoTouch),
            "xamarinios" | "xamarin.ios" => Some(FrameworkIdentifier::XamariniOS),
            "xamarinmac" | "xamarin.mac" => Some(FrameworkIdentifier::XamarinMac),
            _ => None,
        }
    }

    fn extract_dotnet(token: &str) -> Option<FrameworkIdentifier> {
        let caps = DOTNET_RE.captures(token)?;
        let client = caps.get(2).map(|m| m.as_str()) == Some("-client");
        let version = match caps.get(1)?.as_str() {
            "1" | "10" => DotNetVersion::V1,
            "11" => DotNetVersion::V1_1,
            "2" | "20" => DotNetVersion::V2,
            "3" | "30" => DotNetVersion::V3,
            "35" => DotNetVersion::V3_5,
            "4" | "40" | "403" if client => DotNetVersion::V4_Client,
            "4" | "40" | "403" => DotNetVersion::V4,
            "45" => DotNetVersion::V4_5,
            "451" => DotNetVersion::V4_5_1,
            "452" => DotNetVersion::V4_5_2,
            "453" => DotNetVersion::V4_5_3,
            "46" => DotNetVersion::V4_6,
            "461" => DotNetVersion::V4_6_1,
            "462" => DotNetVersion::V4_6_2,
            _ => return None,
        };
        Some(FrameworkIdentifier::DotNet(version))
    }
}

/// Restriction of a dependency or reference to target frameworks
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameworkRestriction {
    /// Applies to this framework only
    Exactly(FrameworkIdentifier),
    /// Applies to this framework and every later version of it
    AtLeast(FrameworkIdentifier),
}

impl FrameworkRestriction {
    /// Returns the framework this restriction is anchored at
    pub fn framework(&self) -> &FrameworkIdentifier {
        match self {
            FrameworkRestriction::Exactly(framework) | FrameworkRestriction::AtLeast(framework) => {
                framework
            }
        }
    }
}

impl fmt::Display for FrameworkRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameworkRestriction::Exactly(framework) => write!(f, "{}", framework),
            FrameworkRestriction::AtLeast(framework) => write!(f, ">= {}", framework),
        }
    }
}

impl Serialize for FrameworkRestriction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered restriction set; empty means "every framework"
pub type FrameworkRestrictions = Vec<FrameworkRestriction>;

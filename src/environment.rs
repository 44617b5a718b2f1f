//! Visitor environment detection.
//!
//! The operating system family and CPU architecture are derived from the
//! identification strings a browser reports (`navigator.userAgent` and
//! `navigator.platform`). Without a browser context both are `unknown`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::release::{AssetArch, Platform};

/// Identification strings reported by the visitor's browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserContext {
    pub user_agent: String,
    pub platform: String,
}

impl BrowserContext {
    pub fn new(user_agent: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            platform: platform.into(),
        }
    }

    /// Builds a context from optional strings; `None` when neither is known.
    pub fn from_parts(user_agent: Option<String>, platform: Option<String>) -> Option<Self> {
        if user_agent.is_none() && platform.is_none() {
            return None;
        }
        Some(Self {
            user_agent: user_agent.unwrap_or_default(),
            platform: platform.unwrap_or_default(),
        })
    }
}

/// Operating system family of the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Windows,
    Macos,
    Linux,
    #[default]
    Unknown,
}

impl OsFamily {
    /// The installer platform for this OS family, if it has one.
    pub fn platform(&self) -> Option<Platform> {
        match self {
            OsFamily::Windows => Some(Platform::Windows),
            OsFamily::Macos => Some(Platform::Macos),
            OsFamily::Linux => Some(Platform::Linux),
            OsFamily::Unknown => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OsFamily::Macos => "macOS",
            OsFamily::Windows => "Windows",
            OsFamily::Linux => "Linux",
            OsFamily::Unknown => "Unknown",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Windows => "windows",
            OsFamily::Macos => "macos",
            OsFamily::Linux => "linux",
            OsFamily::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture of the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X64,
    Arm64,
    #[default]
    Unknown,
}

impl Architecture {
    /// Whether an asset built for `arch` is an exact match for this architecture.
    pub fn matches(&self, arch: AssetArch) -> bool {
        matches!(
            (self, arch),
            (Architecture::X64, AssetArch::X64) | (Architecture::Arm64, AssetArch::Arm64)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X64 => "x64",
            Architecture::Arm64 => "arm64",
            Architecture::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detected environment of a single page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub os_family: OsFamily,
    pub architecture: Architecture,
}

impl Environment {
    pub fn new(os_family: OsFamily, architecture: Architecture) -> Self {
        Self {
            os_family,
            architecture,
        }
    }

    pub fn detect(ctx: Option<&BrowserContext>) -> Self {
        Self {
            os_family: detect_platform(ctx),
            architecture: detect_architecture(ctx),
        }
    }
}

/// Classifies the OS family. macOS is checked before Windows before Linux.
pub fn detect_platform(ctx: Option<&BrowserContext>) -> OsFamily {
    let Some(ctx) = ctx else {
        return OsFamily::Unknown;
    };

    let user_agent = ctx.user_agent.to_lowercase();
    let platform = ctx.platform.to_lowercase();

    if platform.contains("mac") || user_agent.contains("mac os") {
        OsFamily::Macos
    } else if platform.contains("win") || user_agent.contains("windows") {
        OsFamily::Windows
    } else if platform.contains("linux") || user_agent.contains("linux") {
        OsFamily::Linux
    } else {
        OsFamily::Unknown
    }
}

/// Classifies the CPU architecture.
///
/// Only Apple Silicon is recognized as `arm64`; every other browser is
/// assumed to run on `x64`.
pub fn detect_architecture(ctx: Option<&BrowserContext>) -> Architecture {
    let Some(ctx) = ctx else {
        return Architecture::Unknown;
    };

    let user_agent = ctx.user_agent.to_lowercase();
    if user_agent.contains("mac") && user_agent.contains("arm64") {
        Architecture::Arm64
    } else {
        Architecture::X64
    }
}

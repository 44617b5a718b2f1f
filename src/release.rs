//! Normalized release model shared by the fetcher, cache, resolver and CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target operating system of an installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Macos,
    Linux,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Macos => "macos",
            Platform::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture an installer was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetArch {
    #[default]
    X64,
    Arm64,
    Universal,
}

impl AssetArch {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetArch::X64 => "x64",
            AssetArch::Arm64 => "arm64",
            AssetArch::Universal => "universal",
        }
    }
}

impl fmt::Display for AssetArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Installer package format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Exe,
    Dmg,
    Deb,
    Rpm,
    Zip,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Exe => "exe",
            FileType::Dmg => "dmg",
            FileType::Deb => "deb",
            FileType::Rpm => "rpm",
            FileType::Zip => "zip",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file attached to an upstream release, as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReleaseAsset {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
    pub size: u64,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// A release asset that was recognized as an installer for a known platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAsset {
    pub platform: Platform,
    pub architecture: AssetArch,
    pub file_type: FileType,
    pub url: String,
    pub size: u64,
    pub filename: String,
}

/// Release record consumed by the download offer and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseInfo {
    pub version: String,
    pub release_date: DateTime<Utc>,
    pub release_notes: String,
    pub platforms: Vec<PlatformAsset>,
    pub is_prerelease: bool,
    /// Sum over every raw asset of the release, classified or not.
    pub download_count: u64,
}

/// Strips a single leading `v` from a release tag.
pub fn normalize_version(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Parses an RFC 3339 publish timestamp, falling back to the Unix epoch.
pub fn parse_release_date(published_at: Option<&str>) -> DateTime<Utc> {
    published_at
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_version() {
        assert_eq!(normalize_version("v2.3.1"), "2.3.1");
        assert_eq!(normalize_version("2.3.1"), "2.3.1");
        assert_eq!(normalize_version("vv1"), "v1");
        assert_eq!(normalize_version(""), "");
    }

    #[test]
    fn test_parse_release_date() {
        let date = parse_release_date(Some("2024-03-01T12:30:00Z"));
        assert_eq!(date.to_rfc3339(), "2024-03-01T12:30:00+00:00");
    }

    #[test]
    fn test_parse_release_date_defaults_to_epoch() {
        assert_eq!(parse_release_date(None), DateTime::UNIX_EPOCH);
        assert_eq!(parse_release_date(Some("yesterday")), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_raw_asset_deserialize() {
        let asset: RawReleaseAsset = serde_json::from_str(
            r#"{
                "name": "app.dmg",
                "browser_download_url": "https://example.com/app.dmg",
                "size": 42,
                "download_count": 7,
                "content_type": "application/x-apple-diskimage"
            }"#,
        )
        .unwrap();

        assert_eq!(asset.name, "app.dmg");
        assert_eq!(asset.download_url, "https://example.com/app.dmg");
        assert_eq!(asset.size, 42);
        assert_eq!(asset.download_count, 7);
    }

    #[test]
    fn test_enum_serialization_is_lowercase() {
        assert_eq!(serde_json::to_string(&Platform::Macos).unwrap(), r#""macos""#);
        assert_eq!(serde_json::to_string(&AssetArch::Arm64).unwrap(), r#""arm64""#);
        assert_eq!(serde_json::to_string(&FileType::Deb).unwrap(), r#""deb""#);
    }
}

//! Built-in release shown before the live fetch settles and whenever it
//! produces nothing usable.

use chrono::{DateTime, NaiveDate, Utc};

use crate::release::{AssetArch, FileType, Platform, PlatformAsset, ReleaseInfo};

pub const FALLBACK_VERSION: &str = "v1.0.0";

const DOWNLOAD_BASE: &str =
    "https://github.com/kauredo/basketball-video-analyzer/releases/latest/download";

const RELEASE_NOTES: &str = "# Basketball Video Analyzer v1.0.0

## Initial Release

Video analysis for basketball coaches: cut, organize and export game footage.

### Key Features
- Time search using HH:MM:SS
- Category presets and hierarchical categories
- Separate projects per game
- Frame-by-frame cutting with keyboard shortcuts
- Clip export into an organized folder structure
- English and Portuguese
- Windows, macOS and Linux builds";

pub fn fallback_release() -> ReleaseInfo {
    ReleaseInfo {
        version: FALLBACK_VERSION.to_string(),
        release_date: release_date(),
        release_notes: RELEASE_NOTES.to_string(),
        platforms: vec![
            asset(
                Platform::Windows,
                FileType::Exe,
                "basketball-video-analyzer-setup.exe",
                85_000_000,
            ),
            asset(
                Platform::Macos,
                FileType::Dmg,
                "basketball-video-analyzer.dmg",
                95_000_000,
            ),
            asset(
                Platform::Linux,
                FileType::Deb,
                "basketball-video-analyzer.deb",
                80_000_000,
            ),
        ],
        is_prerelease: false,
        download_count: 1250,
    }
}

fn release_date() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 12, 20)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::UNIX_EPOCH)
}

fn asset(platform: Platform, file_type: FileType, filename: &str, size: u64) -> PlatformAsset {
    PlatformAsset {
        platform,
        architecture: AssetArch::X64,
        file_type,
        url: format!("{}/{}", DOWNLOAD_BASE, filename),
        size,
        filename: filename.to_string(),
    }
}

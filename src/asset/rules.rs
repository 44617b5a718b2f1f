//! Ordered filename rules for installer classification.
//!
//! Rules are evaluated top to bottom against the lower-cased filename and the
//! first rule with a matching marker wins. Markers overlap (`tool-win.zip`
//! contains both `win` and `.zip`), so the order is part of the contract:
//!
//! 1. Windows: `.exe`, `windows`, `win32`
//! 2. macOS: `.dmg`, `darwin`, `macos` (Apple Silicon if `arm64` / `apple-silicon`)
//! 3. Linux: `.deb`
//! 4. Linux: `.rpm`
//! 5. Zip archives: `.zip`, platform from `win`, then `mac` / `darwin`, else Linux

use crate::release::{AssetArch, FileType, Platform};

/// Result of classifying a single filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub platform: Platform,
    pub architecture: AssetArch,
    pub file_type: FileType,
}

impl Classification {
    fn new(platform: Platform, file_type: FileType) -> Self {
        Self {
            platform,
            architecture: AssetArch::default(),
            file_type,
        }
    }
}

struct Rule {
    markers: &'static [&'static str],
    resolve: fn(&str) -> Classification,
}

impl Rule {
    fn matches(&self, name: &str) -> bool {
        self.markers.iter().any(|marker| name.contains(marker))
    }
}

const RULES: &[Rule] = &[
    Rule {
        markers: &[".exe", "windows", "win32"],
        resolve: windows_installer,
    },
    Rule {
        markers: &[".dmg", "darwin", "macos"],
        resolve: macos_disk_image,
    },
    Rule {
        markers: &[".deb"],
        resolve: debian_package,
    },
    Rule {
        markers: &[".rpm"],
        resolve: rpm_package,
    },
    Rule {
        markers: &[".zip"],
        resolve: zip_archive,
    },
];

/// Classifies a filename; `None` when no rule applies.
pub fn classify_name(name: &str) -> Option<Classification> {
    let name = name.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&name))
        .map(|rule| (rule.resolve)(&name))
}

fn windows_installer(_name: &str) -> Classification {
    Classification::new(Platform::Windows, FileType::Exe)
}

fn macos_disk_image(name: &str) -> Classification {
    let mut classification = Classification::new(Platform::Macos, FileType::Dmg);
    if name.contains("arm64") || name.contains("apple-silicon") {
        classification.architecture = AssetArch::Arm64;
    }
    classification
}

fn debian_package(_name: &str) -> Classification {
    Classification::new(Platform::Linux, FileType::Deb)
}

fn rpm_package(_name: &str) -> Classification {
    Classification::new(Platform::Linux, FileType::Rpm)
}

fn zip_archive(name: &str) -> Classification {
    let platform = if name.contains("win") {
        Platform::Windows
    } else if name.contains("mac") || name.contains("darwin") {
        Platform::Macos
    } else {
        Platform::Linux
    };
    Classification::new(platform, FileType::Zip)
}

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;

use crate::environment::Environment;
use crate::format::format_file_size;
use crate::offer::{DownloadOffer, OfferSource};
use crate::release::{PlatformAsset, ReleaseInfo};

pub(crate) const NO_RELEASE: &str = "No release available";
pub(crate) const NO_RELEASES: &str = "No releases available";

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

pub(crate) fn release(release: &ReleaseInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Version: {}", release.version);
    let _ = writeln!(out, "Released: {}", release.release_date.format("%Y-%m-%d"));
    if release.is_prerelease {
        let _ = writeln!(out, "Pre-release: yes");
    }
    let _ = writeln!(out, "Downloads: {}", release.download_count);

    if release.platforms.is_empty() {
        let _ = write!(out, "Installers: none");
    } else {
        let _ = write!(out, "Installers:");
        for asset in &release.platforms {
            let _ = write!(out, "\n{}", installer_line(asset));
        }
    }
    out
}

fn installer_line(asset: &PlatformAsset) -> String {
    format!(
        "  {}/{} {:<4} {:>9}  {}\n    {}",
        asset.platform,
        asset.architecture,
        asset.file_type.as_str(),
        format_file_size(asset.size),
        asset.filename,
        asset.url
    )
}

pub(crate) fn release_list(releases: &[ReleaseInfo]) -> String {
    if releases.is_empty() {
        return NO_RELEASES.to_string();
    }

    releases
        .iter()
        .map(|r| {
            let mut line = format!(
                "{}  {}  {} installer(s)",
                r.version,
                r.release_date.format("%Y-%m-%d"),
                r.platforms.len()
            );
            if r.is_prerelease {
                line.push_str("  (pre-release)");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn offer(offer: &DownloadOffer) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", offer.label());
    let _ = writeln!(out, "{}", offer.detail());
    if let Some(url) = offer.download_url() {
        let _ = writeln!(out, "{}", url);
    }
    let _ = writeln!(
        out,
        "Detected: {} ({})",
        offer.environment.os_family.display_name(),
        offer.environment.architecture
    );
    let _ = write!(out, "Source: {}", offer.source);
    out
}

/// Machine readable form of a [`DownloadOffer`], including the derived captions.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OfferView<'a> {
    pub label: String,
    pub detail: String,
    pub download_url: Option<&'a str>,
    pub version: &'a str,
    pub source: OfferSource,
    pub environment: Environment,
    pub recommended: Option<&'a PlatformAsset>,
}

impl<'a> From<&'a DownloadOffer> for OfferView<'a> {
    fn from(offer: &'a DownloadOffer) -> Self {
        OfferView {
            label: offer.label(),
            detail: offer.detail(),
            download_url: offer.download_url(),
            version: &offer.release.version,
            source: offer.source,
            environment: offer.environment,
            recommended: offer.recommended.as_ref(),
        }
    }
}

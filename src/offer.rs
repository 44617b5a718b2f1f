//! The download offer shown to a visitor.
//!
//! Ties the pipeline together: detect the environment, fetch the latest
//! release through the cache, fall back to the built-in release when the
//! fetch yields nothing, and pick the installer. Every failure degrades to
//! fallback data; an offer is always produced.

use log::warn;
use serde::Serialize;
use std::fmt;

use crate::cache::{CachedReleases, Clock};
use crate::environment::{BrowserContext, Environment};
use crate::fallback::fallback_release;
use crate::format::format_file_size;
use crate::github::ReleaseSource;
use crate::recommend::recommend;
use crate::release::{PlatformAsset, ReleaseInfo};

/// Where the offered release came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferSource {
    Live,
    Fallback,
}

impl OfferSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferSource::Live => "live",
            OfferSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for OfferSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadOffer {
    pub environment: Environment,
    pub release: ReleaseInfo,
    pub recommended: Option<PlatformAsset>,
    pub source: OfferSource,
}

impl DownloadOffer {
    pub fn new(environment: Environment, release: ReleaseInfo, source: OfferSource) -> Self {
        let recommended = recommend(&release.platforms, &environment).cloned();
        Self {
            environment,
            release,
            recommended,
            source,
        }
    }

    /// Button caption.
    pub fn label(&self) -> String {
        match self.recommended {
            Some(_) => format!("Download for {}", self.environment.os_family.display_name()),
            None => "Download Available".to_string(),
        }
    }

    /// Secondary line: version, plus the installer size when one is recommended.
    pub fn detail(&self) -> String {
        match &self.recommended {
            Some(asset) => format!(
                "{} \u{2022} {}",
                self.release.version,
                format_file_size(asset.size)
            ),
            None => self.release.version.clone(),
        }
    }

    pub fn download_url(&self) -> Option<&str> {
        self.recommended.as_ref().map(|a| a.url.as_str())
    }
}

/// Resolves the offer for a visitor. Never fails.
#[tracing::instrument(skip(releases, ctx))]
pub async fn resolve_offer<S: ReleaseSource, C: Clock>(
    releases: &mut CachedReleases<S, C>,
    ctx: Option<&BrowserContext>,
) -> DownloadOffer {
    let environment = Environment::detect(ctx);

    let (release, source) = match releases.get_cached_latest_release().await {
        Ok(Some(release)) => (release, OfferSource::Live),
        Ok(None) => (fallback_release(), OfferSource::Fallback),
        Err(e) => {
            warn!("Failed to fetch release data: {}", e);
            (fallback_release(), OfferSource::Fallback)
        }
    };

    DownloadOffer::new(environment, release, source)
}

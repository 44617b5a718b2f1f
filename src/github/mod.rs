//! Release feed backed by the GitHub REST API.

mod client;
mod types;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;

use crate::asset::classify;
use crate::release::{ReleaseInfo, normalize_version, parse_release_date};

pub use client::GitHubReleases;
pub use types::Release;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repository whose releases are offered for download.
pub const REPO_OWNER: &str = "kauredo";
pub const REPO_NAME: &str = "basketball-video-analyzer";

/// Number of releases requested by [`ReleaseSource::get_all_releases`].
pub const RECENT_RELEASES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    /// The product repository.
    pub fn product() -> Self {
        RepoId {
            owner: REPO_OWNER.to_string(),
            repo: REPO_NAME.to_string(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// The upstream API quota is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitExceeded {
    pub status: u16,
    pub reset_at: DateTime<Utc>,
}

impl fmt::Display for RateLimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GitHub API rate limit exceeded (HTTP {}). Try again after {}.",
            self.status,
            self.reset_at.to_rfc3339()
        )
    }
}

impl std::error::Error for RateLimitExceeded {}

/// Source of release information.
///
/// `get_latest_release` distinguishes three outcomes: a release, no usable
/// result (`Ok(None)`, for any transient or unexpected failure), and an
/// exhausted rate limit. `get_all_releases` folds every failure into an
/// empty list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn get_latest_release(&self) -> Result<Option<ReleaseInfo>, RateLimitExceeded>;
    async fn get_all_releases(&self) -> Vec<ReleaseInfo>;
}

impl From<Release> for ReleaseInfo {
    fn from(r: Release) -> Self {
        ReleaseInfo {
            version: normalize_version(&r.tag_name).to_string(),
            release_date: parse_release_date(r.published_at.as_deref()),
            release_notes: r.body.unwrap_or_default(),
            platforms: classify(&r.assets),
            is_prerelease: r.prerelease,
            download_count: r.assets.iter().map(|a| a.download_count).sum(),
        }
    }
}

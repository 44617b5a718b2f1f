use log::debug;

use crate::github::{RateLimitExceeded, ReleaseSource};
use crate::release::ReleaseInfo;

use super::{Cache, Clock, SystemClock};

pub const LATEST_RELEASE_KEY: &str = "latest-release";
pub const LATEST_RELEASE_TTL_MINUTES: u64 = 10;

/// A [`ReleaseSource`] fronted by a [`Cache`] for the latest release.
pub struct CachedReleases<S, C = SystemClock> {
    source: S,
    cache: Cache<ReleaseInfo, C>,
}

impl<S: ReleaseSource> CachedReleases<S> {
    pub fn new(source: S) -> Self {
        Self::with_cache(source, Cache::new())
    }
}

impl<S: ReleaseSource, C: Clock> CachedReleases<S, C> {
    pub fn with_cache(source: S, cache: Cache<ReleaseInfo, C>) -> Self {
        Self { source, cache }
    }

    pub fn cache_mut(&mut self) -> &mut Cache<ReleaseInfo, C> {
        &mut self.cache
    }

    /// Latest release, served from the cache for ten minutes after a
    /// successful fetch. Failed fetches are never cached.
    #[tracing::instrument(skip(self))]
    pub async fn get_cached_latest_release(
        &mut self,
    ) -> Result<Option<ReleaseInfo>, RateLimitExceeded> {
        if let Some(release) = self.cache.get(LATEST_RELEASE_KEY) {
            debug!("Serving release {} from cache", release.version);
            return Ok(Some(release.clone()));
        }

        let release = self.source.get_latest_release().await?;
        if let Some(release) = &release {
            self.cache
                .set(LATEST_RELEASE_KEY, release.clone(), LATEST_RELEASE_TTL_MINUTES);
        }

        Ok(release)
    }
}

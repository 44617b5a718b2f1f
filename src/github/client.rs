use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error, warn};

use crate::http::{ApiError, HttpClient};
use crate::release::ReleaseInfo;

use super::types::Release;
use super::{DEFAULT_API_URL, RECENT_RELEASES, RateLimitExceeded, ReleaseSource, RepoId};

/// Fetches releases of a single repository from the GitHub REST API.
pub struct GitHubReleases {
    http_client: HttpClient,
    api_url: String,
    repo: RepoId,
}

impl GitHubReleases {
    /// Releases of the product repository on the public API.
    pub fn new(http_client: HttpClient) -> Self {
        Self::with_api_url(http_client, DEFAULT_API_URL)
    }

    pub fn with_api_url(http_client: HttpClient, api_url: &str) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            repo: RepoId::product(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    async fn fetch_latest(&self) -> Result<Release> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, self.repo.owner, self.repo.repo
        );
        debug!("Fetching latest release from {}...", url);
        self.http_client.get_json(&url).await
    }

    async fn fetch_recent(&self) -> Result<Vec<Release>> {
        let url = format!(
            "{}/repos/{}/{}/releases",
            self.api_url, self.repo.owner, self.repo.repo
        );
        debug!("Fetching {} most recent releases from {}...", RECENT_RELEASES, url);
        self.http_client
            .get_json_with_query(&url, &[("per_page", &RECENT_RELEASES.to_string())])
            .await
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleases {
    #[tracing::instrument(skip(self))]
    async fn get_latest_release(&self) -> Result<Option<ReleaseInfo>, RateLimitExceeded> {
        match self.fetch_latest().await {
            Ok(release) => Ok(Some(release.into())),
            Err(e) => {
                error!("Failed to fetch latest release of {}: {:#}", self.repo, e);
                if let Some(ApiError::RateLimitExceeded { status, reset_at }) =
                    e.downcast_ref::<ApiError>()
                {
                    return Err(RateLimitExceeded {
                        status: *status,
                        reset_at: *reset_at,
                    });
                }
                Ok(None)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn get_all_releases(&self) -> Vec<ReleaseInfo> {
        match self.fetch_recent().await {
            Ok(releases) => releases
                .into_iter()
                .take(RECENT_RELEASES)
                .map(ReleaseInfo::from)
                .collect(),
            Err(e) => {
                warn!("Failed to fetch releases of {}: {:#}", self.repo, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::{AssetArch, FileType, Platform};
    use chrono::DateTime;
    use reqwest::Client;

    const LATEST_PATH: &str = "/repos/kauredo/basketball-video-analyzer/releases/latest";
    const LIST_PATH: &str = "/repos/kauredo/basketball-video-analyzer/releases?per_page=10";

    fn releases_at(url: &str) -> GitHubReleases {
        GitHubReleases::with_api_url(HttpClient::new(Client::new()), url)
    }

    #[test]
    fn test_default_api_url() {
        let releases = GitHubReleases::new(HttpClient::new(Client::new()));
        assert_eq!(releases.api_url(), "https://api.github.com");
        assert_eq!(releases.repo(), &RepoId::product());

        let custom = releases_at("https://ghe.example.com/api/v3/");
        assert_eq!(custom.api_url(), "https://ghe.example.com/api/v3");
    }

    #[test_log::test(tokio::test)]
    async fn test_get_latest_release() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", LATEST_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "tag_name": "v2.3.1",
                    "name": "2.3.1",
                    "body": "Bug fixes",
                    "published_at": "2025-02-01T10:00:00Z",
                    "prerelease": false,
                    "draft": false,
                    "assets": [
                        {
                            "name": "Analyzer-2.3.1-arm64.dmg",
                            "browser_download_url": "https://example.com/a.dmg",
                            "size": 1000,
                            "download_count": 40,
                            "content_type": "application/octet-stream"
                        },
                        {
                            "name": "latest-mac.yml",
                            "browser_download_url": "https://example.com/latest-mac.yml",
                            "size": 10,
                            "download_count": 2,
                            "content_type": "text/yaml"
                        }
                    ]
                }"#,
            )
            .create_async()
            .await;

        let release = releases_at(&url)
            .get_latest_release()
            .await
            .unwrap()
            .unwrap();

        mock.assert_async().await;
        assert_eq!(release.version, "2.3.1");
        assert_eq!(release.release_notes, "Bug fixes");
        assert_eq!(release.release_date.to_rfc3339(), "2025-02-01T10:00:00+00:00");
        assert_eq!(release.download_count, 42);
        assert_eq!(release.platforms.len(), 1);
        assert_eq!(release.platforms[0].platform, Platform::Macos);
        assert_eq!(release.platforms[0].architecture, AssetArch::Arm64);
        assert_eq!(release.platforms[0].file_type, FileType::Dmg);
        assert_eq!(release.platforms[0].url, "https://example.com/a.dmg");
    }

    #[tokio::test]
    async fn test_get_latest_release_missing_fields() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", LATEST_PATH)
            .with_status(200)
            .with_body(r#"{"tag_name": "v1.0.0", "body": null, "published_at": null}"#)
            .create_async()
            .await;

        let release = releases_at(&url)
            .get_latest_release()
            .await
            .unwrap()
            .unwrap();

        assert_eq!(release.version, "1.0.0");
        assert_eq!(release.release_notes, "");
        assert_eq!(release.release_date, DateTime::UNIX_EPOCH);
        assert!(release.platforms.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_get_latest_release_not_found() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", LATEST_PATH)
            .with_status(404)
            .create_async()
            .await;

        let result = releases_at(&url).get_latest_release().await;

        mock.assert_async().await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_get_latest_release_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", LATEST_PATH)
            .with_status(403)
            .with_header("x-ratelimit-remaining", "0")
            .with_header("x-ratelimit-reset", "1700000000")
            .with_body(r#"{"message": "API rate limit exceeded"}"#)
            .expect(1)
            .create_async()
            .await;

        let result = releases_at(&url).get_latest_release().await;

        mock.assert_async().await;
        assert_eq!(
            result,
            Err(RateLimitExceeded {
                status: 403,
                reset_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            })
        );
    }

    #[tokio::test]
    async fn test_get_latest_release_forbidden_without_rate_limit() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", LATEST_PATH)
            .with_status(403)
            .with_header("x-ratelimit-remaining", "59")
            .create_async()
            .await;

        let result = releases_at(&url).get_latest_release().await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_get_latest_release_malformed_payload() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", LATEST_PATH)
            .with_status(200)
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let result = releases_at(&url).get_latest_release().await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_get_latest_release_network_failure() {
        // Nothing listens on port 9 of localhost in the test environment.
        let result = releases_at("http://127.0.0.1:9").get_latest_release().await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_get_all_releases() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", LIST_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {
                        "tag_name": "v1.1.0",
                        "published_at": "2025-01-01T00:00:00Z",
                        "prerelease": true,
                        "assets": [
                            {"name": "app-setup.exe", "browser_download_url": "u1", "size": 5, "download_count": 3}
                        ]
                    },
                    {
                        "tag_name": "v1.0.0",
                        "published_at": "2024-12-20T00:00:00Z",
                        "prerelease": false,
                        "assets": []
                    }
                ]"#,
            )
            .create_async()
            .await;

        let releases = releases_at(&url).get_all_releases().await;

        mock.assert_async().await;
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].version, "1.1.0");
        assert!(releases[0].is_prerelease);
        assert_eq!(releases[0].platforms[0].platform, Platform::Windows);
        assert_eq!(releases[0].download_count, 3);
        assert_eq!(releases[1].version, "1.0.0");
    }

    #[tokio::test]
    async fn test_get_all_releases_failure_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", LIST_PATH)
            .with_status(403)
            .with_header("x-ratelimit-remaining", "0")
            .with_header("x-ratelimit-reset", "1700000000")
            .create_async()
            .await;

        let releases = releases_at(&url).get_all_releases().await;

        mock.assert_async().await;
        assert!(releases.is_empty());
    }
}

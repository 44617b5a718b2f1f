//! Configuration and service construction.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::{
    github::{DEFAULT_API_URL, GitHubReleases},
    http::HttpClient,
    runtime::Runtime,
};

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const USER_AGENT: &str = "bva-download";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    /// Optional bearer token; raises the API rate limit when present.
    pub token: Option<String>,
}

impl Config {
    pub fn new<R: Runtime>(runtime: &R, api_url: Option<String>) -> Self {
        let token = runtime
            .env_var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty());

        if let Some(token) = &token {
            debug!("Using {} for authentication: {}", TOKEN_ENV, mask_token(token));
        }

        Self {
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token,
        }
    }
}

/// Build an HTTP client with optional authentication token
pub fn build_http_client(token: Option<&str>) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();

    if let Some(token) = token {
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .context("GITHUB_TOKEN is not a valid header value")?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        debug!("HTTP client configured with authentication");
    }

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .context("Failed to build HTTP client")?;

    Ok(HttpClient::new(client))
}

/// Build the GitHub release source from configuration
pub fn build_release_source(config: &Config) -> Result<GitHubReleases> {
    let http_client = build_http_client(config.token.as_deref())?;
    Ok(GitHubReleases::with_api_url(http_client, &config.api_url))
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

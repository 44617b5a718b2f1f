//! Classification of unsuccessful GitHub API responses.

use chrono::{DateTime, Utc};
use reqwest::{
    Response, StatusCode,
    header::{HeaderMap, HeaderName},
};

pub const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// An unsuccessful API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP 403 with `x-ratelimit-remaining: 0`
    RateLimitExceeded {
        status: u16,
        reset_at: DateTime<Utc>,
    },
    /// HTTP 401
    AuthenticationFailed(String),
    /// HTTP 404
    NotFound(String),
    /// HTTP 403 without the rate limit signal
    Forbidden(String),
    /// Any other 4xx
    ClientError(u16),
    /// 5xx and anything else unexpected
    ServerError(u16),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::RateLimitExceeded { status, .. } => *status,
            ApiError::AuthenticationFailed(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::Forbidden(_) => 403,
            ApiError::ClientError(status) | ApiError::ServerError(status) => *status,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::RateLimitExceeded { status, reset_at } => {
                write!(
                    f,
                    "GitHub API rate limit exceeded (HTTP {}), resets at {}. Set GITHUB_TOKEN for a higher limit.",
                    status,
                    reset_at.to_rfc3339()
                )
            }
            ApiError::AuthenticationFailed(msg) => {
                write!(f, "Authentication failed: {}. Check your GITHUB_TOKEN.", msg)
            }
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Forbidden(msg) => {
                write!(f, "Access forbidden: {}. You may need authentication.", msg)
            }
            ApiError::ClientError(status) => write!(f, "Request error: HTTP {}", status),
            ApiError::ServerError(status) => write!(f, "Server error: HTTP {}", status),
        }
    }
}

impl std::error::Error for ApiError {}

/// Classifies a response status. Returns `None` for success.
pub fn classify_response(status: StatusCode, headers: &HeaderMap) -> Option<ApiError> {
    if status.is_success() {
        return None;
    }

    let error = match status {
        StatusCode::FORBIDDEN if is_rate_limited(headers) => ApiError::RateLimitExceeded {
            status: status.as_u16(),
            reset_at: rate_limit_reset(headers),
        },
        StatusCode::FORBIDDEN => {
            ApiError::Forbidden("Access to this resource is forbidden".to_string())
        }
        StatusCode::UNAUTHORIZED => {
            ApiError::AuthenticationFailed("Invalid or missing authentication token".to_string())
        }
        StatusCode::NOT_FOUND => {
            ApiError::NotFound("The requested resource was not found".to_string())
        }
        s if s.is_client_error() => ApiError::ClientError(s.as_u16()),
        s => ApiError::ServerError(s.as_u16()),
    };

    Some(error)
}

/// Passes successful responses through, converting everything else into an [`ApiError`].
pub fn check_status(response: Response) -> anyhow::Result<Response> {
    match classify_response(response.status(), response.headers()) {
        None => Ok(response),
        Some(error) => Err(anyhow::Error::from(error)),
    }
}

fn is_rate_limited(headers: &HeaderMap) -> bool {
    headers
        .get(RATE_LIMIT_REMAINING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}

/// Reset time from `x-ratelimit-reset` (epoch seconds); the epoch when absent.
fn rate_limit_reset(headers: &HeaderMap) -> DateTime<Utc> {
    headers
        .get(RATE_LIMIT_RESET)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

//! HTTP client module with response classification.

mod client;
mod error;

pub use client::HttpClient;
pub use error::{ApiError, check_status, classify_response};

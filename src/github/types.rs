use serde::{Deserialize, Serialize};

use crate::release::RawReleaseAsset;

/// Represents a GitHub release as returned by the REST API
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Default)]
pub struct Release {
    pub tag_name: String,
    pub name: Option<String>,
    pub body: Option<String>,
    pub published_at: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub assets: Vec<RawReleaseAsset>,
}

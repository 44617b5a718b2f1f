//! Asset classification module
//!
//! Maps the raw files attached to a release onto installer descriptors
//! (platform, architecture, file type). Files that are not recognized as
//! installers are dropped.

mod rules;

pub use rules::{Classification, classify_name};

use crate::release::{PlatformAsset, RawReleaseAsset};

/// Classifies raw release assets, preserving input order of the survivors.
pub fn classify(assets: &[RawReleaseAsset]) -> Vec<PlatformAsset> {
    assets
        .iter()
        .filter_map(|asset| {
            let c = classify_name(&asset.name)?;
            Some(PlatformAsset {
                platform: c.platform,
                architecture: c.architecture,
                file_type: c.file_type,
                url: asset.download_url.clone(),
                size: asset.size,
                filename: asset.name.clone(),
            })
        })
        .collect()
}

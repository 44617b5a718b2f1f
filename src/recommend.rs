//! Selection of the single installer to offer a visitor.

use crate::environment::Environment;
use crate::release::PlatformAsset;

/// Picks the asset best matching `env`.
///
/// Candidates are the assets for the detected OS family, in order. The first
/// one built for the detected architecture wins; otherwise the first candidate
/// is returned. `None` when the OS is unknown or has no assets.
pub fn recommend<'a>(assets: &'a [PlatformAsset], env: &Environment) -> Option<&'a PlatformAsset> {
    let platform = env.os_family.platform()?;

    let mut candidates = assets.iter().filter(|a| a.platform == platform).peekable();
    let first = *candidates.peek()?;

    candidates
        .find(|a| env.architecture.matches(a.architecture))
        .or(Some(first))
}

//! CLI subcommands.
//!
//! Each command talks to a [`ReleaseSource`] and writes its report to the
//! given writer, either as text or as pretty-printed JSON.

use anyhow::{Context, Result};
use log::debug;
use std::io::Write;

use crate::{
    cache::CachedReleases,
    config::{Config, build_release_source},
    environment::BrowserContext,
    fallback::fallback_release,
    github::ReleaseSource,
    offer::resolve_offer,
    runtime::Runtime,
};

mod render;

use render::{NO_RELEASE, OfferView};

/// Output options shared by all commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
}

#[tracing::instrument(skip(runtime, api_url, output))]
pub async fn latest<R: Runtime>(runtime: R, api_url: Option<String>, output: Output) -> Result<()> {
    let config = Config::new(&runtime, api_url);
    let source = build_release_source(&config)?;
    show_latest(&source, output, &mut std::io::stdout()).await
}

#[tracing::instrument(skip(runtime, api_url, output))]
pub async fn releases<R: Runtime>(
    runtime: R,
    api_url: Option<String>,
    output: Output,
) -> Result<()> {
    let config = Config::new(&runtime, api_url);
    let source = build_release_source(&config)?;
    show_releases(&source, output, &mut std::io::stdout()).await
}

#[tracing::instrument(skip(runtime, api_url, ctx, output))]
pub async fn recommend<R: Runtime>(
    runtime: R,
    api_url: Option<String>,
    ctx: Option<BrowserContext>,
    output: Output,
) -> Result<()> {
    let config = Config::new(&runtime, api_url);
    let source = build_release_source(&config)?;
    show_offer(source, ctx.as_ref(), output, &mut std::io::stdout()).await
}

pub fn fallback(output: Output) -> Result<()> {
    show_fallback(output, &mut std::io::stdout())
}

/// Prints the latest release. A rate limit is reported as an error.
pub async fn show_latest<S: ReleaseSource, W: Write>(
    source: &S,
    output: Output,
    out: &mut W,
) -> Result<()> {
    let release = source.get_latest_release().await?;
    debug!(
        "Latest release: {:?}",
        release.as_ref().map(|r| r.version.as_str())
    );

    let text = match (&release, output.json) {
        (_, true) => render::to_json(&release)?,
        (Some(release), false) => render::release(release),
        (None, false) => NO_RELEASE.to_string(),
    };
    emit(out, &text)
}

pub async fn show_releases<S: ReleaseSource, W: Write>(
    source: &S,
    output: Output,
    out: &mut W,
) -> Result<()> {
    let releases = source.get_all_releases().await;
    debug!("Fetched {} releases", releases.len());

    let text = if output.json {
        render::to_json(&releases)?
    } else {
        render::release_list(&releases)
    };
    emit(out, &text)
}

/// Prints the download offer. Never fails on upstream errors.
pub async fn show_offer<S: ReleaseSource, W: Write>(
    source: S,
    ctx: Option<&BrowserContext>,
    output: Output,
    out: &mut W,
) -> Result<()> {
    let mut releases = CachedReleases::new(source);
    let offer = resolve_offer(&mut releases, ctx).await;

    let text = if output.json {
        render::to_json(&OfferView::from(&offer))?
    } else {
        render::offer(&offer)
    };
    emit(out, &text)
}

pub fn show_fallback<W: Write>(output: Output, out: &mut W) -> Result<()> {
    let release = fallback_release();
    let text = if output.json {
        render::to_json(&release)?
    } else {
        render::release(&release)
    };
    emit(out, &text)
}

fn emit<W: Write>(out: &mut W, text: &str) -> Result<()> {
    writeln!(out, "{}", text).context("Failed to write output")
}

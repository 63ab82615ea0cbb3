use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::network::Network;

const RELEASES_URL: &str = "https://api.github.com/repos/wavesplatform/Waves/releases";

/// One entry of the GitHub releases listing. Release names are free-form
/// and occasionally absent.
#[derive(Debug, Deserialize)]
struct Release {
    #[serde(default)]
    name: Option<String>,
    tag_name: String,
}

/// Resolve the version selector into a concrete release version.
/// A literal selector passes through; `latest` queries the release list.
pub fn resolve_version(client: &Client, network: Network, selector: &str) -> Result<String> {
    if !selector.eq_ignore_ascii_case("latest") {
        return Ok(selector.to_string());
    }
    latest_version(client, network)
}

fn latest_version(client: &Client, network: Network) -> Result<String> {
    let res = client
        .get(RELEASES_URL)
        .send()
        .context("query github releases")?;
    if !res.status().is_success() {
        bail!("github releases query failed with status {}", res.status());
    }
    let releases: Vec<Release> = res.json().context("decode github releases")?;
    let needle = network.release_match_name();
    match_release(&releases, needle).with_context(|| format!("no release matching {needle:?}"))
}

fn match_release(releases: &[Release], needle: &str) -> Option<String> {
    releases.iter().find_map(|release| {
        let name = release.name.as_deref().unwrap_or_default();
        if name.to_ascii_lowercase().contains(needle) {
            tracing::info!(release = name, "latest matching release");
            Some(normalize_tag(&release.tag_name))
        } else {
            None
        }
    })
}

fn normalize_tag(tag: &str) -> String {
    tag.trim_start_matches('v').to_string()
}

/// Download the per-network default configuration template for `version`.
pub fn download_config_template(
    client: &Client,
    network: Network,
    version: &str,
    dest: &Path,
) -> Result<()> {
    let url = format!(
        "https://raw.githubusercontent.com/wavesplatform/Waves/v{version}/node/{}",
        network.conf_template_name()
    );
    tracing::info!(url = %url, dest = %dest.display(), "downloading configuration template");
    let res = client
        .get(&url)
        .send()
        .with_context(|| format!("fetch {url}"))?;
    if !res.status().is_success() {
        bail!("template download failed with status {}", res.status());
    }
    let body = res.bytes().context("read configuration template")?;
    std::fs::write(dest, &body).with_context(|| format!("write {}", dest.display()))?;
    Ok(())
}

/// Download the node release jar for `version`, streaming through a
/// terminal progress bar sized from `Content-Length`.
pub fn download_node_jar(client: &Client, version: &str, dest: &Path) -> Result<()> {
    let file_name = format!("waves-all-{version}.jar");
    let url =
        format!("https://github.com/wavesplatform/Waves/releases/download/v{version}/{file_name}");
    tracing::info!(url = %url, dest = %dest.display(), "downloading node jar");

    let res = client
        .get(&url)
        .send()
        .with_context(|| format!("fetch {url}"))?;
    if !res.status().is_success() {
        bail!("jar download failed with status {}", res.status());
    }

    let total = res.content_length().unwrap_or(0);
    let bar = if total > 0 {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
                .progress_chars("#>-"),
        );
        bar
    } else {
        ProgressBar::new_spinner()
    };

    let mut reader = bar.wrap_read(res);
    let mut file = File::create(dest).with_context(|| format!("create {}", dest.display()))?;
    let written = io::copy(&mut reader, &mut file).context("stream jar to disk")?;
    bar.finish();

    if total != 0 && written != total {
        tracing::warn!(expected = total, written, "jar download size mismatch");
    }
    Ok(())
}

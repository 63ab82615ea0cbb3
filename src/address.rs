use std::net::IpAddr;

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;

use crate::settings::BootSettings;

/// IP-reporting services queried in order; the first response that parses
/// as an address wins.
const IP_SERVICES: [&str; 3] = [
    "http://ipinfo.io/ip",
    "http://ipecho.net/plain",
    "http://icanhazip.com",
];

/// Resolve the `ip:port` the node should advertise to peers, if any.
///
/// An explicit declared address takes precedence unconditionally and no
/// network query happens. With autodetection enabled the external IP is
/// looked up and paired with the override port or the network default.
/// With autodetection disabled and no explicit address, `None` — the key
/// is omitted from the configuration entirely.
pub fn resolve_declared_address(client: &Client, settings: &BootSettings) -> Result<Option<String>> {
    if let Some(declared) = &settings.declared_address {
        tracing::info!(address = %declared, "using explicitly declared address");
        return Ok(Some(declared.clone()));
    }
    if !settings.autodetect_address {
        return Ok(None);
    }

    let ip = detect_external_ip(client)?;
    let port = settings
        .autodetect_port
        .unwrap_or_else(|| settings.network.default_peer_port());
    let address = format!("{ip}:{port}");
    tracing::info!(address = %address, "autodetected declared address");
    Ok(Some(address))
}

fn detect_external_ip(client: &Client) -> Result<IpAddr> {
    for service in IP_SERVICES {
        match fetch_ip(client, service) {
            Ok(ip) => return Ok(ip),
            Err(err) => {
                tracing::warn!(service, error = %err, "external ip lookup failed");
            }
        }
    }
    bail!("all external ip services failed, cannot autodetect the declared address")
}

fn fetch_ip(client: &Client, url: &str) -> Result<IpAddr> {
    let res = client
        .get(url)
        .send()
        .with_context(|| format!("query {url}"))?;
    if !res.status().is_success() {
        bail!("{url} responded with status {}", res.status());
    }
    let body = res.text().context("read response body")?;
    let trimmed = body.trim();
    trimmed
        .parse()
        .with_context(|| format!("response is not an ip address: {trimmed:?}"))
}

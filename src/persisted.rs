use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::conf::{self, Tree, Value};

/// Tree path of the wallet seed inside the node configuration.
pub const WALLET_SEED_PATH: [&str; 3] = ["waves", "wallet", "seed"];
/// Tree path of the wallet password inside the node configuration.
pub const WALLET_PASSWORD_PATH: [&str; 3] = ["waves", "wallet", "password"];

/// Wallet fields carried forward from a previous run's `local.conf`, so
/// a restart keeps its wallet identity instead of minting a fresh one.
#[derive(Debug, Clone, Default)]
pub struct PersistedWallet {
    pub seed: Option<String>,
    pub password: Option<String>,
}

/// Read the persisted configuration and extract the wallet fields.
///
/// An absent file is the normal first-boot case and yields an empty
/// result. A file that exists but cannot be parsed aborts the run — a
/// corrupt wallet carry-forward must not be dropped silently.
pub fn load_wallet(path: &Path) -> Result<PersistedWallet> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no persisted configuration, first boot");
        return Ok(PersistedWallet::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read persisted configuration {}", path.display()))?;
    let tree = conf::parse(&raw)
        .with_context(|| format!("failed to parse persisted configuration {}", path.display()))?;
    Ok(extract_wallet(&tree))
}

fn extract_wallet(tree: &Tree) -> PersistedWallet {
    PersistedWallet {
        seed: string_at(tree, &WALLET_SEED_PATH),
        password: string_at(tree, &WALLET_PASSWORD_PATH),
    }
}

fn string_at(tree: &Tree, path: &[&str]) -> Option<String> {
    match tree.get(path)? {
        Value::Str(s) => Some(s.clone()),
        _ => None,
    }
}

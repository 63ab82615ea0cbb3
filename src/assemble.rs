use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::conf::{self, Tree, Value};
use crate::env::EnvSnapshot;
use crate::paths::NodePaths;
use crate::persisted::{PersistedWallet, WALLET_PASSWORD_PATH, WALLET_SEED_PATH};
use crate::wallet::WalletData;

const DIRECTORY_PATH: [&str; 2] = ["waves", "directory"];
const DATA_DIRECTORY_PATH: [&str; 2] = ["waves", "data-directory"];
const DECLARED_ADDRESS_PATH: [&str; 3] = ["waves", "network", "declared-address"];

/// Merge every configuration layer into the final tree. Later layers win
/// on collision, always as point overwrites through the nested setter:
///
/// 1. wallet fields carried forward from the previous run,
/// 2. the environment overlay,
/// 3. forced directories (never configurable),
/// 4. forced wallet credentials from the resolver (never configurable),
/// 5. the declared address, when one was resolved.
pub fn assemble(
    env: &EnvSnapshot,
    persisted: &PersistedWallet,
    wallet: &WalletData,
    paths: &NodePaths,
    declared_address: Option<&str>,
) -> Result<Tree> {
    let mut tree = Tree::new();

    if let Some(seed) = &persisted.seed {
        tree.set(&WALLET_SEED_PATH, Value::Str(seed.clone()))?;
    }
    if let Some(password) = &persisted.password {
        tree.set(&WALLET_PASSWORD_PATH, Value::Str(password.clone()))?;
    }

    conf::apply_overlay(&mut tree, env)?;

    tree.set(
        &DIRECTORY_PATH,
        Value::Str(paths.base_dir().display().to_string()),
    )?;
    tree.set(
        &DATA_DIRECTORY_PATH,
        Value::Str(paths.data_dir().display().to_string()),
    )?;

    tree.set(&WALLET_SEED_PATH, Value::Str(wallet.seed.clone()))?;
    tree.set(&WALLET_PASSWORD_PATH, Value::Str(wallet.password.clone()))?;

    if let Some(address) = declared_address {
        tree.set(&DECLARED_ADDRESS_PATH, Value::Str(address.to_string()))?;
    }

    Ok(tree)
}

/// Render the tree and replace the persisted configuration file.
pub fn write_config(tree: &Tree, path: &Path) -> Result<()> {
    let rendered = conf::render(tree);
    tracing::debug!(config = %rendered, "final node configuration");
    fs::write(path, rendered).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn paths() -> NodePaths {
        NodePaths::new(PathBuf::from("/waves"), PathBuf::from("/waves-node"))
    }

    fn wallet() -> WalletData {
        WalletData {
            seed: bs58::encode(b"resolved seed").into_string(),
            password: "resolvedpw12".to_string(),
        }
    }

    fn env(pairs: &[(&str, &str)]) -> EnvSnapshot {
        EnvSnapshot::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn forced_wallet_beats_environment_overlay() {
        let env = env(&[("WAVES__WALLET__SEED", "abc")]);
        let tree = assemble(&env, &PersistedWallet::default(), &wallet(), &paths(), None).unwrap();
        assert_eq!(
            tree.get(&WALLET_SEED_PATH),
            Some(&Value::Str(wallet().seed))
        );
        assert_ne!(tree.get(&WALLET_SEED_PATH), Some(&Value::Str("abc".into())));
    }

    #[test]
    fn forced_directories_beat_environment_overlay() {
        let env = env(&[
            ("WAVES__DIRECTORY", "/elsewhere"),
            ("WAVES__DATA_DIRECTORY", "/elsewhere/data"),
        ]);
        let tree = assemble(&env, &PersistedWallet::default(), &wallet(), &paths(), None).unwrap();
        assert_eq!(
            tree.get(&DIRECTORY_PATH),
            Some(&Value::Str("/waves".into()))
        );
        assert_eq!(
            tree.get(&DATA_DIRECTORY_PATH),
            Some(&Value::Str("/waves/data".into()))
        );
    }

    #[test]
    fn persisted_seed_flows_through_the_resolver_untouched() {
        // The resolver saw the persisted wallet, so its output is the
        // carried-forward seed; the overlay value must not survive.
        let env = env(&[("WAVES__WALLET__SEED", "abc")]);
        let persisted = PersistedWallet {
            seed: Some("X".into()),
            password: None,
        };
        let resolved = crate::wallet::resolve(&crate::wallet::WalletInputs::default(), &persisted);
        let tree = assemble(&env, &persisted, &resolved, &paths(), None).unwrap();
        assert_eq!(tree.get(&WALLET_SEED_PATH), Some(&Value::Str("X".into())));
    }

    #[test]
    fn declared_address_is_set_when_resolved() {
        let tree = assemble(
            &env(&[]),
            &PersistedWallet::default(),
            &wallet(),
            &paths(),
            Some("1.2.3.4:6868"),
        )
        .unwrap();
        assert_eq!(
            tree.get(&DECLARED_ADDRESS_PATH),
            Some(&Value::Str("1.2.3.4:6868".into()))
        );
    }

    #[test]
    fn declared_address_key_is_absent_when_unresolved() {
        let tree = assemble(&env(&[]), &PersistedWallet::default(), &wallet(), &paths(), None)
            .unwrap();
        assert_eq!(tree.get(&DECLARED_ADDRESS_PATH), None);
    }

    #[test]
    fn overlay_keys_survive_next_to_forced_ones() {
        let env = env(&[("WAVES__REST_API__ENABLE", "true")]);
        let tree = assemble(&env, &PersistedWallet::default(), &wallet(), &paths(), None).unwrap();
        assert_eq!(
            tree.get(&["waves", "rest-api", "enable"]),
            Some(&Value::Bool(true))
        );
        assert_eq!(
            tree.get(&DIRECTORY_PATH),
            Some(&Value::Str("/waves".into()))
        );
    }

    #[test]
    fn written_config_parses_back_to_the_same_tree() {
        let env = env(&[("WAVES__NETWORK__NODE_NAME", "boot-test")]);
        let tree = assemble(&env, &PersistedWallet::default(), &wallet(), &paths(), None).unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("local.conf");
        write_config(&tree, &path).unwrap();

        let reparsed = conf::parse(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reparsed, tree);
    }
}

use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};

use crate::persisted::PersistedWallet;

const GENERATED_SEED_LEN: usize = 64;
const GENERATED_PASSWORD_LEN: usize = 12;

/// Resolved wallet credentials, written into the node configuration.
#[derive(Debug, Clone)]
pub struct WalletData {
    /// Base58-encoded seed, the form the node stores.
    pub seed: String,
    pub password: String,
}

/// Operator-supplied wallet inputs from the environment.
#[derive(Debug, Clone, Default)]
pub struct WalletInputs {
    pub raw_seed: Option<String>,
    pub encoded_seed: Option<String>,
    pub password: Option<String>,
}

/// Resolve the wallet credentials for this boot.
///
/// A persisted seed or password wins unconditionally: wallet identity
/// survives restarts even when stale variables linger in the container
/// spec. Otherwise a supplied pre-encoded seed is used when its checksum
/// validates, a supplied raw phrase is encoded, and failing both a fresh
/// random phrase is generated. A freshly generated phrase is revealed
/// exactly once for operator backup — never again once a persisted seed
/// exists. The password is reported on every boot.
pub fn resolve(inputs: &WalletInputs, persisted: &PersistedWallet) -> WalletData {
    // Disclosure eligibility is fixed before any resolution happens.
    let had_persisted_seed = persisted.seed.is_some();

    let seed = match &persisted.seed {
        Some(seed) => seed.clone(),
        None => resolve_seed(inputs, had_persisted_seed),
    };

    let password = persisted
        .password
        .clone()
        .or_else(|| inputs.password.clone())
        .unwrap_or_else(|| random_alphanumeric(GENERATED_PASSWORD_LEN));
    tracing::info!(password = %password, "wallet password");

    WalletData { seed, password }
}

fn resolve_seed(inputs: &WalletInputs, had_persisted_seed: bool) -> String {
    if let Some(encoded) = &inputs.encoded_seed {
        match bs58::decode(encoded).with_check(None).into_vec() {
            Ok(_) => return encoded.clone(),
            Err(err) => tracing::warn!(
                error = %err,
                "supplied base58 seed failed checksum validation, falling back to the raw seed"
            ),
        }
    }

    let (phrase, generated) = match &inputs.raw_seed {
        Some(phrase) => (phrase.clone(), false),
        None => (random_alphanumeric(GENERATED_SEED_LEN), true),
    };
    if generated && !had_persisted_seed {
        // One-time reveal so the operator can back the wallet up.
        tracing::info!(phrase = %phrase, "generated a new wallet seed phrase, back it up now");
    }
    bs58::encode(phrase.as_bytes()).into_string()
}

fn random_alphanumeric(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

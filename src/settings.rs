use anyhow::{Context, Result};

use crate::env::EnvSnapshot;
use crate::network::Network;

/// Fixed-purpose bootstrap variables, resolved once from the environment
/// snapshot. Everything else in the environment flows through the
/// `FOO__BAR` overlay instead.
#[derive(Debug, Clone)]
pub struct BootSettings {
    pub network: Network,
    /// Raw `WAVES_VERSION` selector — `latest` or a concrete version.
    pub version_selector: String,
    pub startup_delay_secs: u64,
    pub autodetect_address: bool,
    pub declared_address: Option<String>,
    pub autodetect_port: Option<u16>,
    pub wallet_seed: Option<String>,
    pub wallet_seed_base58: Option<String>,
    pub wallet_password: Option<String>,
}

impl BootSettings {
    pub fn from_env(env: &EnvSnapshot) -> Result<Self> {
        let startup_delay_secs = match env.string_var("WAVES_THRESHOLD") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("WAVES_THRESHOLD is not a number of seconds: {raw:?}"))?,
            None => 0,
        };
        let autodetect_port = env
            .string_var("WAVES_AUTODETECT_ADDRESS_PORT")
            .map(|raw| {
                raw.parse()
                    .with_context(|| format!("WAVES_AUTODETECT_ADDRESS_PORT is not a port: {raw:?}"))
            })
            .transpose()?;

        Ok(Self {
            network: Network::from_selector(env.string_var("WAVES_NETWORK").as_deref()),
            version_selector: env
                .string_var("WAVES_VERSION")
                .unwrap_or_else(|| "latest".to_string()),
            startup_delay_secs,
            autodetect_address: env.bool_var("WAVES_AUTODETECT_ADDRESS").unwrap_or(true),
            declared_address: env.string_var("WAVES_DECLARED_ADDRESS"),
            autodetect_port,
            wallet_seed: env.string_var("WAVES_WALLET_SEED"),
            wallet_seed_base58: env.string_var("WAVES_WALLET_SEED_BASE58"),
            wallet_password: env.string_var("WAVES_WALLET_PASSWORD"),
        })
    }

    /// Log a summary of the resolved settings at startup.
    /// Wallet inputs are reported as presence flags only.
    pub fn log_summary(&self) {
        tracing::info!(
            network = %self.network,
            version = %self.version_selector,
            startup_delay_secs = self.startup_delay_secs,
            autodetect_address = self.autodetect_address,
            declared_address = self.declared_address.as_deref().unwrap_or("-"),
            seed_supplied = self.wallet_seed.is_some(),
            encoded_seed_supplied = self.wallet_seed_base58.is_some(),
            password_supplied = self.wallet_password.is_some(),
            "bootstrap settings"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Result<BootSettings> {
        let env = EnvSnapshot::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        BootSettings::from_env(&env)
    }

    #[test]
    fn defaults_with_empty_environment() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.network, Network::Testnet);
        assert_eq!(s.version_selector, "latest");
        assert_eq!(s.startup_delay_secs, 0);
        assert!(s.autodetect_address);
        assert_eq!(s.declared_address, None);
        assert_eq!(s.autodetect_port, None);
        assert_eq!(s.wallet_seed, None);
    }

    #[test]
    fn explicit_values_are_picked_up() {
        let s = settings(&[
            ("WAVES_NETWORK", "MAINNET"),
            ("WAVES_VERSION", "1.4.8"),
            ("WAVES_THRESHOLD", "30"),
            ("WAVES_AUTODETECT_ADDRESS", "no"),
            ("WAVES_DECLARED_ADDRESS", "1.2.3.4:6868"),
            ("WAVES_AUTODETECT_ADDRESS_PORT", "7000"),
            ("WAVES_WALLET_SEED", "phrase"),
        ])
        .unwrap();
        assert_eq!(s.network, Network::Mainnet);
        assert_eq!(s.version_selector, "1.4.8");
        assert_eq!(s.startup_delay_secs, 30);
        assert!(!s.autodetect_address);
        assert_eq!(s.declared_address.as_deref(), Some("1.2.3.4:6868"));
        assert_eq!(s.autodetect_port, Some(7000));
        assert_eq!(s.wallet_seed.as_deref(), Some("phrase"));
    }

    #[test]
    fn malformed_threshold_is_an_error() {
        assert!(settings(&[("WAVES_THRESHOLD", "soon")]).is_err());
    }

    #[test]
    fn malformed_port_is_an_error() {
        assert!(settings(&[("WAVES_AUTODETECT_ADDRESS_PORT", "70000")]).is_err());
    }
}

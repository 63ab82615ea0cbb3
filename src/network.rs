use std::fmt;

/// The Waves network a node joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
}

impl Network {
    /// Parse the `WAVES_NETWORK` selector. Unknown or missing values fall
    /// back to testnet so a bare container still boots somewhere safe.
    pub fn from_selector(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_uppercase).as_deref() {
            Some("MAINNET") => Self::Mainnet,
            Some("TESTNET") => Self::Testnet,
            Some("DEVNET") => Self::Devnet,
            _ => Self::Testnet,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
        }
    }

    /// Substring release names are matched against. Devnet builds ship
    /// under the testnet releases.
    pub fn release_match_name(&self) -> &'static str {
        match self {
            Self::Devnet => "testnet",
            other => other.as_str(),
        }
    }

    /// Default peer port advertised when autodetecting the address.
    pub fn default_peer_port(&self) -> u16 {
        match self {
            Self::Mainnet => 6868,
            Self::Testnet => 6863,
            Self::Devnet => 6816,
        }
    }

    /// File name of the per-network default configuration template.
    pub fn conf_template_name(&self) -> String {
        format!("waves-{}.conf", self.as_str())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

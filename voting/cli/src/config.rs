use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub chain: ChainConfig,
    pub wallet: WalletConfig,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chain: ChainConfig::default(),
            wallet: WalletConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub contract_address: Option<String>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            contract_address: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WalletKind {
    #[default]
    Node,
    Mnemonic,
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub kind: WalletKind,
    /// Name of the environment variable holding the mnemonic phrase.
    pub mnemonic_env: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            kind: WalletKind::default(),
            mnemonic_env: "VOTING_MNEMONIC".to_string(),
        }
    }
}

// ----------------------------------- tests -----------------------------------

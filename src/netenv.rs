//! Network name resolution and the per-network deployment environment.
//!
//! `deployenv.json` is a network-keyed map of environment records. It is
//! loaded once per run, validated up front, and read-only afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BootError, BootResult};
use crate::wad;

/// Strip any fork/suffix decoration from a raw network identifier:
/// the canonical name is the longest leading run of lowercase letters
/// ("mainnet-fork" -> "mainnet").
pub fn resolve_network(raw: &str) -> BootResult<&str> {
    let end = raw
        .find(|c: char| !c.is_ascii_lowercase())
        .unwrap_or(raw.len());
    if end == 0 {
        return Err(BootError::UnrecognizedNetwork(raw.to_string()));
    }
    Ok(&raw[..end])
}

/// One lendable asset as configured in `deployenv.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub address: String,
    pub symbol: String,
    pub decimals: u32,
    /// Liquidation discount in percent, human readable ("5" means 5%).
    pub discount: String,
    /// Required collateral per unit borrowed, human readable ("1.5").
    pub deposit_multiple: String,
    /// External price feed for this asset; markets without one skip feed
    /// registration but are still initialized.
    #[serde(rename = "chainlinkPrice", default, skip_serializing_if = "Option::is_none")]
    pub chainlink_price: Option<String>,
}

/// Per-network environment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub oracle: String,
    #[serde(rename = "ethToUsdPrice")]
    pub eth_to_usd_price: String,
    pub tokens: Vec<TokenConfig>,
}

impl EnvironmentConfig {
    /// Fail fast on config the sequencer would otherwise trip over mid-run.
    fn validate(&self, network: &str) -> BootResult<()> {
        let shape = |reason: String| BootError::InvalidConfigShape {
            scope: network.to_string(),
            reason,
        };
        if self.oracle.is_empty() {
            return Err(shape("oracle reference is empty".to_string()));
        }
        if wad::to_wad(&self.eth_to_usd_price).is_err() {
            return Err(shape(format!(
                "ethToUsdPrice {:?} is not a non-negative decimal",
                self.eth_to_usd_price
            )));
        }
        for token in &self.tokens {
            if token.address.is_empty() {
                return Err(shape(format!("token {:?} has an empty address", token.symbol)));
            }
            if token.symbol.is_empty() {
                return Err(shape(format!("token {:?} has an empty symbol", token.address)));
            }
            if token.decimals > 18 {
                return Err(shape(format!(
                    "token {:?} declares {} decimals (max 18)",
                    token.symbol, token.decimals
                )));
            }
            if wad::percent_to_wad(&token.discount).is_err() {
                return Err(shape(format!(
                    "token {:?} discount {:?} is not a non-negative decimal",
                    token.symbol, token.discount
                )));
            }
            if wad::to_wad(&token.deposit_multiple).is_err() {
                return Err(shape(format!(
                    "token {:?} deposit_multiple {:?} is not a non-negative decimal",
                    token.symbol, token.deposit_multiple
                )));
            }
        }
        Ok(())
    }
}

/// The whole environment file, keyed by canonical network name.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct DeployEnv {
    networks: BTreeMap<String, EnvironmentConfig>,
}

impl DeployEnv {
    pub fn load(path: &Path) -> BootResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let env: DeployEnv =
            serde_json::from_str(&raw).map_err(|e| BootError::InvalidConfigShape {
                scope: path.display().to_string(),
                reason: e.to_string(),
            })?;
        for (network, cfg) in &env.networks {
            cfg.validate(network)?;
        }
        debug!(networks = env.networks.len(), "environment file loaded");
        Ok(env)
    }

    pub fn for_network(&self, name: &str) -> BootResult<&EnvironmentConfig> {
        self.networks
            .get(name)
            .ok_or_else(|| BootError::MissingEnvironmentConfig(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn usdc() -> TokenConfig {
        TokenConfig {
            address: "0xA0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
            symbol: "USDC".to_string(),
            decimals: 6,
            discount: "5".to_string(),
            deposit_multiple: "1.5".to_string(),
            chainlink_price: None,
        }
    }

    fn env() -> EnvironmentConfig {
        EnvironmentConfig {
            oracle: "0xORACLE".to_string(),
            eth_to_usd_price: "2000".to_string(),
            tokens: vec![usdc()],
        }
    }

    #[test]
    fn fork_suffix_is_stripped() {
        assert_eq!(resolve_network("mainnet").unwrap(), "mainnet");
        assert_eq!(resolve_network("mainnet-fork").unwrap(), "mainnet");
        assert_eq!(resolve_network("test").unwrap(), "test");
    }

    #[test]
    fn resolution_is_idempotent() {
        let once = resolve_network("mainnet-fork").unwrap();
        assert_eq!(resolve_network(once).unwrap(), once);
    }

    #[test]
    fn names_without_a_lowercase_prefix_are_rejected() {
        for bad in ["123abc", "", "-fork", "MAINNET"] {
            let err = resolve_network(bad).unwrap_err();
            assert!(matches!(err, BootError::UnrecognizedNetwork(_)), "{bad:?}: {err:?}");
        }
    }

    #[test]
    fn valid_environment_passes_validation() {
        env().validate("mainnet").unwrap();
    }

    #[test]
    fn bad_discount_fails_validation() {
        let mut cfg = env();
        cfg.tokens[0].discount = "five".to_string();
        let err = cfg.validate("mainnet").unwrap_err();
        assert!(matches!(err, BootError::InvalidConfigShape { .. }), "{err:?}");
    }

    #[test]
    fn oversized_decimals_fail_validation() {
        let mut cfg = env();
        cfg.tokens[0].decimals = 19;
        assert!(cfg.validate("mainnet").is_err());
    }

    #[test]
    fn missing_required_field_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployenv.json");
        let mut f = std::fs::File::create(&path).unwrap();
        // token without a symbol
        write!(
            f,
            r#"{{"test": {{"oracle": "0xO", "ethToUsdPrice": "2000",
                 "tokens": [{{"address": "0xA", "decimals": 6,
                              "discount": "5", "deposit_multiple": "1.5"}}]}}}}"#
        )
        .unwrap();
        let err = DeployEnv::load(&path).unwrap_err();
        assert!(matches!(err, BootError::InvalidConfigShape { .. }), "{err:?}");
    }

    #[test]
    fn unknown_network_lookup_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployenv.json");
        std::fs::write(
            &path,
            r#"{"test": {"oracle": "0xO", "ethToUsdPrice": "2000", "tokens": []}}"#,
        )
        .unwrap();
        let envs = DeployEnv::load(&path).unwrap();
        assert!(envs.for_network("test").is_ok());
        let err = envs.for_network("mainnet").unwrap_err();
        assert!(matches!(err, BootError::MissingEnvironmentConfig(_)), "{err:?}");
    }
}

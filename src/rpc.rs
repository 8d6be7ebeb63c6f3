//! Thin JSON-RPC-style transport to the target node.
//!
//! The contracts themselves are black boxes; this adapter only shapes the
//! requests the deployer and sequencer issue and surfaces any failure as
//! `RemoteCallFailure`. No retries, no local recovery.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::trace;

use crate::deploy::ContractBackend;
use crate::error::{BootError, BootResult};
use crate::market::{InterestRateService, MarketRegistryService, PriceOracleService};

pub struct NodeClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    message: String,
}

impl NodeClient {
    pub fn new(url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        }
    }

    fn failure(call: &str, reason: impl ToString) -> BootError {
        BootError::RemoteCallFailure {
            call: call.to_string(),
            reason: reason.to_string(),
        }
    }

    async fn invoke(&self, method: &str, params: Value) -> BootResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        trace!(method, id, "rpc request");
        let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::failure(method, e))?;
        let envelope: RpcEnvelope = response.json().await.map_err(|e| Self::failure(method, e))?;
        if let Some(err) = envelope.error {
            return Err(Self::failure(method, err.message));
        }
        Ok(envelope.result.unwrap_or(Value::Null))
    }

    /// State-changing contract call; the result payload is ignored.
    async fn send(&self, to: &str, method: &str, args: Value) -> BootResult<()> {
        self.invoke("contract_send", json!({ "to": to, "method": method, "args": args }))
            .await
            .map(|_| ())
    }
}

#[async_trait::async_trait]
impl ContractBackend for NodeClient {
    async fn deploy(&self, name: &str) -> BootResult<String> {
        let result = self
            .invoke("deploy_contract", json!({ "contract": name }))
            .await?;
        result
            .get("address")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Self::failure("deploy_contract", format!("no address returned for {name}")))
    }

    async fn link(&self, target: &str, library: &str, address: &str) -> BootResult<()> {
        self.invoke(
            "link_library",
            json!({ "contract": target, "library": library, "address": address }),
        )
        .await
        .map(|_| ())
    }
}

/// A deployed contract bound to its manifest address. One value per service;
/// the same type serves all three because the traits only differ in the
/// methods they forward.
pub struct RemoteContract<'a> {
    client: &'a NodeClient,
    address: String,
}

impl<'a> RemoteContract<'a> {
    pub fn new(client: &'a NodeClient, address: &str) -> Self {
        Self { client, address: address.to_string() }
    }
}

#[async_trait::async_trait]
impl<'a> InterestRateService for RemoteContract<'a> {
    async fn init(&self, precision: &str) -> BootResult<()> {
        self.client.send(&self.address, "init", json!([precision])).await
    }
}

#[async_trait::async_trait]
impl<'a> PriceOracleService for RemoteContract<'a> {
    async fn set_oracle(&self, oracle: &str) -> BootResult<()> {
        self.client.send(&self.address, "setOracle", json!([oracle])).await
    }

    async fn set_eth_to_usd_price(&self, price: &str) -> BootResult<()> {
        self.client.send(&self.address, "setEthToUsdPrice", json!([price])).await
    }

    async fn set_token_price_feed(&self, asset: &str, feed: &str) -> BootResult<()> {
        self.client
            .send(&self.address, "setTokenChainlinkMap", json!([asset, feed]))
            .await
    }

    async fn get(&self, asset: &str) -> BootResult<(String, String)> {
        let result = self
            .client
            .invoke(
                "contract_call",
                json!({ "to": self.address, "method": "get", "args": [asset] }),
            )
            .await?;
        let price = result.get(0).and_then(Value::as_str);
        let metadata = result.get(1).and_then(Value::as_str);
        match (price, metadata) {
            (Some(price), Some(metadata)) => Ok((price.to_string(), metadata.to_string())),
            _ => Err(NodeClient::failure(
                "contract_call",
                format!("malformed get() response for {asset}"),
            )),
        }
    }
}

#[async_trait::async_trait]
impl<'a> MarketRegistryService for RemoteContract<'a> {
    async fn set_initial_timestamp(&self, asset: &str) -> BootResult<()> {
        self.client
            .send(&self.address, "setInitialTimestamp", json!([asset]))
            .await
    }

    async fn init_collateral_market(
        &self,
        asset: &str,
        rate_model: &str,
        oracle: &str,
        decimals: u32,
    ) -> BootResult<()> {
        self.client
            .send(
                &self.address,
                "initCollateralMarket",
                json!([asset, rate_model, oracle, decimals]),
            )
            .await
    }

    async fn set_min_pledge_rate(&self, asset: &str, rate_wad: &str) -> BootResult<()> {
        self.client
            .send(&self.address, "setMinPledgeRate", json!([asset, rate_wad]))
            .await
    }

    async fn set_liquidation_discount(&self, asset: &str, discount_wad: &str) -> BootResult<()> {
        self.client
            .send(&self.address, "setLiquidationDiscount", json!([asset, discount_wad]))
            .await
    }
}

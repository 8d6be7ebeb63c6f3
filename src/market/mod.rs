// Market initialization module entrypoint
pub mod runlog; // append-only per-run action log
pub mod sequencer; // ordered per-asset configuration

pub use runlog::RunLog;
pub use sequencer::{Sequencer, ServiceAddresses};

use crate::error::BootResult;

/// Remote interest-rate model service.
#[async_trait::async_trait]
pub trait InterestRateService {
    /// One-time global initialization with the base decimal precision.
    async fn init(&self, precision: &str) -> BootResult<()>;
}

/// Remote price-oracle service.
#[async_trait::async_trait]
pub trait PriceOracleService {
    async fn set_oracle(&self, oracle: &str) -> BootResult<()>;
    async fn set_eth_to_usd_price(&self, price: &str) -> BootResult<()>;
    async fn set_token_price_feed(&self, asset: &str, feed: &str) -> BootResult<()>;
    /// Read back `(price, metadata)` for an asset.
    async fn get(&self, asset: &str) -> BootResult<(String, String)>;
}

/// Remote collateral-market registry (the pool contract).
#[async_trait::async_trait]
pub trait MarketRegistryService {
    async fn set_initial_timestamp(&self, asset: &str) -> BootResult<()>;
    async fn init_collateral_market(
        &self,
        asset: &str,
        rate_model: &str,
        oracle: &str,
        decimals: u32,
    ) -> BootResult<()>;
    async fn set_min_pledge_rate(&self, asset: &str, rate_wad: &str) -> BootResult<()>;
    async fn set_liquidation_discount(&self, asset: &str, discount_wad: &str) -> BootResult<()>;
}

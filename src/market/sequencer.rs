//! Ordered per-asset market configuration against the deployed services.
//!
//! The call order is a correctness requirement, not a convenience: a market's
//! timestamp marker and initialization must land before its rate settings, and
//! each call is awaited before the next. The first failure aborts everything
//! that follows; assets configured before it stay configured, and the run log
//! keeps every attempt for diagnosis.

use tracing::{debug, info};

use crate::error::BootResult;
use crate::market::{InterestRateService, MarketRegistryService, PriceOracleService, RunLog};
use crate::netenv::EnvironmentConfig;
use crate::wad;

/// Base decimal precision the interest-rate model is initialized with.
const RATE_MODEL_PRECISION: &str = "18";

/// Addresses phase 1 recorded for the services the sequencer drives.
#[derive(Debug, Clone)]
pub struct ServiceAddresses {
    pub interest_rate_model: String,
    pub price_oracles: String,
    pub pool_pawn: String,
}

pub struct Sequencer<'a> {
    rate: &'a dyn InterestRateService,
    oracle: &'a dyn PriceOracleService,
    registry: &'a dyn MarketRegistryService,
    addrs: ServiceAddresses,
}

impl<'a> Sequencer<'a> {
    pub fn new(
        rate: &'a dyn InterestRateService,
        oracle: &'a dyn PriceOracleService,
        registry: &'a dyn MarketRegistryService,
        addrs: ServiceAddresses,
    ) -> Self {
        Self { rate, oracle, registry, addrs }
    }

    pub async fn run(
        &self,
        network: &str,
        env: &EnvironmentConfig,
        log: &mut RunLog,
    ) -> BootResult<()> {
        log.line(&format!("init for network: {network}"))?;
        log.line(&format!("init use env: {}", serde_json::to_string(env)?))?;

        self.rate.init(RATE_MODEL_PRECISION).await?;
        info!("interest rate model initialized");

        self.oracle.set_oracle(&env.oracle).await?;
        self.oracle.set_eth_to_usd_price(&env.eth_to_usd_price).await?;
        info!(oracle = %env.oracle, eth_to_usd = %env.eth_to_usd_price, "price oracle configured");

        for token in &env.tokens {
            let discount = wad::percent_to_wad(&token.discount)?;
            let deposit_multiple = wad::to_wad(&token.deposit_multiple)?;

            // Logged before any call for this asset, so an aborted run still
            // shows what was about to happen.
            log.line(&format!(
                "symbol: {}, address: {}, discount: {}",
                token.symbol, token.address, discount
            ))?;
            log.line(&format!(
                "symbol: {}, address: {}, deposit_multiple: {}",
                token.symbol, token.address, deposit_multiple
            ))?;

            // A token without a feed still gets a market; only the feed
            // registration is skipped.
            if let Some(feed) = &token.chainlink_price {
                self.oracle.set_token_price_feed(&token.address, feed).await?;
                debug!(symbol = %token.symbol, feed = %feed, "price feed registered");
            }

            self.registry.set_initial_timestamp(&token.address).await?;
            self.registry
                .init_collateral_market(
                    &token.address,
                    &self.addrs.interest_rate_model,
                    &self.addrs.price_oracles,
                    token.decimals,
                )
                .await?;
            self.registry.set_min_pledge_rate(&token.address, &deposit_multiple).await?;
            self.registry.set_liquidation_discount(&token.address, &discount).await?;

            info!(
                symbol = %token.symbol,
                address = %token.address,
                discount = %discount,
                deposit_multiple = %deposit_multiple,
                "collateral market initialized"
            );
        }
        Ok(())
    }
}

//! The bank contract stack, in deployment order.

/// Manifest keys for the services the initialization phase drives.
pub const INTEREST_RATE_MODEL: &str = "InterestRateModel";
pub const PRICE_ORACLES: &str = "PriceOracles";
pub const POOL_PAWN: &str = "PoolPawn";

/// A deployable unit and the libraries it must be linked against first.
#[derive(Debug, Clone, Copy)]
pub struct ComponentSpec {
    pub name: &'static str,
    pub links: &'static [&'static str],
}

/// The full stack in link order. The order is declared by hand, not computed;
/// the deployer still refuses to deploy a component whose dependency has no
/// address yet.
pub const BANK_PLAN: &[ComponentSpec] = &[
    ComponentSpec { name: "SignedSafeMath", links: &[] },
    ComponentSpec { name: "FixidityLib", links: &["SignedSafeMath"] },
    ComponentSpec { name: "LogarithmLib", links: &["FixidityLib"] },
    ComponentSpec { name: "ExponentLib", links: &["FixidityLib", "LogarithmLib"] },
    ComponentSpec {
        name: INTEREST_RATE_MODEL,
        links: &["FixidityLib", "LogarithmLib", "ExponentLib"],
    },
    ComponentSpec { name: PRICE_ORACLES, links: &[] },
    ComponentSpec { name: POOL_PAWN, links: &[] },
];

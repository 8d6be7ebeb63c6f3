//! Decimal-string to 10^18 fixed-point ("wad") conversion.
//!
//! Risk parameters go on chain as integers scaled by 10^18. All arithmetic
//! here runs through `rust_decimal`; floats silently lose precision at 18
//! decimal places and must never touch these values.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{BootError, BootResult};

/// Scale a plain decimal value: `round(v * 10^18)` as an integer string.
/// Used for ratios like the deposit multiple ("1.5" -> "1500000000000000000").
pub fn to_wad(v: &str) -> BootResult<String> {
    scale(parse(v)?, v)
}

/// Scale a percentage value: `round(v / 100 * 10^18)` as an integer string.
/// Used for the liquidation discount ("5" -> "50000000000000000").
pub fn percent_to_wad(v: &str) -> BootResult<String> {
    let d = parse(v)?
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or_else(|| BootError::InvalidDecimalInput(v.to_string()))?;
    scale(d, v)
}

fn parse(v: &str) -> BootResult<Decimal> {
    let d = Decimal::from_str(v.trim())
        .map_err(|_| BootError::InvalidDecimalInput(v.to_string()))?;
    // Risk parameters are non-negative by invariant.
    if d.is_sign_negative() {
        return Err(BootError::InvalidDecimalInput(v.to_string()));
    }
    Ok(d)
}

fn scale(d: Decimal, raw: &str) -> BootResult<String> {
    let scaled = d
        .checked_mul(Decimal::new(1_000_000_000_000_000_000, 0))
        .ok_or_else(|| BootError::InvalidDecimalInput(raw.to_string()))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let n = scaled
        .to_u128()
        .ok_or_else(|| BootError::InvalidDecimalInput(raw.to_string()))?;
    Ok(n.to_string())
}

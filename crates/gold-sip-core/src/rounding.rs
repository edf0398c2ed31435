//! Boundary rounding applied to every figure the engine returns.
//!
//! Arithmetic runs at full `Decimal` precision; values are rounded once, when
//! they are placed into a result record. Midpoints round to even
//! (banker's rounding), matching the half-even behaviour users see from
//! the spreadsheet-style calculators this engine replaces.

use rust_decimal::{Decimal, RoundingStrategy};

pub const MONEY_DP: u32 = 2;
pub const WEIGHT_DP: u32 = 3;
pub const PERCENT_DP: u32 = 2;

const STRATEGY: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

pub fn round_money(value: Decimal) -> Decimal {
    round_to(value, MONEY_DP)
}

pub fn round_weight(value: Decimal) -> Decimal {
    round_to(value, WEIGHT_DP)
}

pub fn round_percent(value: Decimal) -> Decimal {
    round_to(value, PERCENT_DP)
}

fn round_to(value: Decimal, dp: u32) -> Decimal {
    let rounded = value.round_dp_with_strategy(dp, STRATEGY);
    // A tiny negative residue must not print as "-0.00".
    if rounded.is_zero() {
        rounded.abs()
    } else {
        rounded
    }
}

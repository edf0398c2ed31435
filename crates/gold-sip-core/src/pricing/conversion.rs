use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::GoldSipError;
use crate::types::Money;
use crate::GoldSipResult;

/// Grams in one troy ounce, as used by the rupee gold desks.
pub const TROY_OUNCE_GRAMS: Decimal = dec!(31.1035);

/// USD→INR rate assumed when no live rate is configured.
pub const DEFAULT_USD_INR: Decimal = dec!(83.0);

/// Convert a USD per troy ounce quote into INR per gram.
pub fn usd_per_ounce_to_inr_per_gram(usd_per_ounce: Money, usd_inr: Decimal) -> GoldSipResult<Money> {
    if usd_per_ounce <= Decimal::ZERO {
        return Err(GoldSipError::invalid("usd_per_ounce", "must be greater than zero"));
    }
    if usd_inr <= Decimal::ZERO {
        return Err(GoldSipError::invalid("usd_inr", "must be greater than zero"));
    }
    Ok(usd_per_ounce / TROY_OUNCE_GRAMS * usd_inr)
}

/// Metal price feeds quote "ounces per dollar"; invert to USD per ounce.
pub fn ounces_per_usd_to_usd_per_ounce(ounces_per_usd: Decimal) -> GoldSipResult<Money> {
    if ounces_per_usd <= Decimal::ZERO {
        return Err(GoldSipError::invalid("ounces_per_usd", "must be greater than zero"));
    }
    Ok(Decimal::ONE / ounces_per_usd)
}

//! Reverse CAGR problems: which prices produce a given growth rate.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::GoldSipError;
use crate::rounding::{round_money, round_percent, round_weight};
use crate::sip::returns::compound_annual_growth;
use crate::sip::{require_months, require_positive};
use crate::types::{Grams, Money, Percent};
use crate::GoldSipResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetCagrInput {
    pub monthly_amount: Money,
    pub duration_months: u32,
    pub current_gold_price: Money,
    /// Target CAGR in percent (12.5 = 12.5% a year)
    pub target_cagr: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCagrOutput {
    pub total_investment: Money,
    pub target_total_value: Money,
    pub required_total_weight: Grams,
    /// Average purchase price that yields `target_cagr` under the
    /// uniform-average model
    pub required_average_price: Money,
}

/// `(1 + pct/100)^years`, failing outside the decimal range.
fn growth_factor(pct: Percent, years: Decimal) -> GoldSipResult<Decimal> {
    let base = Decimal::ONE + pct / dec!(100);
    if base <= Decimal::ZERO {
        return Err(GoldSipError::DomainError(format!(
            "growth of {pct}% per year leaves nothing to compound"
        )));
    }
    base.checked_powd(years).ok_or_else(|| {
        GoldSipError::DomainError(format!("{base}^{years} is outside the decimal range"))
    })
}

/// Average purchase price a SIP must have achieved for its value at
/// `current_gold_price` to represent `target_cagr`.
pub fn required_average_price(input: &TargetCagrInput) -> GoldSipResult<TargetCagrOutput> {
    require_positive("monthly_amount", input.monthly_amount)?;
    require_months("duration_months", input.duration_months)?;
    require_positive("current_gold_price", input.current_gold_price)?;

    let months = Decimal::from(input.duration_months);
    let years = months / dec!(12);
    let total_investment = input.monthly_amount * months;

    let target_total_value = total_investment * growth_factor(input.target_cagr, years)?;
    let required_total_weight = target_total_value / input.current_gold_price;
    let required_average_price = total_investment / required_total_weight;

    Ok(TargetCagrOutput {
        total_investment,
        target_total_value: round_money(target_total_value),
        required_total_weight: round_weight(required_total_weight),
        required_average_price: round_money(required_average_price),
    })
}

/// Price after `years` of growth at `cagr` percent a year.
pub fn project_price(start_price: Money, years: Decimal, cagr: Percent) -> GoldSipResult<Money> {
    require_positive("start_price", start_price)?;
    if years < Decimal::ZERO {
        return Err(GoldSipError::invalid("years", "must not be negative"));
    }
    Ok(round_money(start_price * growth_factor(cagr, years)?))
}

/// Annual growth rate, in percent, between two prices `years` apart.
pub fn point_to_point_cagr(
    start_price: Money,
    end_price: Money,
    years: Decimal,
) -> GoldSipResult<Percent> {
    require_positive("start_price", start_price)?;
    require_positive("end_price", end_price)?;
    require_positive("years", years)?;
    compound_annual_growth(end_price, start_price, years).map(round_percent)
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::GoldSipError;
use crate::rounding::round_weight;
use crate::sip::{offset_by_months, require_months, require_positive};
use crate::types::{Grams, Money, Rate};
use crate::GoldSipResult;

/// Default first-month price (INR per gram) of the synthesized series.
pub const DEFAULT_BASE_PRICE: Money = dec!(7500);

/// Default linear monthly step of the synthesized series (1% of base per
/// month, roughly 12.5% a year).
pub const DEFAULT_MONTHLY_STEP: Rate = dec!(0.01);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Price path used when the caller supplies no series:
/// `price[i] = base_price * (1 + monthly_step * i)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticPriceModel {
    pub base_price: Money,
    pub monthly_step: Rate,
}

impl Default for SyntheticPriceModel {
    fn default() -> Self {
        Self {
            base_price: DEFAULT_BASE_PRICE,
            monthly_step: DEFAULT_MONTHLY_STEP,
        }
    }
}

impl SyntheticPriceModel {
    pub fn price_at(&self, month_index: u32) -> Money {
        self.base_price * (Decimal::ONE + self.monthly_step * Decimal::from(month_index))
    }

    pub fn series(&self, months: u32) -> Vec<Money> {
        (0..months).map(|i| self.price_at(i)).collect()
    }
}

/// Input for the month-by-month simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownInput {
    pub monthly_amount: Money,
    pub duration_months: u32,
    /// Price per gram for month 0..N-1. A short series holds its last price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_series: Option<Vec<Money>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Used only when `price_series` is absent or empty.
    #[serde(default)]
    pub price_model: SyntheticPriceModel,
}

/// One simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// 1-based month number
    pub month: u32,
    pub date: Option<NaiveDate>,
    pub contribution: Money,
    pub gold_price: Money,
    pub weight_bought: Grams,
    pub cumulative_weight: Grams,
    pub cumulative_investment: Money,
}

/// Where the simulated prices came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    /// Caller series covering every month
    Supplied,
    /// Caller series; the last price was held for `held_months` months
    SuppliedWithHold { held_months: u32 },
    /// Series generated from the synthetic price model
    Synthesized,
}

impl BreakdownInput {
    pub fn new(monthly_amount: Money, duration_months: u32) -> Self {
        Self {
            monthly_amount,
            duration_months,
            price_series: None,
            start_date: None,
            price_model: SyntheticPriceModel::default(),
        }
    }

    fn supplied_series(&self) -> Option<&[Money]> {
        self.price_series.as_deref().filter(|s| !s.is_empty())
    }

    /// Describe how prices will be sourced for this input.
    pub fn price_source(&self) -> PriceSource {
        match self.supplied_series() {
            None => PriceSource::Synthesized,
            Some(series) => {
                let len = u32::try_from(series.len()).unwrap_or(u32::MAX);
                if len >= self.duration_months {
                    PriceSource::Supplied
                } else {
                    PriceSource::SuppliedWithHold {
                        held_months: self.duration_months - len,
                    }
                }
            }
        }
    }

    pub fn validate(&self) -> GoldSipResult<()> {
        require_positive("monthly_amount", self.monthly_amount)?;
        require_months("duration_months", self.duration_months)?;
        match self.supplied_series() {
            Some(series) => {
                for (i, price) in series.iter().enumerate() {
                    require_positive(&format!("price_series[{i}]"), *price)?;
                }
            }
            None => {
                require_positive("price_model.base_price", self.price_model.base_price)?;
                // The last synthesized month must still be priced above zero.
                let last = self.price_model.price_at(self.duration_months - 1);
                if last <= Decimal::ZERO {
                    return Err(GoldSipError::invalid(
                        "price_model.monthly_step",
                        format!(
                            "drives month {} price to {last}",
                            self.duration_months
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Walk the plan month by month, buying `monthly_amount` of gold at each
/// month's price.
pub fn simulate_monthly_breakdown(input: &BreakdownInput) -> GoldSipResult<Vec<MonthlyRecord>> {
    input.validate()?;

    let synthesized;
    let prices: &[Money] = match input.supplied_series() {
        Some(series) => series,
        None => {
            synthesized = input.price_model.series(input.duration_months);
            &synthesized
        }
    };

    if let PriceSource::SuppliedWithHold { held_months } = input.price_source() {
        tracing::info!(
            series_len = prices.len(),
            held_months,
            "price series shorter than duration, holding last price"
        );
    }

    let mut records = Vec::with_capacity(input.duration_months as usize);
    let mut cumulative_weight = Decimal::ZERO;
    let mut cumulative_investment = Decimal::ZERO;

    for month in 0..input.duration_months {
        let gold_price = price_for_month(prices, month as usize)?;
        let weight_bought = input.monthly_amount / gold_price;
        cumulative_weight += weight_bought;
        cumulative_investment += input.monthly_amount;

        let date = input
            .start_date
            .map(|start| offset_by_months(start, month))
            .transpose()?;

        records.push(MonthlyRecord {
            month: month + 1,
            date,
            contribution: input.monthly_amount,
            gold_price,
            weight_bought: round_weight(weight_bought),
            cumulative_weight: round_weight(cumulative_weight),
            cumulative_investment,
        });
    }

    Ok(records)
}

/// Total grams bought over a breakdown at full precision (the per-record
/// figures are rounded).
pub fn total_weight(input: &BreakdownInput) -> GoldSipResult<Grams> {
    input.validate()?;
    let prices = match input.supplied_series() {
        Some(series) => series.to_vec(),
        None => input.price_model.series(input.duration_months),
    };
    (0..input.duration_months as usize)
        .map(|i| price_for_month(&prices, i).map(|price| input.monthly_amount / price))
        .sum()
}

/// Price for a 0-based month, holding the last price past the end.
fn price_for_month(prices: &[Money], index: usize) -> GoldSipResult<Money> {
    prices
        .get(index)
        .or_else(|| prices.last())
        .copied()
        .ok_or_else(|| GoldSipError::invalid("price_series", "must contain at least one price"))
}

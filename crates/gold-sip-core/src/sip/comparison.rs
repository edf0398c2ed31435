use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rounding::{round_money, round_weight};
use crate::sip::breakdown::{self, BreakdownInput, PriceSource, SyntheticPriceModel};
use crate::sip::returns::SipParameters;
use crate::types::{Grams, Money};
use crate::GoldSipResult;

/// Gram totals from the uniform-average model and the month-by-month model
/// for the same plan. The two are expected to differ whenever prices move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    pub aggregate_total_weight: Grams,
    pub simulated_total_weight: Grams,
    /// simulated minus aggregate
    pub weight_difference: Grams,
    pub aggregate_current_value: Money,
    pub simulated_current_value: Money,
    /// Total investment divided by simulated grams
    pub simulated_average_price: Money,
    pub price_source: PriceSource,
}

/// Run both models over `params` and report where they diverge. The series
/// follows the breakdown rules: a short series holds its last price, and a
/// missing one is synthesized with the default model.
pub fn compare_models(
    params: &SipParameters,
    price_series: Option<Vec<Money>>,
) -> GoldSipResult<ModelComparison> {
    params.validate()?;

    let breakdown_input = BreakdownInput {
        monthly_amount: params.monthly_amount,
        duration_months: params.duration_months,
        price_series,
        start_date: params.start_date,
        price_model: SyntheticPriceModel::default(),
    };

    let aggregate = params.uniform_total_weight();
    let simulated = breakdown::total_weight(&breakdown_input)?;
    let total_investment = params.monthly_amount * Decimal::from(params.duration_months);

    Ok(ModelComparison {
        aggregate_total_weight: round_weight(aggregate),
        simulated_total_weight: round_weight(simulated),
        weight_difference: round_weight(simulated - aggregate),
        aggregate_current_value: round_money(aggregate * params.current_gold_price),
        simulated_current_value: round_money(simulated * params.current_gold_price),
        simulated_average_price: round_money(total_investment / simulated),
        price_source: breakdown_input.price_source(),
    })
}

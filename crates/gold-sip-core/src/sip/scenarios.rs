use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::sip::returns::{calculate_sip_returns, SipParameters, SipResult};
use crate::GoldSipResult;

/// A named parameter set to evaluate alongside others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipScenario {
    pub name: String,
    #[serde(flatten)]
    pub parameters: SipParameters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub result: SipResult,
}

/// Evaluate each scenario in order. The first invalid scenario aborts the
/// run with its own error.
pub fn run_scenarios(scenarios: &[SipScenario]) -> GoldSipResult<Vec<ScenarioResult>> {
    scenarios
        .iter()
        .map(|scenario| {
            calculate_sip_returns(&scenario.parameters).map(|result| ScenarioResult {
                name: scenario.name.clone(),
                result,
            })
        })
        .collect()
}

/// Three reference plans marked at ₹10,500/gram: a recent short SIP, a
/// medium-term one, and a long-term one bought at lower prices.
pub fn default_scenarios() -> Vec<SipScenario> {
    let scenario = |name: &str, amount, months, avg| SipScenario {
        name: name.to_string(),
        parameters: SipParameters {
            monthly_amount: amount,
            duration_months: months,
            average_gold_price: avg,
            current_gold_price: dec!(10500),
            start_date: None,
        },
    };
    vec![
        scenario("Conservative (Recent SIP)", dec!(5000), 24, dec!(9000)),
        scenario("Moderate (Historical SIP)", dec!(10000), 36, dec!(7500)),
        scenario("Aggressive (Long-term SIP)", dec!(20000), 60, dec!(6000)),
    ]
}

use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use gold_sip_core::sip::breakdown::BreakdownInput;
use gold_sip_core::sip::returns::SipParameters;
use gold_sip_core::sip::scenarios::SipScenario;
use gold_sip_core::sip::targets::TargetCagrInput;
use gold_sip_core::Money;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[derive(Deserialize)]
struct ComparisonRequest {
    #[serde(flatten)]
    parameters: SipParameters,
    #[serde(default)]
    price_series: Option<Vec<Money>>,
}

// ---------------------------------------------------------------------------
// Valuation
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_sip_returns(input_json: String) -> NapiResult<String> {
    let input: SipParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        gold_sip_core::sip::returns::calculate_sip_returns(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn simulate_monthly_breakdown(input_json: String) -> NapiResult<String> {
    let input: BreakdownInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = gold_sip_core::sip::breakdown::simulate_monthly_breakdown(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Returns the plain-text summary, not JSON.
#[napi]
pub fn format_summary(input_json: String) -> NapiResult<String> {
    let input: SipParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let result =
        gold_sip_core::sip::returns::calculate_sip_returns(&input).map_err(to_napi_error)?;
    Ok(gold_sip_core::sip::summary::format_summary(&result))
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_models(input_json: String) -> NapiResult<String> {
    let input: ComparisonRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        gold_sip_core::sip::comparison::compare_models(&input.parameters, input.price_series)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Takes a list of named scenarios; an empty list runs the built-in set.
#[napi]
pub fn run_scenarios(input_json: String) -> NapiResult<String> {
    let mut scenarios: Vec<SipScenario> =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    if scenarios.is_empty() {
        scenarios = gold_sip_core::sip::scenarios::default_scenarios();
    }
    let output =
        gold_sip_core::sip::scenarios::run_scenarios(&scenarios).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn required_average_price(input_json: String) -> NapiResult<String> {
    let input: TargetCagrInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        gold_sip_core::sip::targets::required_average_price(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

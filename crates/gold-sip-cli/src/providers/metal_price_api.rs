use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use gold_sip_core::pricing::conversion::{
    ounces_per_usd_to_usd_per_ounce, usd_per_ounce_to_inr_per_gram,
};
use gold_sip_core::pricing::{GoldPriceProvider, GoldPriceQuote};
use gold_sip_core::rounding::round_money;
use gold_sip_core::{GoldSipError, GoldSipResult};

const BASE_URL: &str = "https://api.metalpriceapi.com/v1/latest";
const PROVIDER_ID: &str = "MetalPriceAPI";
const GOLD_SYMBOL: &str = "XAU";
const CONFIDENCE: Decimal = dec!(0.95);

#[derive(Debug, Deserialize)]
struct MetalPriceResponse {
    success: bool,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

/// Gold spot from metalpriceapi.com, converted to INR per gram at a fixed
/// USD/INR rate.
pub struct MetalPriceApiProvider {
    client: reqwest::blocking::Client,
    api_key: String,
    usd_inr: Decimal,
}

impl MetalPriceApiProvider {
    pub fn new(api_key: impl Into<String>, usd_inr: Decimal, timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            client,
            api_key: api_key.into(),
            usd_inr,
        }
    }

    fn fetch(&self) -> Result<MetalPriceResponse, reqwest::Error> {
        self.client
            .get(BASE_URL)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("base", "USD"),
                ("symbols", GOLD_SYMBOL),
            ])
            .send()?
            .error_for_status()?
            .json::<MetalPriceResponse>()
    }
}

fn unavailable(reason: impl Into<String>) -> GoldSipError {
    GoldSipError::UpstreamUnavailable {
        source_label: PROVIDER_ID.to_string(),
        reason: reason.into(),
    }
}

fn quote_from_response(
    response: &MetalPriceResponse,
    usd_inr: Decimal,
    timestamp: DateTime<Utc>,
) -> GoldSipResult<GoldPriceQuote> {
    if !response.success {
        return Err(unavailable("API reported failure"));
    }
    let rate = response
        .rates
        .get(GOLD_SYMBOL)
        .ok_or_else(|| unavailable(format!("response has no {GOLD_SYMBOL} rate")))?;
    let ounces_per_usd = Decimal::try_from(*rate)
        .map_err(|e| unavailable(format!("unusable {GOLD_SYMBOL} rate {rate}: {e}")))?;

    let usd_per_ounce = ounces_per_usd_to_usd_per_ounce(ounces_per_usd)
        .map_err(|e| unavailable(e.to_string()))?;
    let inr_per_gram = usd_per_ounce_to_inr_per_gram(usd_per_ounce, usd_inr)?;

    GoldPriceQuote::new(round_money(inr_per_gram), CONFIDENCE, PROVIDER_ID, timestamp)
}

impl GoldPriceProvider for MetalPriceApiProvider {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    fn current_price(&self) -> GoldSipResult<GoldPriceQuote> {
        let response = self.fetch().map_err(|e| unavailable(e.to_string()))?;
        let quote = quote_from_response(&response, self.usd_inr, Utc::now())?;
        tracing::info!(price = %quote.price_per_gram, "fetched live gold price");
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> MetalPriceResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_quote_from_response() {
        // 1 / 0.0005 = 2000 USD/oz; 2000 / 31.1035 * 83 = 5337.02 INR/g
        let resp = response(r#"{"success": true, "base": "USD", "rates": {"XAU": 0.0005}}"#);
        let quote = quote_from_response(&resp, dec!(83.0), Utc::now()).unwrap();
        assert_eq!(quote.price_per_gram, dec!(5337.02));
        assert_eq!(quote.confidence, dec!(0.95));
        assert_eq!(quote.source, PROVIDER_ID);
    }

    #[test]
    fn test_unsuccessful_response_is_unavailable() {
        let resp = response(r#"{"success": false}"#);
        let err = quote_from_response(&resp, dec!(83.0), Utc::now()).unwrap_err();
        assert!(matches!(err, GoldSipError::UpstreamUnavailable { .. }));
    }

    #[test]
    fn test_missing_or_zero_rate_is_unavailable() {
        let missing = response(r#"{"success": true, "rates": {"XAG": 0.04}}"#);
        assert!(matches!(
            quote_from_response(&missing, dec!(83.0), Utc::now()),
            Err(GoldSipError::UpstreamUnavailable { .. })
        ));

        let zero = response(r#"{"success": true, "rates": {"XAU": 0.0}}"#);
        assert!(matches!(
            quote_from_response(&zero, dec!(83.0), Utc::now()),
            Err(GoldSipError::UpstreamUnavailable { .. })
        ));
    }
}

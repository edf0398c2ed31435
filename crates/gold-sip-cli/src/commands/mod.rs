pub mod chat;
pub mod price;
pub mod sip;

use std::time::Instant;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use gold_sip_core::pricing::{GoldPriceProvider, GoldPriceQuote};
use gold_sip_core::with_metadata;

use crate::input;
use crate::input::config::CliConfig;

/// Shared state handed to every command.
pub struct Context {
    pub config: CliConfig,
}

impl Context {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// Resolve the current price through the configured provider chain.
    pub fn live_quote(&self) -> Result<GoldPriceQuote, Box<dyn std::error::Error>> {
        let provider = crate::providers::build_price_provider(&self.config.pricing)?;
        let quote = provider.current_price().map_err(|e| {
            format!(
                "{e}; pass --current-price, set {} or configure pricing.manual_price",
                input::config::ENV_GOLD_PRICE
            )
        })?;
        Ok(quote)
    }
}

/// Typed request from `--input`, else piped stdin. `None` when neither was
/// given, so the caller can fall back to flags.
pub(crate) fn read_request<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(input::file::read_structured(path)?));
    }
    match input::stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
        None => Ok(None),
    }
}

/// Wrap a result in the standard envelope, timing from `started`.
pub(crate) fn envelope<T: Serialize>(
    started: Instant,
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> Result<Value, Box<dyn std::error::Error>> {
    let elapsed = started.elapsed().as_micros() as u64;
    let output = with_metadata(methodology, assumptions, warnings, elapsed, result);
    Ok(serde_json::to_value(output)?)
}

pub(crate) fn quote_warning(quote: &GoldPriceQuote) -> Option<String> {
    (quote.confidence < Decimal::ONE).then(|| {
        format!(
            "Current gold price {} taken from {} (confidence {})",
            quote.price_per_gram, quote.source, quote.confidence
        )
    })
}

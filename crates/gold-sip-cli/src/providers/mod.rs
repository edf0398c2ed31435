pub mod metal_price_api;

use std::time::Duration;

use gold_sip_core::pricing::{CachedPriceProvider, FixedPriceProvider, ProviderChain};

use crate::input::config::PricingConfig;
use metal_price_api::MetalPriceApiProvider;

/// Live feed first (when a key is configured), then the manual price.
/// The chain is wrapped in a quote cache.
pub fn build_price_provider(
    pricing: &PricingConfig,
) -> Result<CachedPriceProvider<ProviderChain>, Box<dyn std::error::Error>> {
    let mut chain = ProviderChain::new();

    if let Some(key) = pricing.metal_price_api_key.as_deref() {
        chain.push(Box::new(MetalPriceApiProvider::new(
            key,
            pricing.usd_inr_rate,
            Duration::from_secs(pricing.request_timeout_secs),
        )));
    }
    if let Some(price) = pricing.manual_price {
        chain.push(Box::new(FixedPriceProvider::new(price)?));
    }

    tracing::debug!(providers = chain.len(), "price provider chain built");
    Ok(CachedPriceProvider::with_ttl(
        chain,
        Duration::from_secs(pricing.cache_ttl_secs),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gold_sip_core::pricing::GoldPriceProvider;
    use rust_decimal_macros::dec;

    #[test]
    fn test_manual_price_only() {
        let pricing = PricingConfig {
            manual_price: Some(dec!(10450)),
            ..PricingConfig::default()
        };
        let provider = build_price_provider(&pricing).unwrap();
        let quote = provider.current_price().unwrap();
        assert_eq!(quote.price_per_gram, dec!(10450));
        assert_eq!(quote.source, "Manual");
    }

    #[test]
    fn test_nothing_configured_reports_unavailable() {
        let provider = build_price_provider(&PricingConfig::default()).unwrap();
        let err = provider.current_price().unwrap_err();
        assert!(err.to_string().contains("no price providers configured"));
    }
}

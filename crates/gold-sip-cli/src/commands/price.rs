use std::time::Instant;

use serde_json::{json, Value};

use super::{envelope, quote_warning, Context};

/// Current gold price from the configured providers.
pub fn run_price(ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let quote = ctx.live_quote()?;
    let pricing = &ctx.config.pricing;

    envelope(
        started,
        "First successful quote from live feed, then manual price",
        &json!({
            "usd_inr_rate": pricing.usd_inr_rate,
            "cache_ttl_secs": pricing.cache_ttl_secs,
            "live_feed_configured": pricing.metal_price_api_key.is_some(),
        }),
        quote_warning(&quote).into_iter().collect(),
        quote,
    )
}

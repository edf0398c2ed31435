use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use gold_sip_core::pricing::conversion::DEFAULT_USD_INR;
use gold_sip_core::sip::breakdown::SyntheticPriceModel;

use crate::input::file;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "gsip.yaml";

pub const ENV_API_KEY: &str = "GSIP_METALPRICEAPI_KEY";
pub const ENV_GOLD_PRICE: &str = "GSIP_GOLD_PRICE";

/// Settings shared by all subcommands.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub price_model: SyntheticPriceModel,
    pub pricing: PricingConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Price per gram used when no live source answers first
    pub manual_price: Option<Decimal>,
    pub metal_price_api_key: Option<String>,
    pub usd_inr_rate: Decimal,
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            manual_price: None,
            metal_price_api_key: None,
            usd_inr_rate: DEFAULT_USD_INR,
            cache_ttl_secs: 300,
            request_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows shown by the text breakdown appended to `summary`
    pub breakdown_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { breakdown_rows: 6 }
    }
}

impl CliConfig {
    /// Load from `path`, else `./gsip.yaml` if present, else defaults; then
    /// apply environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config: CliConfig = match path {
            Some(p) => file::read_structured(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                file::read_structured(DEFAULT_CONFIG_FILE)?
            }
            None => CliConfig::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        tracing::debug!(?config.price_model, "configuration loaded");
        Ok(config)
    }

    fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.pricing.metal_price_api_key = Some(key);
        }
        if let Some(raw) = lookup(ENV_GOLD_PRICE) {
            let price: Decimal = raw
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_GOLD_PRICE}='{raw}' is not a number: {e}"))?;
            self.pricing.manual_price = Some(price);
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.price_model.base_price <= Decimal::ZERO {
            return Err("price_model.base_price must be greater than zero".into());
        }
        if let Some(price) = self.pricing.manual_price {
            if price <= Decimal::ZERO {
                return Err("pricing.manual_price must be greater than zero".into());
            }
        }
        if self.pricing.usd_inr_rate <= dec!(0) {
            return Err("pricing.usd_inr_rate must be greater than zero".into());
        }
        if self.display.breakdown_rows == 0 {
            return Err("display.breakdown_rows must be at least 1".into());
        }
        Ok(())
    }
}

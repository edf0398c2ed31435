use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::GoldSipError;
use crate::types::Money;
use crate::GoldSipResult;

/// A gold price observation in INR per gram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldPriceQuote {
    pub price_per_gram: Money,
    /// 0.0 to 1.0
    pub confidence: Decimal,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

impl GoldPriceQuote {
    pub fn new(
        price_per_gram: Money,
        confidence: Decimal,
        source: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> GoldSipResult<Self> {
        if price_per_gram <= Decimal::ZERO {
            return Err(GoldSipError::invalid(
                "price_per_gram",
                format!("must be greater than zero (got {price_per_gram})"),
            ));
        }
        if confidence < Decimal::ZERO || confidence > Decimal::ONE {
            return Err(GoldSipError::invalid(
                "confidence",
                format!("must be between 0 and 1 (got {confidence})"),
            ));
        }
        Ok(Self {
            price_per_gram,
            confidence,
            source: source.into(),
            timestamp,
        })
    }
}

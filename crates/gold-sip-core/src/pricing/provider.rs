use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::Utc;
use rust_decimal::Decimal;

use crate::error::GoldSipError;
use crate::pricing::quote::GoldPriceQuote;
use crate::types::Money;
use crate::GoldSipResult;

/// Default lifetime of a cached quote.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// A source of the current gold price.
pub trait GoldPriceProvider: Send + Sync {
    /// Short label used in logs and error messages.
    fn id(&self) -> &str;

    /// Fetch the latest quote. Failures must be returned, never papered over
    /// with a made-up price.
    fn current_price(&self) -> GoldSipResult<GoldPriceQuote>;
}

impl<P: GoldPriceProvider + ?Sized> GoldPriceProvider for Box<P> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn current_price(&self) -> GoldSipResult<GoldPriceQuote> {
        (**self).current_price()
    }
}

// ---------------------------------------------------------------------------
// Fixed price
// ---------------------------------------------------------------------------

/// A price entered by hand. Always answers with full confidence.
#[derive(Debug, Clone)]
pub struct FixedPriceProvider {
    price_per_gram: Money,
    source: String,
}

impl FixedPriceProvider {
    pub fn new(price_per_gram: Money) -> GoldSipResult<Self> {
        Self::with_source(price_per_gram, "Manual")
    }

    pub fn with_source(price_per_gram: Money, source: impl Into<String>) -> GoldSipResult<Self> {
        if price_per_gram <= Decimal::ZERO {
            return Err(GoldSipError::invalid(
                "price_per_gram",
                format!("must be greater than zero (got {price_per_gram})"),
            ));
        }
        Ok(Self {
            price_per_gram,
            source: source.into(),
        })
    }
}

impl GoldPriceProvider for FixedPriceProvider {
    fn id(&self) -> &str {
        &self.source
    }

    fn current_price(&self) -> GoldSipResult<GoldPriceQuote> {
        GoldPriceQuote::new(self.price_per_gram, Decimal::ONE, &self.source, Utc::now())
    }
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// Tries providers in priority order and returns the first usable quote.
#[derive(Default)]
pub struct ProviderChain {
    providers: Vec<Box<dyn GoldPriceProvider>>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: impl GoldPriceProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn push(&mut self, provider: Box<dyn GoldPriceProvider>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl GoldPriceProvider for ProviderChain {
    fn id(&self) -> &str {
        "provider-chain"
    }

    fn current_price(&self) -> GoldSipResult<GoldPriceQuote> {
        let mut failures = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            match provider.current_price() {
                Ok(quote) if quote.price_per_gram > Decimal::ZERO => {
                    tracing::debug!(
                        provider = provider.id(),
                        price = %quote.price_per_gram,
                        "gold price resolved"
                    );
                    return Ok(quote);
                }
                Ok(quote) => {
                    tracing::warn!(
                        provider = provider.id(),
                        price = %quote.price_per_gram,
                        "provider returned a non-positive price"
                    );
                    failures.push(format!(
                        "{}: non-positive price {}",
                        provider.id(),
                        quote.price_per_gram
                    ));
                }
                Err(e) => {
                    tracing::warn!(provider = provider.id(), error = %e, "gold price provider failed");
                    failures.push(format!("{}: {e}", provider.id()));
                }
            }
        }

        let reason = if failures.is_empty() {
            "no price providers configured".to_string()
        } else {
            failures.join("; ")
        };
        Err(GoldSipError::UpstreamUnavailable {
            source_label: self.id().to_string(),
            reason,
        })
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Reuses the inner provider's last good quote for `ttl`. Errors are never
/// cached.
pub struct CachedPriceProvider<P> {
    inner: P,
    ttl: Duration,
    cached: Mutex<Option<(Instant, GoldPriceQuote)>>,
}

impl<P: GoldPriceProvider> CachedPriceProvider<P> {
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: Mutex::new(None),
        }
    }

    pub fn invalidate(&self) {
        *self.cached.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl<P: GoldPriceProvider> GoldPriceProvider for CachedPriceProvider<P> {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn current_price(&self) -> GoldSipResult<GoldPriceQuote> {
        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((fetched_at, quote)) = cached.as_ref() {
            if fetched_at.elapsed() < self.ttl {
                return Ok(quote.clone());
            }
        }

        let quote = self.inner.current_price()?;
        *cached = Some((Instant::now(), quote.clone()));
        Ok(quote)
    }
}

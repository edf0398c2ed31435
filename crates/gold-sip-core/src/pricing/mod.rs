//! The seam between the engine and live gold prices.
//!
//! The engine never fetches prices itself. Callers obtain a
//! [`GoldPriceQuote`] from a [`GoldPriceProvider`] and pass the price in as an
//! ordinary parameter. Provider failures surface as
//! [`GoldSipError::UpstreamUnavailable`](crate::GoldSipError::UpstreamUnavailable);
//! nothing in this module invents a price.

pub mod conversion;
pub mod provider;
pub mod quote;

pub use provider::{CachedPriceProvider, FixedPriceProvider, GoldPriceProvider, ProviderChain};
pub use quote::GoldPriceQuote;

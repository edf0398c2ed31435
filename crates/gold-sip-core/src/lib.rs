pub mod error;
pub mod rounding;
pub mod sip;
pub mod types;

#[cfg(feature = "pricing")]
pub mod pricing;

#[cfg(feature = "chat")]
pub mod chat;

pub use error::GoldSipError;
pub use types::*;

/// Standard result type for all gold-sip operations
pub type GoldSipResult<T> = Result<T, GoldSipError>;

//! The SIP return engine.
//!
//! Two independent models live here:
//! [`returns`] values the whole plan at a single average purchase price,
//! [`breakdown`] walks a month-by-month price series. Their gram totals only
//! agree when the series is flat at the average price; [`comparison`] puts
//! both side by side.

pub mod breakdown;
pub mod comparison;
pub mod returns;
pub mod scenarios;
pub mod summary;
pub mod targets;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::error::GoldSipError;
use crate::GoldSipResult;

/// Days per month used for every date offset in the engine. This is a flat
/// approximation, not calendar month arithmetic.
pub const DAYS_PER_MONTH: u64 = 30;

pub(crate) fn require_positive(field: &str, value: Decimal) -> GoldSipResult<()> {
    if value <= Decimal::ZERO {
        return Err(GoldSipError::invalid(
            field,
            format!("must be greater than zero (got {value})"),
        ));
    }
    Ok(())
}

pub(crate) fn require_months(field: &str, months: u32) -> GoldSipResult<()> {
    if months == 0 {
        return Err(GoldSipError::invalid(
            field,
            "must be a positive whole number of months",
        ));
    }
    Ok(())
}

/// `start + months * 30 days`.
pub fn offset_by_months(start: NaiveDate, months: u32) -> GoldSipResult<NaiveDate> {
    let days = u64::from(months) * DAYS_PER_MONTH;
    start.checked_add_days(Days::new(days)).ok_or_else(|| {
        GoldSipError::DateError(format!("{start} + {days} days is out of range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_offset_uses_thirty_day_months() {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        // 24 * 30 = 720 days, not 2024-01-01
        let end = offset_by_months(start, 24).unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2023, 12, 22).unwrap());
    }

    #[test]
    fn test_offset_zero_months_is_identity() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(offset_by_months(start, 0).unwrap(), start);
    }

    #[test]
    fn test_offset_overflow_is_date_error() {
        let err = offset_by_months(NaiveDate::MAX, 1).unwrap_err();
        assert!(matches!(err, GoldSipError::DateError(_)));
    }

    #[test]
    fn test_require_positive_names_field() {
        let err = require_positive("monthly_amount", dec!(-5)).unwrap_err();
        match err {
            GoldSipError::InvalidParameter { field, .. } => assert_eq!(field, "monthly_amount"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(require_positive("x", dec!(0.01)).is_ok());
    }
}

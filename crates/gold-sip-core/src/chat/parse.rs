use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::GoldSipError;
use crate::types::Money;
use crate::GoldSipResult;

/// Parse a rupee amount typed by a user: `10,000`, `₹ 7500.50`, `5000`.
pub fn parse_amount(field: &str, text: &str) -> GoldSipResult<Money> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != ',' && *c != '₹' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Err(GoldSipError::invalid(field, "no number entered"));
    }
    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| GoldSipError::invalid(field, format!("'{}' is not a number", text.trim())))?;
    if value <= Decimal::ZERO {
        return Err(GoldSipError::invalid(field, "must be greater than zero"));
    }
    Ok(value)
}

/// Parse a whole, positive number of months.
pub fn parse_duration(field: &str, text: &str) -> GoldSipResult<u32> {
    let trimmed = text.trim();
    if let Ok(months) = trimmed.parse::<u32>() {
        if months == 0 {
            return Err(GoldSipError::invalid(field, "must be at least one month"));
        }
        return Ok(months);
    }
    match Decimal::from_str(trimmed) {
        Ok(value) if value <= Decimal::ZERO => {
            Err(GoldSipError::invalid(field, "must be at least one month"))
        }
        Ok(_) => Err(GoldSipError::invalid(
            field,
            "must be a whole number of months",
        )),
        Err(_) => Err(GoldSipError::invalid(
            field,
            format!("'{trimmed}' is not a number of months"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_strips_symbols_and_separators() {
        assert_eq!(parse_amount("a", "10,000").unwrap(), dec!(10000));
        assert_eq!(parse_amount("a", " ₹ 7,500.50 ").unwrap(), dec!(7500.50));
        assert_eq!(parse_amount("a", "1e3").unwrap(), dec!(1000));
    }

    #[test]
    fn test_amount_rejects_garbage_and_non_positive() {
        assert!(parse_amount("a", "abc").is_err());
        assert!(parse_amount("a", "").is_err());
        assert!(parse_amount("a", "0").is_err());
        assert!(parse_amount("a", "-500").is_err());
        assert!(parse_amount("a", "NaN").is_err());
    }

    #[test]
    fn test_duration_requires_whole_months() {
        assert_eq!(parse_duration("d", " 24 ").unwrap(), 24);
        let err = parse_duration("d", "12.5").unwrap_err();
        assert!(err.to_string().contains("whole number"));
        assert!(parse_duration("d", "0").is_err());
        assert!(parse_duration("d", "-3").is_err());
        assert!(parse_duration("d", "two years").is_err());
    }
}

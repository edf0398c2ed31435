use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::GoldSipError;
use crate::rounding::{round_money, round_percent, round_weight};
use crate::sip::{offset_by_months, require_months, require_positive};
use crate::types::{Grams, Money, Percent};
use crate::GoldSipResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for an aggregate SIP valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipParameters {
    /// Contribution made every month (INR)
    pub monthly_amount: Money,
    /// Number of monthly contributions
    pub duration_months: u32,
    /// Assumed average purchase price over the plan (INR per gram)
    pub average_gold_price: Money,
    /// Market price used to value the holding (INR per gram)
    pub current_gold_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// Aggregate SIP valuation. Every figure is rounded at construction:
/// money to 2 dp, grams to 3 dp, percentages to 2 dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipResult {
    pub monthly_amount: Money,
    pub duration_months: u32,
    pub total_investment: Money,
    pub average_gold_price: Money,
    pub current_gold_price: Money,
    pub total_weight: Grams,
    pub current_value: Money,
    pub profit_loss: Money,
    pub profit_loss_percentage: Percent,
    pub cagr: Percent,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SipResult {
    pub fn is_profitable(&self) -> bool {
        self.profit_loss > Decimal::ZERO
    }

    pub fn years(&self) -> Decimal {
        Decimal::from(self.duration_months) / MONTHS_PER_YEAR
    }
}

impl SipParameters {
    pub fn validate(&self) -> GoldSipResult<()> {
        require_positive("monthly_amount", self.monthly_amount)?;
        require_months("duration_months", self.duration_months)?;
        require_positive("average_gold_price", self.average_gold_price)?;
        require_positive("current_gold_price", self.current_gold_price)?;
        Ok(())
    }

    /// Gold bought under the uniform-average model, at full precision.
    pub fn uniform_total_weight(&self) -> Grams {
        self.monthly_amount / self.average_gold_price * Decimal::from(self.duration_months)
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Value a SIP as if every monthly contribution bought gold at
/// `average_gold_price`, then mark the holding at `current_gold_price`.
pub fn calculate_sip_returns(params: &SipParameters) -> GoldSipResult<SipResult> {
    params.validate()?;

    let months = Decimal::from(params.duration_months);
    let total_investment = params.monthly_amount * months;

    let total_weight = params.uniform_total_weight();
    let current_value = total_weight * params.current_gold_price;

    let profit_loss = current_value - total_investment;
    let profit_loss_percentage = profit_loss / total_investment * HUNDRED;

    let years = months / MONTHS_PER_YEAR;
    let cagr = compound_annual_growth(current_value, total_investment, years)?;

    let end_date = params
        .start_date
        .map(|start| offset_by_months(start, params.duration_months))
        .transpose()?;

    let current_value = round_money(current_value);

    tracing::debug!(
        monthly_amount = %params.monthly_amount,
        duration_months = params.duration_months,
        %total_weight,
        %current_value,
        %cagr,
        "calculated SIP returns"
    );

    Ok(SipResult {
        monthly_amount: params.monthly_amount,
        duration_months: params.duration_months,
        total_investment,
        average_gold_price: params.average_gold_price,
        current_gold_price: params.current_gold_price,
        total_weight: round_weight(total_weight),
        current_value,
        // Taken from the rounded value so the result balances exactly.
        profit_loss: current_value - total_investment,
        profit_loss_percentage: round_percent(profit_loss_percentage),
        cagr: round_percent(cagr),
        start_date: params.start_date,
        end_date,
    })
}

/// CAGR in percent: `((end / start)^(1 / years) - 1) * 100`.
///
/// Returns zero for a zero-length horizon. A non-positive growth ratio, or
/// a power that leaves the decimal range, is a [`GoldSipError::DomainError`].
pub fn compound_annual_growth(
    end_value: Money,
    start_value: Money,
    years: Decimal,
) -> GoldSipResult<Percent> {
    if years.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if start_value <= Decimal::ZERO {
        return Err(GoldSipError::DomainError(format!(
            "CAGR needs a positive starting value (got {start_value})"
        )));
    }

    let ratio = end_value / start_value;
    if ratio <= Decimal::ZERO {
        return Err(GoldSipError::DomainError(format!(
            "CAGR is undefined for a growth ratio of {ratio} over {years} years"
        )));
    }

    let exponent = Decimal::ONE / years;
    let growth = if exponent == Decimal::ONE {
        ratio
    } else {
        ratio.checked_powd(exponent).ok_or_else(|| {
            GoldSipError::DomainError(format!(
                "CAGR power {ratio}^{exponent} is outside the decimal range"
            ))
        })?
    };

    Ok((growth - Decimal::ONE) * HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(amount: Decimal, months: u32, avg: Decimal, current: Decimal) -> SipParameters {
        SipParameters {
            monthly_amount: amount,
            duration_months: months,
            average_gold_price: avg,
            current_gold_price: current,
            start_date: None,
        }
    }

    #[test]
    fn test_one_year_cagr_equals_simple_return() {
        let result = calculate_sip_returns(&params(dec!(1000), 12, dec!(5000), dec!(5500))).unwrap();
        assert_eq!(result.profit_loss_percentage, dec!(10.00));
        assert_eq!(result.cagr, dec!(10.00));
    }

    #[test]
    fn test_loss_has_negative_cagr() {
        let result = calculate_sip_returns(&params(dec!(1000), 24, dec!(10000), dec!(8100))).unwrap();
        // ratio 0.81 over two years -> 0.9 per year
        assert_eq!(result.profit_loss, dec!(-4560.00));
        assert_eq!(result.cagr, dec!(-10.00));
        assert!(!result.is_profitable());
    }

    #[test]
    fn test_flat_price_breaks_even() {
        let result = calculate_sip_returns(&params(dec!(2500), 18, dec!(7000), dec!(7000))).unwrap();
        assert_eq!(result.profit_loss, Decimal::ZERO);
        assert_eq!(result.cagr, Decimal::ZERO);
        assert!(!result.is_profitable());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = calculate_sip_returns(&params(dec!(1000), 0, dec!(5000), dec!(5500))).unwrap_err();
        assert!(matches!(
            err,
            GoldSipError::InvalidParameter { ref field, .. } if field == "duration_months"
        ));
    }

    #[test]
    fn test_cagr_zero_years() {
        assert_eq!(
            compound_annual_growth(dec!(200), dec!(100), Decimal::ZERO).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_cagr_non_positive_ratio_is_domain_error() {
        let err = compound_annual_growth(Decimal::ZERO, dec!(100), dec!(2.5)).unwrap_err();
        assert!(matches!(err, GoldSipError::DomainError(_)));
        let err = compound_annual_growth(dec!(-50), dec!(100), dec!(0.5)).unwrap_err();
        assert!(matches!(err, GoldSipError::DomainError(_)));
    }
}

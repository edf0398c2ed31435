use chrono::NaiveDate;
use gold_sip_core::sip::returns::{self, SipParameters};
use gold_sip_core::GoldSipError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Aggregate SIP returns — uniform average price model
// ===========================================================================

fn two_year_plan() -> SipParameters {
    SipParameters {
        monthly_amount: dec!(10000),
        duration_months: 24,
        average_gold_price: dec!(8000),
        current_gold_price: dec!(10500),
        start_date: None,
    }
}

#[test]
fn test_two_year_plan_known_answer() {
    let result = returns::calculate_sip_returns(&two_year_plan()).unwrap();
    assert_eq!(result.total_investment, dec!(240000));
    assert_eq!(result.total_weight, dec!(30.000));
    assert_eq!(result.current_value, dec!(315000.00));
    assert_eq!(result.profit_loss, dec!(75000.00));
    assert_eq!(result.profit_loss_percentage, dec!(31.25));
    // 1.3125^(1/2) - 1 = 14.564...%
    assert!(
        (result.cagr - dec!(14.56)).abs() <= dec!(0.01),
        "Expected CAGR ~14.56%, got {}",
        result.cagr
    );
    assert!(result.is_profitable());
    assert_eq!(result.end_date, None);
}

#[test]
fn test_three_year_cagr_from_value_ratio() {
    let params = SipParameters {
        monthly_amount: dec!(10000),
        duration_months: 36,
        average_gold_price: dec!(6000),
        current_gold_price: dec!(10500),
        start_date: None,
    };
    let result = returns::calculate_sip_returns(&params).unwrap();
    // 60 g worth 630000 on 360000 invested: 1.75x over 3 years
    assert_eq!(result.total_weight, dec!(60));
    assert_eq!(result.current_value, dec!(630000));
    assert!(
        (result.cagr - dec!(20.51)).abs() <= dec!(0.01),
        "Expected CAGR ~20.51%, got {}",
        result.cagr
    );
}

#[test]
fn test_end_date_uses_thirty_day_months() {
    let mut params = two_year_plan();
    params.start_date = NaiveDate::from_ymd_opt(2022, 1, 1);
    let result = returns::calculate_sip_returns(&params).unwrap();
    assert_eq!(result.start_date, NaiveDate::from_ymd_opt(2022, 1, 1));
    assert_eq!(result.end_date, NaiveDate::from_ymd_opt(2023, 12, 22));
}

#[test]
fn test_weight_rounded_to_three_places() {
    let params = SipParameters {
        monthly_amount: dec!(15000),
        duration_months: 36,
        average_gold_price: dec!(7000),
        current_gold_price: dec!(10500),
        start_date: None,
    };
    let result = returns::calculate_sip_returns(&params).unwrap();
    // 15000/7000*36 = 77.142857...
    assert_eq!(result.total_weight, dec!(77.143));
    // value uses full precision grams: 77.142857... * 10500 = 810000
    assert_eq!(result.current_value, dec!(810000.00));
    assert_eq!(result.profit_loss, dec!(270000.00));
    assert_eq!(result.profit_loss_percentage, dec!(50.00));
}

#[test]
fn test_each_parameter_validated_by_name() {
    let cases: Vec<(&str, Box<dyn Fn(&mut SipParameters)>)> = vec![
        ("monthly_amount", Box::new(|p: &mut SipParameters| p.monthly_amount = dec!(0))),
        ("duration_months", Box::new(|p: &mut SipParameters| p.duration_months = 0)),
        ("average_gold_price", Box::new(|p: &mut SipParameters| p.average_gold_price = dec!(-1))),
        ("current_gold_price", Box::new(|p: &mut SipParameters| p.current_gold_price = dec!(0))),
    ];
    for (expected, mutate) in cases {
        let mut params = two_year_plan();
        mutate(&mut params);
        match returns::calculate_sip_returns(&params).unwrap_err() {
            GoldSipError::InvalidParameter { field, .. } => assert_eq!(field, expected),
            other => panic!("expected InvalidParameter for {expected}, got {other}"),
        }
    }
}

#[test]
fn test_idempotent() {
    let params = SipParameters {
        monthly_amount: dec!(3333.33),
        duration_months: 37,
        average_gold_price: dec!(7123.45),
        current_gold_price: dec!(9876.54),
        start_date: NaiveDate::from_ymd_opt(2021, 3, 15),
    };
    let a = returns::calculate_sip_returns(&params).unwrap();
    let b = returns::calculate_sip_returns(&params).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.cagr.serialize(), b.cagr.serialize());
}

#[test]
fn test_deserialize_parameters_from_json() {
    let json = r#"{
        "monthly_amount": "10000",
        "duration_months": 24,
        "average_gold_price": "8000",
        "current_gold_price": "10500",
        "start_date": "2022-01-01"
    }"#;
    let params: SipParameters = serde_json::from_str(json).unwrap();
    assert_eq!(params.start_date, NaiveDate::from_ymd_opt(2022, 1, 1));
    let result = returns::calculate_sip_returns(&params).unwrap();
    assert_eq!(result.profit_loss_percentage, dec!(31.25));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn cents(lo: i64, hi: i64) -> impl Strategy<Value = Decimal> {
    (lo..hi).prop_map(|c| Decimal::new(c, 2))
}

proptest! {
    #[test]
    fn prop_investment_is_exact_product(
        amount in cents(100, 10_000_000),
        months in 1u32..600,
        avg in cents(100_000, 2_000_000),
        current in cents(100_000, 2_000_000),
    ) {
        let params = SipParameters {
            monthly_amount: amount,
            duration_months: months,
            average_gold_price: avg,
            current_gold_price: current,
            start_date: None,
        };
        let result = returns::calculate_sip_returns(&params).unwrap();
        prop_assert_eq!(result.total_investment, amount * Decimal::from(months));
        prop_assert_eq!(result.profit_loss, result.current_value - result.total_investment);
        let expected_value = (params.uniform_total_weight() * current)
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointNearestEven);
        prop_assert_eq!(result.current_value, expected_value);
    }

    #[test]
    fn prop_higher_current_price_raises_value(
        amount in cents(100_000, 5_000_000),
        months in 1u32..240,
        avg in cents(100_000, 2_000_000),
        current in cents(100_000, 2_000_000),
        bump in 1i64..100_000,
    ) {
        let base = SipParameters {
            monthly_amount: amount,
            duration_months: months,
            average_gold_price: avg,
            current_gold_price: current,
            start_date: None,
        };
        let mut higher = base.clone();
        higher.current_gold_price = current + Decimal::from(bump);

        let low = returns::calculate_sip_returns(&base).unwrap();
        let high = returns::calculate_sip_returns(&higher).unwrap();
        prop_assert!(high.current_value > low.current_value);
        prop_assert!(high.profit_loss > low.profit_loss);
        prop_assert!(high.cagr >= low.cagr);
    }
}

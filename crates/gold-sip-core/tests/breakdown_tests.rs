use chrono::NaiveDate;
use gold_sip_core::sip::breakdown::{self, BreakdownInput, SyntheticPriceModel};
use gold_sip_core::sip::comparison;
use gold_sip_core::sip::returns::SipParameters;
use gold_sip_core::GoldSipError;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Month-by-month breakdown
// ===========================================================================

#[test]
fn test_default_series_six_months() {
    let input = BreakdownInput::new(dec!(5000), 6);
    let records = breakdown::simulate_monthly_breakdown(&input).unwrap();

    assert_eq!(records.len(), 6);
    assert_eq!(records[0].month, 1);
    assert_eq!(records[0].gold_price, dec!(7500));
    assert_eq!(records[0].weight_bought, dec!(0.667));
    assert_eq!(records[5].month, 6);
    assert_eq!(records[5].gold_price, dec!(7875));
    assert_eq!(records[5].cumulative_investment, dec!(30000));
    assert!(records.iter().all(|r| r.date.is_none()));
}

#[test]
fn test_short_series_holds_last_price() {
    let mut input = BreakdownInput::new(dec!(1000), 5);
    input.price_series = Some(vec![dec!(5000), dec!(4000)]);
    let records = breakdown::simulate_monthly_breakdown(&input).unwrap();

    let prices: Vec<Decimal> = records.iter().map(|r| r.gold_price).collect();
    assert_eq!(
        prices,
        vec![dec!(5000), dec!(4000), dec!(4000), dec!(4000), dec!(4000)]
    );
    // 0.2 + 4 * 0.25
    assert_eq!(records[4].cumulative_weight, dec!(1.2));
}

#[test]
fn test_long_series_truncated_to_duration() {
    let mut input = BreakdownInput::new(dec!(1000), 2);
    input.price_series = Some(vec![dec!(1000), dec!(2000), dec!(3000)]);
    let records = breakdown::simulate_monthly_breakdown(&input).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].gold_price, dec!(2000));
}

#[test]
fn test_empty_series_is_synthesized() {
    let mut input = BreakdownInput::new(dec!(1000), 3);
    input.price_series = Some(vec![]);
    let records = breakdown::simulate_monthly_breakdown(&input).unwrap();
    assert_eq!(records[2].gold_price, dec!(7650));
}

#[test]
fn test_custom_price_model() {
    let mut input = BreakdownInput::new(dec!(1000), 3);
    input.price_model = SyntheticPriceModel {
        base_price: dec!(1000),
        monthly_step: dec!(0.5),
    };
    let records = breakdown::simulate_monthly_breakdown(&input).unwrap();
    let prices: Vec<Decimal> = records.iter().map(|r| r.gold_price).collect();
    assert_eq!(prices, vec![dec!(1000), dec!(1500), dec!(2000)]);
}

#[test]
fn test_dates_step_thirty_days() {
    let mut input = BreakdownInput::new(dec!(1000), 3);
    input.start_date = NaiveDate::from_ymd_opt(2024, 1, 1);
    let records = breakdown::simulate_monthly_breakdown(&input).unwrap();
    assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2024, 1, 31));
    assert_eq!(records[2].date, NaiveDate::from_ymd_opt(2024, 3, 1));
}

#[test]
fn test_bad_price_in_series_named() {
    let mut input = BreakdownInput::new(dec!(1000), 3);
    input.price_series = Some(vec![dec!(1000), dec!(0)]);
    match breakdown::simulate_monthly_breakdown(&input).unwrap_err() {
        GoldSipError::InvalidParameter { field, .. } => assert_eq!(field, "price_series[1]"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_rejects_non_positive_amount_and_duration() {
    assert!(breakdown::simulate_monthly_breakdown(&BreakdownInput::new(dec!(0), 3)).is_err());
    assert!(breakdown::simulate_monthly_breakdown(&BreakdownInput::new(dec!(100), 0)).is_err());
}

#[test]
fn test_deserialize_without_model_uses_defaults() {
    let input: BreakdownInput =
        serde_json::from_str(r#"{"monthly_amount": "5000", "duration_months": 2}"#).unwrap();
    assert_eq!(input.price_model, SyntheticPriceModel::default());
    assert!(input.price_series.is_none());
}

#[test]
fn test_aggregate_and_simulated_models_diverge_on_default_series() {
    let params = SipParameters {
        monthly_amount: dec!(5000),
        duration_months: 6,
        average_gold_price: dec!(7500),
        current_gold_price: dec!(8000),
        start_date: None,
    };
    let cmp = comparison::compare_models(&params, None).unwrap();
    assert_eq!(cmp.aggregate_total_weight, dec!(4));
    // rising prices buy fewer grams than the flat 7500 assumption
    assert!(cmp.simulated_total_weight < cmp.aggregate_total_weight);
    assert!(cmp.weight_difference < Decimal::ZERO);
}

proptest! {
    #[test]
    fn prop_cumulative_fields_are_prefix_sums(
        amount in (100i64..1_000_000).prop_map(|c| Decimal::new(c, 2)),
        months in 1u32..120,
        series in prop::collection::vec((100_000i64..2_000_000).prop_map(|c| Decimal::new(c, 2)), 0..60),
    ) {
        let mut input = BreakdownInput::new(amount, months);
        input.price_series = Some(series.clone());
        let records = breakdown::simulate_monthly_breakdown(&input).unwrap();

        prop_assert_eq!(records.len(), months as usize);
        for (i, record) in records.iter().enumerate() {
            prop_assert_eq!(record.month as usize, i + 1);
            prop_assert_eq!(record.cumulative_investment, amount * Decimal::from(i as u32 + 1));
            if i > 0 {
                prop_assert!(record.cumulative_weight >= records[i - 1].cumulative_weight);
            }
            if !series.is_empty() {
                let expected = *series.get(i).unwrap_or_else(|| series.last().unwrap());
                prop_assert_eq!(record.gold_price, expected);
            }
        }
    }
}

//! Plain-text rendering of engine results.

use rust_decimal::Decimal;

use crate::sip::breakdown::MonthlyRecord;
use crate::sip::returns::SipResult;
use crate::types::{Grams, Money};

pub const CURRENCY_SYMBOL: &str = "₹";

const PROFIT_LINE: &str = "🎉 Congratulations! Your investment is in profit.";
const LOSS_LINE: &str =
    "📉 Your investment is currently at a loss, but gold is a long-term investment.";

/// `₹1,234,567.89`. Negative amounts keep the sign after the symbol.
pub fn format_currency(amount: Money) -> String {
    format!("{CURRENCY_SYMBOL}{}", group_thousands(&format!("{:.2}", amount)))
}

/// `₹1,234,568`, for whole-rupee tables.
pub fn format_currency_whole(amount: Money) -> String {
    format!("{CURRENCY_SYMBOL}{}", group_thousands(&format!("{:.0}", amount)))
}

pub fn format_weight(grams: Grams) -> String {
    format!("{:.3} grams", grams)
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// The closing line: congratulations only for a strictly positive result.
pub fn closing_line(profit_loss: Money) -> &'static str {
    if profit_loss > Decimal::ZERO {
        PROFIT_LINE
    } else {
        LOSS_LINE
    }
}

/// Human-readable summary of an aggregate valuation.
pub fn format_summary(result: &SipResult) -> String {
    let lines = [
        "🏆 **Gold SIP Investment Summary**".to_string(),
        String::new(),
        "💰 **Investment Details:**".to_string(),
        format!("• Monthly SIP: {}", format_currency(result.monthly_amount)),
        format!("• Duration: {} months", result.duration_months),
        format!("• Total Invested: {}", format_currency(result.total_investment)),
        String::new(),
        "📊 **Gold Purchase:**".to_string(),
        format!(
            "• Average Gold Price: {}/gram",
            format_currency(result.average_gold_price)
        ),
        format!("• Total Gold Purchased: {}", format_weight(result.total_weight)),
        String::new(),
        "💎 **Current Status:**".to_string(),
        format!(
            "• Current Gold Price: {}/gram",
            format_currency(result.current_gold_price)
        ),
        format!("• Current Value: {}", format_currency(result.current_value)),
        String::new(),
        "📈 **Returns:**".to_string(),
        format!(
            "• Profit/Loss: {} ({:.2}%)",
            format_currency(result.profit_loss),
            result.profit_loss_percentage
        ),
        format!("• CAGR: {:.2}% per annum", result.cagr),
        String::new(),
        closing_line(result.profit_loss).to_string(),
    ];
    lines.join("\n")
}

/// Short text table of the first `max_rows` months, with a trailer counting
/// the rows left out.
pub fn format_breakdown(records: &[MonthlyRecord], max_rows: usize) -> String {
    let mut text = String::from("📊 **Monthly Investment Breakdown**\n\n");
    for record in records.iter().take(max_rows) {
        text.push_str(&format!(
            "**Month {}:** Invested {}, Gold Price: {}/gram, Bought: {:.3}g\n",
            record.month,
            format_currency_whole(record.contribution),
            format_currency_whole(record.gold_price),
            record.weight_bought
        ));
    }
    if records.len() > max_rows {
        text.push_str(&format!(
            "... (and {} more months)\n",
            records.len() - max_rows
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0.50"), "0.50");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("315000.00"), "315,000.00");
        assert_eq!(group_thousands("-1234567.89"), "-1,234,567.89");
    }

    #[test]
    fn test_format_currency_pads_to_two_places() {
        assert_eq!(format_currency(dec!(10000)), "₹10,000.00");
        assert_eq!(format_currency(dec!(-4560)), "₹-4,560.00");
        assert_eq!(format_currency_whole(dec!(7575)), "₹7,575");
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(dec!(30)), "30.000 grams");
        assert_eq!(format_weight(dec!(0.667)), "0.667 grams");
    }

    #[test]
    fn test_closing_line_zero_is_cautionary() {
        assert_eq!(closing_line(Decimal::ZERO), LOSS_LINE);
        assert_eq!(closing_line(dec!(0.01)), PROFIT_LINE);
    }
}

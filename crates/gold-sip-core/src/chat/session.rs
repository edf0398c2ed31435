use chrono::{Days, NaiveDate};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::chat::parse::{parse_amount, parse_duration};
use crate::error::GoldSipError;
use crate::pricing::GoldPriceProvider;
use crate::sip::breakdown::{simulate_monthly_breakdown, BreakdownInput};
use crate::sip::returns::{calculate_sip_returns, SipParameters, SipResult};
use crate::sip::summary::{format_breakdown, format_currency, format_summary};
use crate::sip::DAYS_PER_MONTH;
use crate::types::Money;
use crate::GoldSipResult;

/// Months simulated for the in-chat breakdown sample.
const BREAKDOWN_SAMPLE_MONTHS: u32 = 12;
/// Rows of the sample shown in a reply.
const BREAKDOWN_VISIBLE_ROWS: usize = 6;

const AMOUNT_PROMPT: &str =
    "💰 Please enter your **monthly SIP amount** in INR (e.g., 5000, 10000):";

const MENU: &str = "🔄 Would you like to:
• Calculate for different values (type 'new')
• See monthly breakdown (type 'breakdown')
• Get investment tips (type 'tips')

Or just say 'thanks' to end our conversation!";

const UNKNOWN_COMMAND: &str = "I didn't understand that. You can:
• Type 'new' for a new calculation
• Type 'breakdown' for monthly details
• Type 'tips' for investment advice
• Type 'thanks' to end our conversation";

const TIPS: &str = "💡 **Gold SIP Investment Tips:**

✅ **Best Practices:**
• Invest consistently every month regardless of gold price
• Gold is a long-term investment (3+ years recommended)
• Don't invest more than 10-15% of portfolio in gold
• Consider Digital Gold for easy SIP investments

⚠️ **Things to Remember:**
• Gold doesn't give dividends or interest
• Price can be volatile in short term
• GST and making charges apply on physical gold
• Digital gold has lower costs and better liquidity

📈 **When to Invest:**
• Market uncertainty periods
• High inflation scenarios
• Portfolio diversification
• Wedding/festival planning

🔄 Type 'new' for another calculation or 'thanks' to end!";

const FAREWELL: &str = "🙏 Thank you for using the Gold SIP Calculator!

✨ Remember:
• Gold is a great portfolio diversifier
• Consistent investing beats timing the market
• Stay invested for the long term

Start a new session to calculate again anytime! 💛";

const COMPLETED: &str = "Hi! Please start a new session for another Gold SIP calculation. 😊";

/// Where the conversation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatState {
    Welcome,
    CollectingAmount,
    CollectingDuration,
    CollectingAveragePrice,
    CollectingCurrentPrice,
    /// Results have been shown; waiting for a menu command
    PostResultMenu,
    Completed,
}

/// A bot message, plus the valuation when this turn produced one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SipResult>,
}

impl ChatReply {
    fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            result: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Draft {
    monthly_amount: Option<Money>,
    duration_months: Option<u32>,
    average_gold_price: Option<Money>,
}

enum MenuCommand {
    New,
    Breakdown,
    Tips,
    Thanks,
    Unknown,
}

impl MenuCommand {
    fn parse(message: &str) -> Self {
        match message.trim().to_lowercase().as_str() {
            "new" | "calculate" | "restart" => MenuCommand::New,
            "breakdown" | "monthly" | "details" => MenuCommand::Breakdown,
            "tips" | "advice" | "help" => MenuCommand::Tips,
            "thanks" | "thank you" | "bye" | "goodbye" => MenuCommand::Thanks,
            _ => MenuCommand::Unknown,
        }
    }
}

/// One user's conversation.
#[derive(Debug, Clone)]
pub struct ChatSession {
    state: ChatState,
    draft: Draft,
    last_result: Option<SipResult>,
    as_of: Option<NaiveDate>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            state: ChatState::Welcome,
            draft: Draft::default(),
            last_result: None,
            as_of: None,
        }
    }

    /// Date the breakdown sample is dated back from. Without one the
    /// sample carries no dates.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn last_result(&self) -> Option<&SipResult> {
        self.last_result.as_ref()
    }

    /// Handle one user message. Unparseable answers are answered in-band
    /// and leave the state unchanged; calculation failures are returned.
    pub fn respond(
        &mut self,
        message: &str,
        prices: Option<&dyn GoldPriceProvider>,
    ) -> GoldSipResult<ChatReply> {
        let reply = match self.state {
            ChatState::Welcome => {
                self.state = ChatState::CollectingAmount;
                ChatReply::text(format!(
                    "🙏 Welcome to Gold SIP Calculator!\n\n\
                     I'll help you calculate your Gold SIP investment returns. Let's get started!\n\n\
                     {AMOUNT_PROMPT}"
                ))
            }
            ChatState::CollectingAmount => match parse_amount("monthly_amount", message) {
                Ok(amount) => {
                    self.draft.monthly_amount = Some(amount);
                    self.state = ChatState::CollectingDuration;
                    ChatReply::text(format!(
                        "Great! Monthly SIP amount: {}\n\n\
                         📅 Now, please enter the **investment duration** in months (e.g., 12, 24, 36):",
                        format_currency(amount)
                    ))
                }
                Err(_) => ChatReply::text(
                    "❌ Please enter a valid amount in numbers only (e.g., 5000, 10000)",
                ),
            },
            ChatState::CollectingDuration => match parse_duration("duration_months", message) {
                Ok(months) => {
                    self.draft.duration_months = Some(months);
                    self.state = ChatState::CollectingAveragePrice;
                    ChatReply::text(format!(
                        "Perfect! Duration: {months} months\n\n\
                         📊 Please enter the **average gold price** during your investment period in INR per gram.\n\n\
                         📈 For realistic returns (Gold has 12.5% historical CAGR):\n\
                         • Recent SIP (1-2 years): Use ₹9,000-9,500/gram\n\
                         • Medium-term (2-3 years): Use ₹7,500-8,500/gram\n\
                         • Long-term (5+ years): Use ₹5,000-7,000/gram\n\
                         {}\n\
                         Enter average gold price per gram:",
                        live_price_line(prices, "• Current price")
                    ))
                }
                Err(_) => {
                    ChatReply::text("❌ Please enter a valid number of months (e.g., 12, 24, 36)")
                }
            },
            ChatState::CollectingAveragePrice => {
                match parse_amount("average_gold_price", message) {
                    Ok(price) => {
                        self.draft.average_gold_price = Some(price);
                        self.state = ChatState::CollectingCurrentPrice;
                        ChatReply::text(format!(
                            "Noted! Average gold price: {}/gram\n\n\
                             💎 Finally, please enter the **current gold price** per gram in INR.\n\n\
                             {}\n\
                             Enter current gold price per gram:",
                            format_currency(price),
                            live_price_line(prices, "Live gold price")
                        ))
                    }
                    Err(_) => ChatReply::text(
                        "❌ Please enter a valid gold price (e.g., 7000, 8000, 9000)",
                    ),
                }
            }
            ChatState::CollectingCurrentPrice => {
                match parse_amount("current_gold_price", message) {
                    Ok(price) => self.show_results(price)?,
                    Err(_) => ChatReply::text(
                        "❌ Please enter a valid current gold price (e.g., 10200, 10500)",
                    ),
                }
            }
            ChatState::PostResultMenu => self.handle_menu(message)?,
            ChatState::Completed => ChatReply::text(COMPLETED),
        };

        tracing::debug!(state = ?self.state, "chat turn handled");
        Ok(reply)
    }

    fn draft_parameters(&self, current_gold_price: Money) -> GoldSipResult<SipParameters> {
        let missing = |field: &str| GoldSipError::invalid(field, "not collected yet");
        Ok(SipParameters {
            monthly_amount: self.draft.monthly_amount.ok_or_else(|| missing("monthly_amount"))?,
            duration_months: self
                .draft
                .duration_months
                .ok_or_else(|| missing("duration_months"))?,
            average_gold_price: self
                .draft
                .average_gold_price
                .ok_or_else(|| missing("average_gold_price"))?,
            current_gold_price,
            start_date: None,
        })
    }

    fn show_results(&mut self, current_gold_price: Money) -> GoldSipResult<ChatReply> {
        let params = self.draft_parameters(current_gold_price)?;
        let result = calculate_sip_returns(&params)?;

        let message = format!("{}\n\n{MENU}", format_summary(&result));
        self.last_result = Some(result.clone());
        self.state = ChatState::PostResultMenu;

        Ok(ChatReply {
            message,
            result: Some(result),
        })
    }

    fn handle_menu(&mut self, message: &str) -> GoldSipResult<ChatReply> {
        let reply = match MenuCommand::parse(message) {
            MenuCommand::New => {
                self.state = ChatState::CollectingAmount;
                self.draft = Draft::default();
                self.last_result = None;
                ChatReply::text(format!(
                    "🔄 Let's calculate a new Gold SIP investment!\n\n{AMOUNT_PROMPT}"
                ))
            }
            MenuCommand::Breakdown => match &self.last_result {
                Some(result) => ChatReply::text(self.breakdown_sample(result)?),
                None => ChatReply::text(UNKNOWN_COMMAND),
            },
            MenuCommand::Tips => ChatReply::text(TIPS),
            MenuCommand::Thanks => {
                self.state = ChatState::Completed;
                ChatReply::text(FAREWELL)
            }
            MenuCommand::Unknown => ChatReply::text(UNKNOWN_COMMAND),
        };
        Ok(reply)
    }

    /// Synthesized-price sample covering at most the first year of the plan,
    /// dated back from the as-of date.
    fn breakdown_sample(&self, result: &SipResult) -> GoldSipResult<String> {
        let mut input = BreakdownInput::new(
            result.monthly_amount,
            result.duration_months.min(BREAKDOWN_SAMPLE_MONTHS),
        );
        input.start_date = match self.as_of {
            Some(as_of) => {
                let days = u64::from(result.duration_months) * DAYS_PER_MONTH;
                Some(as_of.checked_sub_days(Days::new(days)).ok_or_else(|| {
                    GoldSipError::DateError(format!("{as_of} - {days} days is out of range"))
                })?)
            }
            None => None,
        };

        let records = simulate_monthly_breakdown(&input)?;
        let mut text = format_breakdown(&records, BREAKDOWN_VISIBLE_ROWS)
            .replacen("**\n", "** (Sample)\n", 1);
        text.push_str("\n🔄 Type 'new' for a new calculation or 'thanks' to end!");
        Ok(text)
    }
}

/// `"<label>: ₹10,500.00/gram"` from the provider, or an empty line when no
/// provider is attached or it fails.
fn live_price_line(prices: Option<&dyn GoldPriceProvider>, label: &str) -> String {
    let Some(provider) = prices else {
        return String::new();
    };
    match provider.current_price() {
        Ok(quote) => {
            let suffix = if quote.confidence < dec!(1) {
                format!(" (source: {}, use this or enter your own)", quote.source)
            } else {
                String::new()
            };
            format!(
                "{label}: {}/gram{suffix}\n",
                format_currency(quote.price_per_gram)
            )
        }
        Err(e) => {
            tracing::warn!(provider = provider.id(), error = %e, "live price hint unavailable");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::FixedPriceProvider;

    #[test]
    fn test_menu_aliases() {
        assert!(matches!(MenuCommand::parse("  RESTART "), MenuCommand::New));
        assert!(matches!(MenuCommand::parse("Thank You"), MenuCommand::Thanks));
        assert!(matches!(MenuCommand::parse("monthly"), MenuCommand::Breakdown));
        assert!(matches!(MenuCommand::parse("advice"), MenuCommand::Tips));
        assert!(matches!(MenuCommand::parse("what?"), MenuCommand::Unknown));
    }

    #[test]
    fn test_live_price_line_variants() {
        assert_eq!(live_price_line(None, "Live gold price"), "");
        let fixed = FixedPriceProvider::new(dec!(10500)).unwrap();
        assert_eq!(
            live_price_line(Some(&fixed), "Live gold price"),
            "Live gold price: ₹10,500.00/gram\n"
        );
    }
}

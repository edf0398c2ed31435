use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use gold_sip_core::sip::breakdown::{self, BreakdownInput, PriceSource, SyntheticPriceModel};
use gold_sip_core::sip::comparison;
use gold_sip_core::sip::returns::{self, SipParameters};
use gold_sip_core::sip::scenarios::{self, SipScenario};
use gold_sip_core::sip::summary;
use gold_sip_core::sip::targets::{self, TargetCagrInput};
use gold_sip_core::sip::DAYS_PER_MONTH;

use super::{envelope, quote_warning, read_request, Context};

const UNIFORM_METHODOLOGY: &str =
    "Uniform-average model: grams = monthly amount x months / average price";
const SIMULATION_METHODOLOGY: &str =
    "Month-by-month simulation: each contribution buys at that month's price";

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Plan parameters shared by `returns`, `summary` and `compare`
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PlanArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested every month (INR)
    #[arg(long)]
    pub monthly_amount: Option<Decimal>,

    /// Number of monthly contributions
    #[arg(long)]
    pub duration_months: Option<u32>,

    /// Average purchase price over the plan (INR per gram)
    #[arg(long)]
    pub average_price: Option<Decimal>,

    /// Current price (INR per gram); resolved from configured providers if omitted
    #[arg(long)]
    pub current_price: Option<Decimal>,

    /// First contribution date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

/// Arguments for the month-by-month simulation
#[derive(Args)]
pub struct BreakdownArgs {
    /// Path to JSON or YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested every month (INR)
    #[arg(long)]
    pub monthly_amount: Option<Decimal>,

    /// Number of monthly contributions
    #[arg(long)]
    pub duration_months: Option<u32>,

    /// Comma-separated price per gram for month 1, 2, ...
    #[arg(long, value_delimiter = ',')]
    pub prices: Option<Vec<Decimal>>,

    /// First contribution date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// First-month price of the synthesized series
    #[arg(long)]
    pub base_price: Option<Decimal>,

    /// Linear monthly step of the synthesized series (0.01 = 1% of base)
    #[arg(long)]
    pub monthly_step: Option<Decimal>,
}

/// Arguments for the text summary
#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Append a sample of the synthesized monthly breakdown
    #[arg(long)]
    pub with_breakdown: bool,
}

/// Arguments for comparing the two valuation models
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Comma-separated monthly prices for the simulated model
    #[arg(long, value_delimiter = ',')]
    pub prices: Option<Vec<Decimal>>,
}

/// Arguments for scenario analysis
#[derive(Args)]
pub struct ScenariosArgs {
    /// JSON or YAML list of named scenarios (built-in set if omitted)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the required-average-price calculation
#[derive(Args)]
pub struct TargetArgs {
    /// Path to JSON or YAML input file
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub monthly_amount: Option<Decimal>,

    #[arg(long)]
    pub duration_months: Option<u32>,

    /// Current price (INR per gram); resolved from configured providers if omitted
    #[arg(long)]
    pub current_price: Option<Decimal>,

    /// Target CAGR in percent
    #[arg(long, default_value = "12.5")]
    pub target_cagr: Decimal,
}

/// Arguments for price growth helpers
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct GrowthArgs {
    /// Starting price
    #[arg(long)]
    pub start_price: Decimal,

    /// Years between the two prices
    #[arg(long)]
    pub years: Decimal,

    /// Ending price; reports the CAGR between the two
    #[arg(long, conflicts_with = "cagr")]
    pub end_price: Option<Decimal>,

    /// CAGR in percent; reports the projected price
    #[arg(long)]
    pub cagr: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Plan parameters as read from a file or stdin. The current price and
/// price series are optional here.
#[derive(Debug, Deserialize)]
struct PlanRequest {
    monthly_amount: Decimal,
    duration_months: u32,
    average_gold_price: Decimal,
    #[serde(default)]
    current_gold_price: Option<Decimal>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    price_series: Option<Vec<Decimal>>,
}

#[derive(Debug, Deserialize)]
struct TargetRequest {
    monthly_amount: Decimal,
    duration_months: u32,
    #[serde(default)]
    current_gold_price: Option<Decimal>,
    #[serde(default = "default_target_cagr")]
    target_cagr: Decimal,
}

fn default_target_cagr() -> Decimal {
    dec!(12.5)
}

#[derive(Serialize)]
struct ScenarioRow {
    name: String,
    total_investment: Decimal,
    current_value: Decimal,
    profit_loss: Decimal,
    profit_loss_percentage: Decimal,
    cagr: Decimal,
}

/// Parameters ready for the engine, plus where the current price came from.
struct ResolvedPlan {
    params: SipParameters,
    price_series: Option<Vec<Decimal>>,
    price_source: String,
    warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

fn plan_from_flags(args: &PlanArgs) -> Result<PlanRequest, Box<dyn std::error::Error>> {
    Ok(PlanRequest {
        monthly_amount: args
            .monthly_amount
            .ok_or("--monthly-amount is required (or provide --input)")?,
        duration_months: args
            .duration_months
            .ok_or("--duration-months is required (or provide --input)")?,
        average_gold_price: args
            .average_price
            .ok_or("--average-price is required (or provide --input)")?,
        current_gold_price: args.current_price,
        start_date: args.start_date,
        price_series: None,
    })
}

fn resolve_current_price(
    given: Option<Decimal>,
    ctx: &Context,
    warnings: &mut Vec<String>,
) -> Result<(Decimal, String), Box<dyn std::error::Error>> {
    if let Some(price) = given {
        return Ok((price, "supplied".to_string()));
    }
    let quote = ctx.live_quote()?;
    warnings.extend(quote_warning(&quote));
    Ok((quote.price_per_gram, quote.source))
}

fn resolve_plan(args: &PlanArgs, ctx: &Context) -> Result<ResolvedPlan, Box<dyn std::error::Error>> {
    let request = match read_request::<PlanRequest>(args.input.as_deref())? {
        Some(request) => request,
        None => plan_from_flags(args)?,
    };

    let mut warnings = Vec::new();
    let (current_gold_price, price_source) =
        resolve_current_price(request.current_gold_price, ctx, &mut warnings)?;

    Ok(ResolvedPlan {
        params: SipParameters {
            monthly_amount: request.monthly_amount,
            duration_months: request.duration_months,
            average_gold_price: request.average_gold_price,
            current_gold_price,
            start_date: request.start_date,
        },
        price_series: request.price_series,
        price_source,
        warnings,
    })
}

fn uniform_assumptions(price_source: &str) -> Value {
    json!({
        "model": "uniform_average",
        "current_price_source": price_source,
        "days_per_month": DAYS_PER_MONTH,
        "rounding": "banker's rounding at output: money 2dp, weight 3dp, percent 2dp",
    })
}

fn price_source_warning(source: PriceSource) -> Option<String> {
    match source {
        PriceSource::Supplied => None,
        PriceSource::SuppliedWithHold { held_months } => Some(format!(
            "Price series shorter than the plan; last price held for {held_months} month(s)"
        )),
        PriceSource::Synthesized => {
            Some("No price series supplied; prices synthesized from the linear model".into())
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub fn run_returns(args: PlanArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let plan = resolve_plan(&args, ctx)?;
    let mut warnings = plan.warnings;

    let result = returns::calculate_sip_returns(&plan.params)?;
    if result.profit_loss < Decimal::ZERO {
        warnings.push(format!(
            "Plan is at a loss of {}",
            summary::format_currency(result.profit_loss)
        ));
    }

    envelope(
        started,
        UNIFORM_METHODOLOGY,
        &uniform_assumptions(&plan.price_source),
        warnings,
        result,
    )
}

pub fn run_breakdown(args: BreakdownArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();

    let mut request: BreakdownInput = match read_request(args.input.as_deref())? {
        Some(request) => request,
        None => {
            let mut request = BreakdownInput::new(
                args.monthly_amount
                    .ok_or("--monthly-amount is required (or provide --input)")?,
                args.duration_months
                    .ok_or("--duration-months is required (or provide --input)")?,
            );
            request.price_series = args.prices.clone();
            request.start_date = args.start_date;
            request.price_model = ctx.config.price_model;
            request
        }
    };
    if let Some(base_price) = args.base_price {
        request.price_model.base_price = base_price;
    }
    if let Some(monthly_step) = args.monthly_step {
        request.price_model.monthly_step = monthly_step;
    }

    let records = breakdown::simulate_monthly_breakdown(&request)?;
    let source = request.price_source();
    let assumptions = json!({
        "model": "monthly_simulation",
        "price_source": source,
        "price_model": request.price_model,
        "days_per_month": DAYS_PER_MONTH,
    });

    envelope(
        started,
        SIMULATION_METHODOLOGY,
        &assumptions,
        price_source_warning(source).into_iter().collect(),
        records,
    )
}

/// Plain text; printed as-is whatever the output format.
pub fn run_summary(args: SummaryArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = resolve_plan(&args.plan, ctx)?;
    for warning in &plan.warnings {
        tracing::warn!("{warning}");
    }

    let result = returns::calculate_sip_returns(&plan.params)?;
    let mut text = summary::format_summary(&result);

    if args.with_breakdown {
        let input = BreakdownInput {
            monthly_amount: plan.params.monthly_amount,
            duration_months: plan.params.duration_months,
            price_series: plan.price_series,
            start_date: plan.params.start_date,
            price_model: ctx.config.price_model,
        };
        let records = breakdown::simulate_monthly_breakdown(&input)?;
        text.push_str("\n\n");
        text.push_str(&summary::format_breakdown(
            &records,
            ctx.config.display.breakdown_rows,
        ));
    }

    Ok(Value::String(text))
}

pub fn run_compare(args: CompareArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let plan = resolve_plan(&args.plan, ctx)?;

    let series = args.prices.or(plan.price_series).or_else(|| {
        // A configured model replaces the built-in default
        (ctx.config.price_model != SyntheticPriceModel::default())
            .then(|| ctx.config.price_model.series(plan.params.duration_months))
    });
    let comparison = comparison::compare_models(&plan.params, series)?;

    let mut warnings = plan.warnings;
    warnings.extend(price_source_warning(comparison.price_source));
    let assumptions = json!({
        "models": ["uniform_average", "monthly_simulation"],
        "current_price_source": plan.price_source,
    });

    envelope(
        started,
        "Uniform-average vs month-by-month gram totals for the same plan",
        &assumptions,
        warnings,
        comparison,
    )
}

pub fn run_scenarios(args: ScenariosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let scenario_list: Vec<SipScenario> = match read_request(args.input.as_deref())? {
        Some(list) => list,
        None => scenarios::default_scenarios(),
    };

    let rows: Vec<ScenarioRow> = scenarios::run_scenarios(&scenario_list)?
        .into_iter()
        .map(|s| ScenarioRow {
            name: s.name,
            total_investment: s.result.total_investment,
            current_value: s.result.current_value,
            profit_loss: s.result.profit_loss,
            profit_loss_percentage: s.result.profit_loss_percentage,
            cagr: s.result.cagr,
        })
        .collect();

    envelope(
        started,
        UNIFORM_METHODOLOGY,
        &json!({ "scenarios": scenario_list.len() }),
        Vec::new(),
        rows,
    )
}

pub fn run_target(args: TargetArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let request = match read_request::<TargetRequest>(args.input.as_deref())? {
        Some(request) => request,
        None => TargetRequest {
            monthly_amount: args
                .monthly_amount
                .ok_or("--monthly-amount is required (or provide --input)")?,
            duration_months: args
                .duration_months
                .ok_or("--duration-months is required (or provide --input)")?,
            current_gold_price: args.current_price,
            target_cagr: args.target_cagr,
        },
    };

    let mut warnings = Vec::new();
    let (current_gold_price, price_source) =
        resolve_current_price(request.current_gold_price, ctx, &mut warnings)?;
    let input = TargetCagrInput {
        monthly_amount: request.monthly_amount,
        duration_months: request.duration_months,
        current_gold_price,
        target_cagr: request.target_cagr,
    };
    let output = targets::required_average_price(&input)?;

    envelope(
        started,
        "Average purchase price = current price / (1 + CAGR)^years",
        &json!({
            "target_cagr": input.target_cagr,
            "current_gold_price": current_gold_price,
            "current_price_source": price_source,
        }),
        warnings,
        output,
    )
}

pub fn run_growth(args: GrowthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let result = match (args.end_price, args.cagr) {
        (Some(end_price), _) => json!({
            "start_price": args.start_price,
            "end_price": end_price,
            "years": args.years,
            "cagr": targets::point_to_point_cagr(args.start_price, end_price, args.years)?,
        }),
        (None, Some(cagr)) => json!({
            "start_price": args.start_price,
            "years": args.years,
            "cagr": cagr,
            "projected_price": targets::project_price(args.start_price, args.years, cagr)?,
        }),
        (None, None) => return Err("one of --end-price or --cagr is required".into()),
    };

    envelope(
        started,
        "Compound annual growth between two prices",
        &json!({}),
        Vec::new(),
        result,
    )
}

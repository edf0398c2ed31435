mod commands;
mod input;
mod output;
mod providers;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::sip::{
    BreakdownArgs, CompareArgs, GrowthArgs, PlanArgs, ScenariosArgs, SummaryArgs, TargetArgs,
};
use commands::Context;
use input::config::CliConfig;

/// Gold SIP return calculations
#[derive(Parser)]
#[command(
    name = "gsip",
    version,
    about = "Gold SIP (systematic investment plan) return calculations",
    long_about = "A CLI for valuing monthly gold investment plans with decimal precision. \
                  Supports aggregate returns and CAGR, month-by-month simulation, \
                  scenario analysis, target-CAGR pricing and an interactive calculator."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Config file (YAML or JSON); defaults to ./gsip.yaml when present
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a plan with the uniform-average model (returns and CAGR)
    Returns(PlanArgs),
    /// Simulate the plan month by month
    Breakdown(BreakdownArgs),
    /// Print a human-readable summary of a plan
    Summary(SummaryArgs),
    /// Compare uniform-average and month-by-month gram totals
    Compare(CompareArgs),
    /// Evaluate several named plans side by side
    Scenarios(ScenariosArgs),
    /// Average purchase price needed for a target CAGR
    Target(TargetArgs),
    /// CAGR between two prices, or a price projected at a CAGR
    Growth(GrowthArgs),
    /// Show the current gold price from configured sources
    Price,
    /// Interactive step-by-step calculator
    Chat,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

/// Logs go to stderr so stdout carries only command output. `RUST_LOG`
/// overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn run(cli: Cli) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let context = || CliConfig::load(cli.config.as_deref()).map(Context::new);

    match cli.command {
        Commands::Returns(args) => commands::sip::run_returns(args, &context()?),
        Commands::Breakdown(args) => commands::sip::run_breakdown(args, &context()?),
        Commands::Summary(args) => commands::sip::run_summary(args, &context()?),
        Commands::Compare(args) => commands::sip::run_compare(args, &context()?),
        Commands::Scenarios(args) => commands::sip::run_scenarios(args),
        Commands::Target(args) => commands::sip::run_target(args, &context()?),
        Commands::Growth(args) => commands::sip::run_growth(args),
        Commands::Price => commands::price::run_price(&context()?),
        Commands::Chat => commands::chat::run_chat(&context()?),
        Commands::Version => Ok(serde_json::Value::String(format!(
            "gsip {}",
            env!("CARGO_PKG_VERSION")
        ))),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = cli.output.clone();

    match run(cli) {
        Ok(value) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

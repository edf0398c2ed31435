use std::io::{self, BufRead, Write};

use chrono::Local;
use colored::Colorize;
use serde_json::Value;

use gold_sip_core::chat::{ChatSession, ChatState};
use gold_sip_core::pricing::GoldPriceProvider;

use super::Context;
use crate::{input, providers};

/// Interactive calculator over stdin/stdout. Ends on goodbye or EOF.
pub fn run_chat(ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let provider = providers::build_price_provider(&ctx.config.pricing)?;
    let prices: Option<&dyn GoldPriceProvider> = if ctx.config.pricing.metal_price_api_key.is_some()
        || ctx.config.pricing.manual_price.is_some()
    {
        Some(&provider)
    } else {
        None
    };

    let mut session = ChatSession::new().with_as_of(Local::now().date_naive());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let greeting = session.respond("", prices)?;
    writeln!(stdout, "{}\n", greeting.message)?;

    let interactive = input::stdin::is_interactive();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            write!(stdout, "{} ", ">".yellow().bold())?;
            stdout.flush()?;
        }

        let Some(line) = lines.next().transpose()? else {
            writeln!(stdout)?;
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match session.respond(&line, prices) {
            Ok(reply) => writeln!(stdout, "\n{}\n", reply.message)?,
            Err(e) => {
                tracing::warn!(error = %e, "calculation failed");
                writeln!(stdout, "\n{}: {e}\n", "error".red().bold())?;
            }
        }
        if session.state() == ChatState::Completed {
            break;
        }
    }

    Ok(Value::Null)
}

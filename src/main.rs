//! daily-brief — binary entrypoint.
//! Loads `.env`, initialises tracing, performs one run and exits.

use daily_brief::{run_from_env, RunOutcome};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact logs by default; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("daily_brief=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env when present; no-op otherwise.
    let _ = dotenvy::dotenv();
    init_tracing();

    info!("--- brief agent start ---");
    match run_from_env().await {
        Ok(RunOutcome::Delivered) => info!("--- brief agent done ---"),
        Ok(RunOutcome::DeliveryFailed(reason)) => warn!(%reason, "run finished without delivery"),
        Ok(RunOutcome::InsufficientData) => warn!("nothing to send; run halted"),
        Err(e) => {
            error!(error = %e, "run aborted");
            return Err(e.into());
        }
    }
    Ok(())
}

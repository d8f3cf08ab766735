use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use shipment_sync_lambda::config::{
    ServiceConfig, CONCURRENCY_VAR, END_DATE_VAR, FETCH_LIMIT_VAR, START_DATE_VAR,
};
use shipment_sync_lambda::handlers::shipments::handle_invocation;
use shipment_sync_lambda::telemetry::init_local_tracing;

/// Runs the shipment pipeline once against the configured API and prints the
/// response body. Flags override the matching environment variables.
#[derive(Parser)]
#[command(name = "shipments_local")]
struct Cli {
    /// First revision date, YYYY-MM-DD
    #[arg(long)]
    start_date: Option<String>,
    /// Last revision date, YYYY-MM-DD
    #[arg(long)]
    end_date: Option<String>,
    /// Maximum number of shipments to fetch
    #[arg(long)]
    limit: Option<usize>,
    /// Maximum number of concurrent carrier lookups
    #[arg(long)]
    concurrency: Option<usize>,
}

impl Cli {
    fn override_for(&self, name: &str) -> Option<String> {
        match name {
            START_DATE_VAR => self.start_date.clone(),
            END_DATE_VAR => self.end_date.clone(),
            FETCH_LIMIT_VAR => self.limit.map(|value| value.to_string()),
            CONCURRENCY_VAR => self.concurrency.map(|value| value.to_string()),
            _ => None,
        }
    }
}

fn pretty(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_local_tracing();
    let cli = Cli::parse();

    let config = ServiceConfig::from_lookup(|name| {
        cli.override_for(name)
            .or_else(|| std::env::var(name).ok())
    });
    let response = handle_invocation(config).await;
    println!("{}", pretty(&response.body));

    if response.status_code == 200 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

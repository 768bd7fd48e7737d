use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use openmemory::client::OpenMemoryClient;
use probe::Probe;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod probe;
mod provider;
mod run;

#[derive(Parser)]
#[command(version, about = "openmemory provider configuration probe", long_about = None)]
struct Cli {
    #[arg(long, default_value = openmemory::DEFAULT_URL, help = "service base url")]
    url: String,

    #[arg(long, default_value_t = 2, help = "seconds to wait after a config update")]
    settle_delay: u64,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_line_number(true)
        .with_thread_ids(true)
        .init();

    let cli = Cli::parse();
    let probe = Probe::new(OpenMemoryClient::new(&cli.url), Duration::from_secs(cli.settle_delay));

    match run::run(&probe).await {
        Some(_) => Ok(ExitCode::SUCCESS),
        None => Ok(ExitCode::FAILURE),
    }
}

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use framework::json;
use mock_service::MockState;
use serde_json::Value;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "local stand-in for the memory service", long_about = None)]
struct Cli {
    #[arg(long, default_value = "127.0.0.1:8765", help = "bind address")]
    bind: String,

    #[arg(long, help = "default config path")]
    conf: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()?
        .add_directive("mock=trace".parse()?)
        .add_directive("mock_service=trace".parse()?)
        .add_directive("framework=trace".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_line_number(true)
        .with_thread_ids(true)
        .init();

    let cli = Cli::parse();
    let state = match cli.conf {
        Some(path) => {
            info!("load default config, path={}", path.to_string_lossy());
            let config: Value = json::load_file(&path)?;
            MockState::new(config)
        }
        None => MockState::default(),
    };

    let app = mock_service::routes().with_state(state);
    framework::web::server::start_http_server(&cli.bind, app).await?;

    Ok(())
}

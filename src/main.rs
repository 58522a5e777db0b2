use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use summits_minter::cli::Cli;
use summits_minter::{run, AnsClient, MinterConfig, TokioCommandRunner};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.debug);

    // Load configuration
    let mut config = MinterConfig::load(cli.config.as_deref())
        .context("Failed to load minter settings")?;
    if let Some(path) = &cli.aptos_config {
        config.aptos_config_path = path.clone();
    }

    let resolver = AnsClient::new(&config.name_service_url)
        .context("Failed to create name service client")?;

    let report = run(
        &cli.run_options(),
        &config,
        resolver,
        TokioCommandRunner,
        &mut rand::thread_rng(),
    )
    .await
    .context("Minting run failed")?;

    info!("Run finished: {}", serde_json::to_string(&report)?);
    if !report.dispatch.all_succeeded() {
        warn!(
            "{} of {} mints failed, usually because those addresses already hold a token",
            report.dispatch.failed, report.dispatch.total
        );
    }

    Ok(())
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("summits_minter=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

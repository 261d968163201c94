use anyhow::anyhow;
use clap::Parser;
use reservation_desk::{cli::Config, db};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Connects to MongoDB (best effort) and serves until Ctrl-C or SIGTERM.
#[rocket::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logger()?;

    let config = Config::parse();
    let store = db::connect(config.mongodb_uri.as_deref()).await;
    let rocket = reservation_desk::build(&config, store)?;

    if let Err(e) = rocket.launch().await {
        error!(error = %e, "server failed to launch");
        return Err(anyhow!("server failed to launch"));
    }

    info!("server stopped");
    Ok(())
}

fn init_logger() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(env_filter)
        .try_init()?;

    Ok(())
}

use anyhow::Result;
use prizo_api::{config::config_loader, infrastructure::axum_http::http_serve, observability};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("API exited with error: {:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability("api")?;

    let dotenvy_env = config_loader::get()?;
    info!(stage = %dotenvy_env.stage, "ENV has been loaded");

    http_serve::start(Arc::new(dotenvy_env.clone())).await?;

    Ok(())
}

mod error;
mod jobs;
mod proxy;
mod router;
mod telemetry;

use std::net::SocketAddr;

use nexacore_careers_hireloom::HireloomClient;
use nexacore_careers_util::{load_env_file, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();
    let config = AppConfig::from_env()?;

    telemetry::init_tracing(&config)?;
    let metrics = telemetry::init_metrics()?;

    let http = reqwest::Client::builder().build()?;
    let hireloom = HireloomClient::new(
        config.hireloom.company_slug.clone(),
        config.hireloom.base_url.clone(),
        http,
    );
    let state = router::AppState::new(metrics, hireloom);

    let addr: SocketAddr = config.bind_addr;
    info!(
        stage = "app",
        %addr,
        env = %config.environment.as_str(),
        upstream = %config.hireloom.base_url,
        company = %config.hireloom.company_slug,
        "starting HTTP server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router::app_router(state))
        .await
        .map_err(|err| err.into())
}

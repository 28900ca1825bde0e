use anyhow::Context;
use melolo_scraper::UpstreamClient;
use melolo_server::config::ServerConfig;
use melolo_server::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env();
    info!(upstream = %config.upstream.origin, "upstream configured");
    if let Some(dir) = &config.static_dir {
        info!(static_dir = %dir.display(), "serving front-end assets");
    }

    let app_state = AppState {
        upstream: UpstreamClient::new(config.upstream),
        static_dir: config.static_dir,
    };

    let app = melolo_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

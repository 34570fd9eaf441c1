mod api;
mod middleware;

use std::sync::Arc;

use stocksense_advisor::{Advisor, AdvisorSettings, Generator};
use stocksense_market::{MarketData, ProviderConfig};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(stocksense_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = stocksense_db::PoolConfig::from_app_config(&config);
    let pool = stocksense_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = stocksense_db::run_migrations(&pool).await?;
    tracing::debug!(applied, "migrations up to date");

    let market = MarketData::new(&ProviderConfig::from_app_config(&config))?;
    let generator = Generator::from_app_config(&config)?;
    if !generator.is_configured() {
        tracing::warn!("no generation credentials configured; analyses use the fallback narrative");
    }
    tracing::info!(
        news_sources = ?market.news_source_names(),
        generation = ?generator.providers(),
        "providers ready"
    );

    let advisor = Advisor::new(
        Arc::new(market),
        Arc::new(generator),
        AdvisorSettings::from_app_config(&config),
    );
    let app = build_app(AppState { pool, advisor }, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "stocksense server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}

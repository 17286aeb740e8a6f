//! Payeer Gateway server.
//!
//! Serves the result notification endpoint and records accepted payments in
//! PostgreSQL.

use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use payeer_gateway::adapters::http::{payment_router, PaymentAppState};
use payeer_gateway::adapters::payeer::{ApiClient, ReqwestTransport};
use payeer_gateway::adapters::postgres::{PostgresPaymentLedger, PostgresTransactionManager};
use payeer_gateway::application::PaymentProcessor;
use payeer_gateway::config::{ApiConfig, AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server);

    let merchant = config.merchant.credentials()?;

    if let Some(api) = config.api.as_ref().filter(|api| api.connect_on_startup) {
        verify_api_credentials(api).await?;
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let processor = PaymentProcessor::new(&merchant, PostgresTransactionManager::new(pool))
        .with_observer(Arc::new(PostgresPaymentLedger::new()));

    let app = payment_router()
        .with_state(PaymentAppState::new(Arc::new(processor)))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.server.request_timeout()));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, shop_id = merchant.shop_id(), "Payeer gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if server.is_production() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Fail fast when the account API rejects the configured credentials.
async fn verify_api_credentials(api: &ApiConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    let transport = ReqwestTransport::new(api.timeout())?;
    ApiClient::new(api.credentials()?, transport)
        .with_api_url(api.base_url.as_str())
        .connect()
        .await?;
    tracing::info!(account = %api.account, "Payeer API credentials verified");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}

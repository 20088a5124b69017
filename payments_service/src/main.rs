use std::sync::Arc;

use anyhow::Context;
use axum::middleware;
use common::request_context::request_id_middleware;
use common::retry::RetryPolicy;
use common::risk_client::HttpRiskClient;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use token_validator::{TokenValidator, ValidatorConfig};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use payments_service::api::http_routes::{router, AppState};
use payments_service::config::Settings;
use payments_service::infrastructure::gateways::http_wallet_gateway::HttpWalletGateway;
use payments_service::infrastructure::persistence::payment_intent_repository::PostgresPaymentIntentRepository;
use payments_service::use_cases::cancel_intent::CancelIntentUseCase;
use payments_service::use_cases::confirm_intent::ConfirmIntentUseCase;
use payments_service::use_cases::create_intent::CreateIntentUseCase;
use payments_service::use_cases::get_intent::GetIntentUseCase;

/// Waits for Postgres to accept connections, retrying a fixed number of
/// times with a fixed delay (spec.md §9a "Startup sequence"), then runs the
/// bundled migrations.
async fn connect_and_migrate(settings: &Settings) -> anyhow::Result<PgPool> {
    let mut last_err = None;
    for attempt in 1..=settings.db_connect_attempts {
        match PgPoolOptions::new()
            .max_connections(10)
            .connect(&settings.database_url)
            .await
        {
            Ok(pool) => {
                info!("connected to database on attempt {attempt}");
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("running payments_service migrations")?;
                return Ok(pool);
            }
            Err(err) => {
                warn!("database connection attempt {attempt} failed: {err}");
                last_err = Some(err);
                if attempt < settings.db_connect_attempts {
                    tokio::time::sleep(settings.db_connect_retry_delay).await;
                }
            }
        }
    }
    Err(last_err.expect("db_connect_attempts >= 1").into())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("starting payments_service");

    let settings = Settings::from_env();
    let pool = connect_and_migrate(&settings).await?;

    let repo = Arc::new(PostgresPaymentIntentRepository::new(pool.clone()));

    let wallet_retry_policy = RetryPolicy::new(settings.wallet_retry_attempts, settings.wallet_retry_backoff_seconds);
    let wallet_gateway = Arc::new(HttpWalletGateway::new(
        settings.wallet_base_url.clone(),
        settings.wallet_timeout,
        wallet_retry_policy,
    ));

    let risk_client = Arc::new(HttpRiskClient::new(settings.risk_base_url.clone(), settings.risk_timeout));

    let token_validator = Arc::new(TokenValidator::new(ValidatorConfig {
        jwks_url: settings.jwks_url.clone(),
        issuer: settings.jwt_issuer.clone(),
        audience: settings.jwt_audience.clone(),
        jwks_cache_ttl: settings.jwks_cache_ttl,
        jwks_fetch_timeout: settings.jwks_fetch_timeout,
    }));

    let app_state = AppState {
        create_intent: Arc::new(CreateIntentUseCase::new(repo.clone())),
        get_intent: Arc::new(GetIntentUseCase::new(repo.clone())),
        confirm_intent: Arc::new(ConfirmIntentUseCase::new(repo.clone(), wallet_gateway.clone(), risk_client)),
        cancel_intent: Arc::new(CancelIntentUseCase::new(repo.clone(), wallet_gateway.clone())),
        token_validator,
    };

    let app = axum::Router::new()
        .nest("/api/v1/payments", router(app_state))
        .layer(middleware::from_fn(request_id_middleware));

    let addr = format!("{}:{}", settings.host, settings.port);
    info!("HTTP server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

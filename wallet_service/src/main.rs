use std::sync::Arc;

use anyhow::Context;
use axum::middleware;
use common::request_context::request_id_middleware;
use common::risk_client::HttpRiskClient;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use token_validator::{TokenValidator, ValidatorConfig};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use wallet_service::api::http_routes::{router, AppState};
use wallet_service::config::Settings;
use wallet_service::infrastructure::persistence::wallet_repository::PostgresWalletRepository;
use wallet_service::use_cases::apply_entry::ApplyEntryUseCase;
use wallet_service::use_cases::create_wallet::CreateWalletUseCase;
use wallet_service::use_cases::get_balance::GetBalanceUseCase;
use wallet_service::use_cases::hold_capture::HoldCaptureUseCase;
use wallet_service::use_cases::hold_create::HoldCreateUseCase;
use wallet_service::use_cases::hold_release::HoldReleaseUseCase;
use wallet_service::use_cases::list_statement::ListStatementUseCase;
use wallet_service::use_cases::reconcile::ReconcileUseCase;
use wallet_service::use_cases::transfer::TransferUseCase;

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
                    .context("running wallet_service migrations")?;
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

    info!("starting wallet_service");

    let settings = Settings::from_env();
    let pool = connect_and_migrate(&settings).await?;

    let wallet_repo = Arc::new(PostgresWalletRepository::new(pool.clone()));

    let risk_client = if settings.risk_check_enabled {
        Some(Arc::new(HttpRiskClient::new(
            settings.risk_base_url.clone(),
            settings.risk_timeout,
        )) as Arc<dyn common::risk_client::RiskClient>)
    } else {
        None
    };

    let token_validator = Arc::new(TokenValidator::new(ValidatorConfig {
        jwks_url: settings.jwks_url.clone(),
        issuer: settings.jwt_issuer.clone(),
        audience: settings.jwt_audience.clone(),
        jwks_cache_ttl: settings.jwks_cache_ttl,
        jwks_fetch_timeout: settings.jwks_fetch_timeout,
    }));

    let app_state = AppState {
        create_wallet: Arc::new(CreateWalletUseCase::new(wallet_repo.clone())),
        get_balance: Arc::new(GetBalanceUseCase::new(wallet_repo.clone())),
        apply_entry: Arc::new(ApplyEntryUseCase::new(wallet_repo.clone(), risk_client)),
        hold_create: Arc::new(HoldCreateUseCase::new(wallet_repo.clone())),
        hold_release: Arc::new(HoldReleaseUseCase::new(wallet_repo.clone())),
        hold_capture: Arc::new(HoldCaptureUseCase::new(wallet_repo.clone())),
        transfer: Arc::new(TransferUseCase::new(wallet_repo.clone())),
        list_statement: Arc::new(ListStatementUseCase::new(wallet_repo.clone())),
        reconcile: Arc::new(ReconcileUseCase::new(wallet_repo.clone())),
        token_validator,
    };

    let app = axum::Router::new()
        .nest("/api/v1/wallets", router(app_state))
        .layer(middleware::from_fn(request_id_middleware));

    let addr = format!("{}:{}", settings.host, settings.port);
    info!("HTTP server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

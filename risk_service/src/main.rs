use std::sync::Arc;

use axum::middleware;
use common::request_context::request_id_middleware;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use risk_service::api::http_routes::{router, AppState};
use risk_service::config::Settings;
use risk_service::domain::engine::RiskEngine;
use risk_service::infrastructure::rules::default_rules;
use risk_service::infrastructure::store::InMemoryEvaluationStore;
use risk_service::use_cases::evaluate::EvaluateUseCase;
use risk_service::use_cases::get_evaluation::GetEvaluationUseCase;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("starting risk_service");

    let settings = Settings::from_env();

    let engine = Arc::new(RiskEngine::new(default_rules()));
    let store: Arc<InMemoryEvaluationStore> = Arc::new(InMemoryEvaluationStore::new());
    let evaluate = Arc::new(EvaluateUseCase::new(engine, store.clone()));
    let get_evaluation = Arc::new(GetEvaluationUseCase::new(store));

    let app_state = AppState { evaluate, get_evaluation };

    let app = router(app_state).layer(middleware::from_fn(request_id_middleware));

    let addr = format!("{}:{}", settings.host, settings.port);
    info!("HTTP server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

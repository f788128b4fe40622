use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use finsight_core::analysis::contract::ContractQueryTask;
use finsight_core::analysis::market::MarketAnalysisTask;
use finsight_core::analysis::portfolio::PortfolioAdviceTask;
use finsight_core::analysis::stock::StockAnalysisTask;
use finsight_core::analysis::tax::TaxAnalysisTask;
use finsight_core::analysis::Analyst;
use finsight_core::domain::contract::ContractAnswer;
use finsight_core::domain::market::MarketAnalysis;
use finsight_core::domain::portfolio::{InvestmentAdvice, Portfolio, RiskProfile};
use finsight_core::domain::stock::StockAnalysis;
use finsight_core::domain::tax::{TaxAssessment, TaxFilingData};
use finsight_core::error::{AnalysisError, ErrorKind};
use finsight_core::llm::gemini::GeminiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = finsight_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let generator = GeminiClient::from_settings(&settings)?;
    let state = AppState {
        analyst: Arc::new(Analyst::new(generator)),
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/analysis/stock", post(analyze_stock))
        .route("/analysis/tax", post(analyze_tax))
        .route("/analysis/portfolio", post(advise_portfolio))
        .route("/analysis/market", post(analyze_market))
        .route("/qa/contract", post(answer_contract_query))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    analyst: Arc<Analyst<GeminiClient>>,
}

#[derive(Debug, Serialize)]
struct AnalysisEnvelope<T> {
    analysis_id: Uuid,
    generated_at: DateTime<Utc>,
    result: T,
}

fn envelope<T>(result: T) -> Json<AnalysisEnvelope<T>> {
    Json(AnalysisEnvelope {
        analysis_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        result,
    })
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: &'static str,
}

type ApiError = (StatusCode, Json<ErrorBody>);

/// Collapse an adapter failure into a status code plus the short fixed
/// user message. Raw model text and transport detail never leave the
/// server; server-side kinds are reported to sentry.
fn error_response(err: AnalysisError) -> ApiError {
    let status = match err.kind() {
        ErrorKind::EmptyQuery => StatusCode::BAD_REQUEST,
        ErrorKind::RateLimit => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::Network | ErrorKind::MalformedResponse => StatusCode::BAD_GATEWAY,
        ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        let report = anyhow::Error::new(err.clone());
        sentry_anyhow::capture_anyhow(&report);
    }

    tracing::error!(kind = %err.kind(), error = %err, "analysis request failed");

    (
        status,
        Json(ErrorBody {
            error: err.kind().to_string(),
            message: err.user_message(),
        }),
    )
}

#[derive(Debug, Deserialize)]
struct StockAnalysisRequest {
    symbol: String,
    shares_owned: f64,
}

async fn analyze_stock(
    State(state): State<AppState>,
    Json(req): Json<StockAnalysisRequest>,
) -> Result<Json<AnalysisEnvelope<StockAnalysis>>, ApiError> {
    let task = StockAnalysisTask::new(req.symbol, req.shares_owned);
    let result = state.analyst.run(&task).await.map_err(error_response)?;
    Ok(envelope(result))
}

async fn analyze_tax(
    State(state): State<AppState>,
    Json(data): Json<TaxFilingData>,
) -> Result<Json<AnalysisEnvelope<TaxAssessment>>, ApiError> {
    let task = TaxAnalysisTask::new(data);
    let result = state.analyst.run(&task).await.map_err(error_response)?;
    Ok(envelope(result))
}

#[derive(Debug, Deserialize)]
struct PortfolioAdviceRequest {
    portfolio: Portfolio,
    risk_profile: RiskProfile,
}

async fn advise_portfolio(
    State(state): State<AppState>,
    Json(req): Json<PortfolioAdviceRequest>,
) -> Result<Json<AnalysisEnvelope<InvestmentAdvice>>, ApiError> {
    let task = PortfolioAdviceTask::new(req.portfolio, req.risk_profile);
    let result = state.analyst.run(&task).await.map_err(error_response)?;
    Ok(envelope(result))
}

async fn analyze_market(
    State(state): State<AppState>,
) -> Result<Json<AnalysisEnvelope<MarketAnalysis>>, ApiError> {
    let result = state
        .analyst
        .run(&MarketAnalysisTask)
        .await
        .map_err(error_response)?;
    Ok(envelope(result))
}

#[derive(Debug, Deserialize)]
struct ContractQueryRequest {
    query: String,
}

async fn answer_contract_query(
    State(state): State<AppState>,
    Json(req): Json<ContractQueryRequest>,
) -> Result<Json<AnalysisEnvelope<ContractAnswer>>, ApiError> {
    let task = ContractQueryTask::new(req.query);
    let result = state.analyst.run(&task).await.map_err(error_response)?;
    Ok(envelope(result))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &finsight_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

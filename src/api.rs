use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::error;
use serde::Serialize;
use serde_json::json;

use crate::error::{FetchError, SymbolError};
use crate::fetch::QuoteSource;
use crate::stats::Stats;
use crate::symbol::Symbol;
use crate::tracker::Tracker;

/// Successful `/api/price` payload.
#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub symbol: String,
    pub price: f64,
    pub stats: Stats,
}

#[derive(Debug)]
pub enum ApiError {
    MissingSymbol,
    InvalidSymbol(SymbolError),
    Fetch(FetchError),
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSymbol => write!(f, "Missing ?symbol= parameter"),
            Self::InvalidSymbol(err) => write!(f, "Invalid symbol: {err}"),
            Self::Fetch(err) => write!(f, "Fetch failed: {err}"),
            Self::Internal(msg) => write!(f, "internal_error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingSymbol | Self::InvalidSymbol(_) => StatusCode::BAD_REQUEST,
            Self::Fetch(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err)
    }
}

/// Fetch, record, and summarise one symbol for an HTTP caller.
///
/// A missing, blank, or malformed symbol is rejected before the quote source
/// is touched. Storage problems are logged by the tracker and do not fail the
/// request.
pub fn handle<Q: QuoteSource>(
    tracker: &Tracker<Q>,
    symbol: Option<&str>,
) -> Result<PriceResponse, ApiError> {
    let symbol = match symbol.map(Symbol::parse) {
        None | Some(Err(SymbolError::Empty)) => return Err(ApiError::MissingSymbol),
        Some(Err(err)) => return Err(ApiError::InvalidSymbol(err)),
        Some(Ok(symbol)) => symbol,
    };

    let report = tracker
        .track(&symbol, false)
        .map_err(|failure| failure.error)?;

    Ok(PriceResponse {
        symbol: report.symbol.display(),
        price: report.price,
        stats: report.stats,
    })
}

/// First non-blank `symbol` value among the query pairs.
///
/// Repeated parameters are allowed; later values are ignored.
pub fn symbol_param(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .filter(|(key, _)| key == "symbol")
        .map(|(_, value)| value.as_str())
        .find(|value| !value.trim().is_empty())
}

pub fn router<Q>(tracker: Arc<Tracker<Q>>) -> Router
where
    Q: QuoteSource + Send + Sync + 'static,
{
    Router::new()
        .route("/api/price", get(price::<Q>))
        .route("/health", get(health))
        .with_state(tracker)
}

/// GET /api/price?symbol=<id>
async fn price<Q>(
    State(tracker): State<Arc<Tracker<Q>>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PriceResponse>, ApiError>
where
    Q: QuoteSource + Send + Sync + 'static,
{
    // The tracker does blocking HTTP and file I/O.
    let outcome = tokio::task::spawn_blocking(move || handle(&tracker, symbol_param(&pairs)))
        .await
        .map_err(|err| {
            error!("Price handler task failed: {err}");
            ApiError::Internal(err.to_string())
        })?;
    outcome.map(Json)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

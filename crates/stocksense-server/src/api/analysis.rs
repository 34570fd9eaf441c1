use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use stocksense_core::StockAnalysis;

use crate::middleware::RequestId;

use super::{json_body, parse_symbol, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SymbolRequest {
    #[serde(default)]
    pub symbol: Option<String>,
}

pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SymbolRequest>, JsonRejection>,
) -> Result<Json<StockAnalysis>, ApiError> {
    let body = json_body(payload)?;
    let symbol = parse_symbol(body.symbol.as_deref())?;

    tracing::info!(request_id = %req_id.0, symbol = %symbol, "analyzing symbol");
    Ok(Json(state.advisor.analyze(&symbol).await))
}

/// Re-run the analysis for a symbol and bump its watchlist timestamp if starred.
pub(super) async fn refresh(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(raw): Path<String>,
) -> Result<Json<StockAnalysis>, ApiError> {
    let symbol = parse_symbol(Some(&raw))?;

    tracing::info!(request_id = %req_id.0, symbol = %symbol, "refreshing symbol");
    let analysis = state.advisor.analyze(&symbol).await;

    match stocksense_db::touch_starred_stock(&state.pool, symbol.as_str(), Utc::now()).await {
        Ok(touched) => tracing::debug!(symbol = %symbol, touched, "watchlist timestamp"),
        Err(e) => {
            tracing::warn!(request_id = %req_id.0, symbol = %symbol, error = %e, "failed to touch starred stock");
        }
    }

    Ok(Json(analysis))
}

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use chrono::Utc;
use stocksense_db::StarredStockRow;

use crate::middleware::RequestId;

use super::{
    analysis::SymbolRequest, json_body, map_db_error, parse_symbol, ApiError, AppState,
    MessageResponse,
};

pub(super) async fn list_starred(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<StarredStockRow>>, ApiError> {
    let rows = stocksense_db::list_starred_stocks(&state.pool)
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?;

    Ok(Json(rows))
}

pub(super) async fn star(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SymbolRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let body = json_body(payload)?;
    let symbol = parse_symbol(body.symbol.as_deref())?;

    stocksense_db::upsert_starred_stock(&state.pool, symbol.as_str(), Utc::now())
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?;

    Ok(Json(MessageResponse {
        message: format!("{symbol} added to starred stocks"),
    }))
}

/// Unstarring a symbol that is not on the watchlist still succeeds.
pub(super) async fn unstar(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(raw): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let symbol = parse_symbol(Some(&raw))?;

    let removed = stocksense_db::remove_starred_stock(&state.pool, symbol.as_str())
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?;
    if !removed {
        tracing::debug!(symbol = %symbol, "unstar of a symbol that was not starred");
    }

    Ok(Json(MessageResponse {
        message: format!("{symbol} removed from starred stocks"),
    }))
}

//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};

use super::AppState;
use super::types::{ErrorResponse, RangeQuery, TierTableResponse, TopologyResponse};
use crate::pipeline::{NetworkPowerRow, TierTables};
use crate::series::parse_timestamp;
use crate::topology::NodeType;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: String) -> ApiError {
    (status, Json(ErrorResponse { error: message }))
}

/// Parses the optional bounds of a range query.
///
/// Unparseable bounds and `from > to` are rejected with 400.
fn parse_range(
    query: &RangeQuery,
) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), ApiError> {
    let bound = |raw: &Option<String>, name: &str| {
        raw.as_deref()
            .map(parse_timestamp)
            .transpose()
            .map_err(|_| {
                error(
                    StatusCode::BAD_REQUEST,
                    format!("`{name}` is not a valid timestamp"),
                )
            })
    };
    let from = bound(&query.from, "from")?;
    let to = bound(&query.to, "to")?;

    if matches!((from, to), (Some(f), Some(t)) if f > t) {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "`from` must be <= `to`".to_string(),
        ));
    }
    Ok((from, to))
}

fn parse_tier(label: &str) -> Result<NodeType, ApiError> {
    NodeType::parse(label).ok_or_else(|| {
        error(
            StatusCode::NOT_FOUND,
            format!("unknown tier \"{label}\", expected ru, du or cu"),
        )
    })
}

fn tier_table(tables: &TierTables, tier: &str, query: &RangeQuery) -> Response {
    let tier = match parse_tier(tier) {
        Ok(t) => t,
        Err(e) => return e.into_response(),
    };
    match parse_range(query) {
        Ok((from, to)) => {
            Json(TierTableResponse::new(tier, tables.get(tier), from, to)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// `GET /topology` → 200 + `TopologyResponse` JSON
pub async fn get_topology(State(state): State<Arc<AppState>>) -> Json<TopologyResponse> {
    Json(TopologyResponse::from_nodes(&state.nodes))
}

/// `GET /report` → 200 + `NetworkReport` JSON
pub async fn get_report(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.report.clone())
}

/// `GET /utilization/{tier}` → 200 + `TierTableResponse` JSON, 404 for an
/// unknown tier.
pub async fn get_utilization(
    State(state): State<Arc<AppState>>,
    Path(tier): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Response {
    tier_table(&state.output.utilization, &tier, &query)
}

/// `GET /power/{tier}` → 200 + `TierTableResponse` JSON, 404 for an unknown
/// tier.
pub async fn get_power(
    State(state): State<Arc<AppState>>,
    Path(tier): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Response {
    tier_table(&state.output.power, &tier, &query)
}

/// `GET /total-power` → 200 + network summary rows
/// `GET /total-power?from=..&to=..` → rows within the inclusive range
pub async fn get_total_power(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<NetworkPowerRow>>, ApiError> {
    let (from, to) = parse_range(&query)?;
    let rows = state
        .output
        .network
        .iter()
        .filter(|r| from.is_none_or(|f| r.timestamp >= f) && to.is_none_or(|t| r.timestamp <= t))
        .copied()
        .collect();
    Ok(Json(rows))
}

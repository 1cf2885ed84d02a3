// src/serve/mod.rs
pub mod bigquery;
pub mod payload;

use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{info, warn};
use warp::http::StatusCode;
use warp::{reply, Filter, Rejection, Reply};

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    details: Option<String>,
}

/// Every response carries the permissive allow-origin header, error paths
/// included.
fn allow_origin(r: impl Reply) -> impl Reply {
    reply::with_header(r, "Access-Control-Allow-Origin", "*")
}

/// All routes served by the lookup service: a health probe, the CORS
/// preflight answer, and the county lookup itself.
pub fn routes() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let health = warp::path("health").and(warp::get()).and_then(health_check);
    let preflight = warp::options().map(preflight_reply);
    let county = warp::get()
        .and(warp::query::<HashMap<String, String>>())
        .and_then(county_data);
    health.or(preflight).or(county)
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(reply::json(&serde_json::json!({
        "status": "healthy",
        "service": "bls-county-lookup"
    })))
}

/// Preflight: allow GET from any origin with the Content-Type header and let
/// browsers cache the answer for an hour. Never touches the warehouse.
fn preflight_reply() -> impl Reply {
    let resp = reply::with_status(reply::reply(), StatusCode::NO_CONTENT);
    let resp = reply::with_header(resp, "Access-Control-Allow-Origin", "*");
    let resp = reply::with_header(resp, "Access-Control-Allow-Methods", "GET");
    let resp = reply::with_header(resp, "Access-Control-Allow-Headers", "Content-Type");
    reply::with_header(resp, "Access-Control-Max-Age", "3600")
}

/// Main lookup. Requires `county` and `state` query parameters; `county` is
/// used verbatim, `state` is trimmed and upper-cased. Returns every matching
/// warehouse row folded into a single JSON payload.
async fn county_data(params: HashMap<String, String>) -> Result<reply::Response, Rejection> {
    let (county, state) = match (params.get("county"), params.get("state")) {
        (Some(county), Some(state)) => (county.clone(), state.trim().to_uppercase()),
        _ => {
            let resp = reply::with_status(
                "You must supply the county and state URL parameters",
                StatusCode::BAD_REQUEST,
            );
            return Ok(allow_origin(resp).into_response());
        }
    };

    let start = Instant::now();
    match bigquery::county_rows(&county, &state).await {
        Ok(rows) => {
            info!(
                county = %county,
                state = %state,
                rows = rows.len(),
                elapsed = ?start.elapsed(),
                "lookup complete"
            );
            let body = payload::build_payload(rows);
            Ok(allow_origin(reply::json(&body)).into_response())
        }
        Err(e) => {
            warn!("lookup for {}, {} failed: {:?}", county, state, e);
            let resp = reply::with_status(
                reply::json(&ErrorResponse {
                    error: "warehouse query failed".to_string(),
                    details: Some(format!("{:?}", e)),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            );
            Ok(allow_origin(resp).into_response())
        }
    }
}

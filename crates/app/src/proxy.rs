use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::{counter, histogram};
use nexacore_careers_hireloom::HireloomError;
use tracing::{error, warn};

use crate::error::ApiError;
use crate::router::AppState;

/// Relays the upstream job listing to browser callers.
///
/// Exists so the careers pages can fetch jobs without tripping CORS: one
/// inbound request maps to exactly one outbound GET, and a 2xx upstream body
/// is returned byte-for-byte as re-serialized JSON. No retries, no caching.
pub async fn handle(State(state): State<AppState>) -> Result<Response, ApiError> {
    let start = Instant::now();
    let result = state.hireloom().list_jobs_raw().await;
    histogram!("upstream_latency_seconds", "endpoint" => "jobs")
        .record(start.elapsed().as_secs_f64());

    match result {
        Ok(body) => {
            counter!("proxy_requests_total", "result" => "relayed").increment(1);
            Ok(Json(body).into_response())
        }
        Err(HireloomError::Status { status, body }) => {
            counter!("proxy_requests_total", "result" => "upstream_error").increment(1);
            warn!(status = %status, body = %body, "upstream rejected jobs fetch");
            let mirrored = StatusCode::from_u16(status.as_u16())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Err(ApiError::new(mirrored, "Failed to fetch jobs from Hireloom"))
        }
        Err(err) => {
            counter!("proxy_requests_total", "result" => "transport_error").increment(1);
            error!(error = %err, "jobs fetch failed before an upstream response arrived");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ))
        }
    }
}

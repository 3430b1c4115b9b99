use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use nexacore_careers_hireloom::HireloomClient;

use crate::jobs::{self, JobFeed};
use crate::{proxy, telemetry};

#[derive(Clone)]
pub struct AppState {
    metrics: PrometheusHandle,
    hireloom: HireloomClient,
    feed: JobFeed,
}

impl AppState {
    pub fn new(metrics: PrometheusHandle, hireloom: HireloomClient) -> Self {
        let feed = JobFeed::new(hireloom.clone());
        Self {
            metrics,
            hireloom,
            feed,
        }
    }

    pub fn metrics(&self) -> &PrometheusHandle {
        &self.metrics
    }

    pub fn hireloom(&self) -> &HireloomClient {
        &self.hireloom
    }

    pub fn feed(&self) -> &JobFeed {
        &self.feed
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .route("/api/hireloom-jobs", get(proxy::handle))
        .route("/api/jobs", get(jobs::browse))
        .route("/api/jobs/:job_id", get(jobs::detail))
        .route("/api/jobs/:job_id/apply", post(jobs::apply))
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = telemetry::render_metrics(state.metrics());
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; version=0.0.4")
        .body(Body::from(body))
        .unwrap()
}

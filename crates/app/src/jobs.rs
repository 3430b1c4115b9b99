use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use metrics::counter;
use nexacore_careers_core::{
    department_options, filter_jobs, retain_published, validate_application, ApplicationForm,
    ApplicationSubmission, Job, SubmissionReceipt, ALL_DEPARTMENTS,
};
use nexacore_careers_hireloom::{HireloomClient, HireloomError};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use url::Url;
use uuid::Uuid;

use crate::error::ApiError;
use crate::router::AppState;

/// Acknowledgement latency of the recruiting backend we stand in for.
const SUBMISSION_DELAY: Duration = Duration::from_millis(400);

/// Fetch layer between the HTTP surface and the upstream client.
///
/// The published-only filter runs here, exactly once, where upstream data
/// enters the system. Downstream code never re-checks job status.
#[derive(Clone)]
pub struct JobFeed {
    client: HireloomClient,
}

impl JobFeed {
    pub fn new(client: HireloomClient) -> Self {
        Self { client }
    }

    /// Returns the jobs eligible for display.
    ///
    /// Failures surface as errors rather than an empty list, so callers can
    /// tell a broken upstream from a company with no open positions.
    pub async fn list(&self) -> Result<Vec<Job>, HireloomError> {
        self.client.list_jobs().await.map(retain_published)
    }

    /// Looks up a single displayable job.
    ///
    /// Unpublished jobs are reported as absent, same as unknown ids.
    pub async fn find(&self, job_id: &str) -> Result<Option<Job>, HireloomError> {
        let job = self.client.fetch_job(job_id).await?;
        Ok(job.filter(|job| job.status.is_published()))
    }
}

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    department: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BrowsePage {
    jobs: Vec<Job>,
    departments: Vec<String>,
}

/// `GET /api/jobs` — published jobs narrowed by free-text query and
/// department. Department options are derived from the unfiltered published
/// set so the selector stays stable while the user types.
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<BrowsePage>, ApiError> {
    let jobs = state.feed().list().await.map_err(|err| {
        counter!("job_feed_requests_total", "endpoint" => "browse", "result" => "upstream_error")
            .increment(1);
        error!(error = %err, "job listing fetch failed");
        ApiError::upstream_unavailable()
    })?;

    counter!("job_feed_requests_total", "endpoint" => "browse", "result" => "ok").increment(1);
    let departments = department_options(&jobs);
    let search = query.q.unwrap_or_default();
    let department = query
        .department
        .unwrap_or_else(|| ALL_DEPARTMENTS.to_string());
    let jobs = filter_jobs(jobs, &search, &department);

    Ok(Json(BrowsePage { jobs, departments }))
}

#[derive(Debug, Serialize)]
pub struct JobDetail {
    #[serde(flatten)]
    job: Job,
    apply_url: String,
}

/// `GET /api/jobs/{id}` — a single published job with its external apply
/// URL attached.
pub async fn detail(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobDetail>, ApiError> {
    let job = find_published(&state, "detail", &job_id).await?;
    let apply_url = apply_url_for(&state, &job)?;

    Ok(Json(JobDetail {
        job,
        apply_url: apply_url.into(),
    }))
}

/// `POST /api/jobs/{id}/apply` — validates the form, then records the
/// application. A rejected form never triggers an upstream call.
pub async fn apply(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(form): Json<ApplicationForm>,
) -> Result<Json<SubmissionReceipt>, ApiError> {
    let valid = validate_application(&form).map_err(|err| {
        counter!("application_submissions_total", "result" => "rejected").increment(1);
        ApiError::validation(err)
    })?;

    let job = find_published(&state, "apply", &job_id).await?;

    let submission = ApplicationSubmission {
        job_id: job.id.clone(),
        job_title: job.title.clone(),
        name: valid.name,
        email: valid.email,
        phone: valid.phone,
        resume_filename: valid.resume_filename,
    };
    let receipt = submit_application(submission).await;
    counter!("application_submissions_total", "result" => "accepted").increment(1);

    Ok(Json(receipt))
}

async fn find_published(
    state: &AppState,
    endpoint: &'static str,
    job_id: &str,
) -> Result<Job, ApiError> {
    match state.feed().find(job_id).await {
        Ok(Some(job)) => {
            counter!("job_feed_requests_total", "endpoint" => endpoint, "result" => "ok")
                .increment(1);
            Ok(job)
        }
        Ok(None) => {
            counter!("job_feed_requests_total", "endpoint" => endpoint, "result" => "not_found")
                .increment(1);
            Err(ApiError::job_not_found())
        }
        Err(err) => {
            counter!(
                "job_feed_requests_total",
                "endpoint" => endpoint,
                "result" => "upstream_error"
            )
            .increment(1);
            error!(error = %err, job_id, "job lookup failed");
            Err(ApiError::upstream_unavailable())
        }
    }
}

fn apply_url_for(state: &AppState, job: &Job) -> Result<Url, ApiError> {
    let slug = job
        .company_slug
        .as_deref()
        .unwrap_or_else(|| state.hireloom().company_slug());
    state.hireloom().apply_url(slug, &job.id).map_err(|err| {
        error!(error = %err, job_id = %job.id, "apply url construction failed");
        ApiError::new(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
    })
}

/// Hands a validated application to the recruiting backend.
///
/// The public Hireloom API exposes no submission endpoint, so the
/// application is logged and acknowledged after a fixed delay instead of
/// being forwarded. Nothing is persisted.
async fn submit_application(submission: ApplicationSubmission) -> SubmissionReceipt {
    info!(
        job_id = %submission.job_id,
        job_title = %submission.job_title,
        applicant = %submission.name,
        email = %submission.email,
        resume = submission.resume_filename.as_deref().unwrap_or("<none>"),
        "application received"
    );
    tokio::time::sleep(SUBMISSION_DELAY).await;

    SubmissionReceipt {
        id: Uuid::new_v4(),
        job_id: submission.job_id,
        success: true,
        message: "Application received. Our recruiting team will be in touch.".to_string(),
        received_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use crate::router::{app_router, testing};
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use httpmock::prelude::*;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn job_value(id: &str, title: &str, department: &str, status: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "location": "Remote",
            "type": "Full-time",
            "department": department,
            "description": format!("{title} role."),
            "companySlug": "nexacore",
            "postedDate": "2025-06-01",
            "status": status
        })
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .expect("handler should respond");
        let status = response.status();
        let collected = response.into_body().collect().await.expect("body");
        let body: Value =
            serde_json::from_slice(&collected.to_bytes()).expect("body should be JSON");
        (status, body)
    }

    async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .expect("handler should respond");
        let status = response.status();
        let collected = response.into_body().collect().await.expect("body");
        let body: Value =
            serde_json::from_slice(&collected.to_bytes()).expect("body should be JSON");
        (status, body)
    }

    async fn mock_listing(server: &MockServer, jobs: Value) {
        server
            .mock_async(move |when, then| {
                when.method(GET)
                    .path("/api/public/jobs")
                    .query_param("companySlug", "nexacore");
                then.status(200).json_body(json!({ "jobs": jobs }));
            })
            .await;
    }

    #[tokio::test]
    async fn browse_lists_only_published_jobs() {
        let server = MockServer::start_async().await;
        mock_listing(
            &server,
            json!([
                job_value("1", "Backend Engineer", "Engineering", "published"),
                job_value("2", "QA Engineer", "Engineering", "draft"),
                job_value("3", "Recruiter", "People", "closed"),
            ]),
        )
        .await;

        let app = app_router(testing::state_for(&server.base_url()));
        let (status, body) = get_json(app, "/api/jobs").await;

        assert_eq!(status, StatusCode::OK);
        let jobs = body["jobs"].as_array().expect("jobs array");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0]["id"], "1");
        assert_eq!(body["departments"], json!(["All", "Engineering"]));
    }

    #[tokio::test]
    async fn browse_filters_by_query_across_all_departments() {
        let server = MockServer::start_async().await;
        mock_listing(
            &server,
            json!([
                job_value("1", "Backend Engineer", "Engineering", "published"),
                job_value("2", "Product Designer", "Design", "published"),
            ]),
        )
        .await;

        let app = app_router(testing::state_for(&server.base_url()));
        let (status, body) = get_json(app, "/api/jobs?q=engineer&department=All").await;

        assert_eq!(status, StatusCode::OK);
        let jobs = body["jobs"].as_array().expect("jobs array");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0]["title"], "Backend Engineer");
        // Options reflect the full published set, not the narrowed one.
        assert_eq!(body["departments"], json!(["All", "Engineering", "Design"]));
    }

    #[tokio::test]
    async fn browse_filters_by_department() {
        let server = MockServer::start_async().await;
        mock_listing(
            &server,
            json!([
                job_value("1", "Backend Engineer", "Engineering", "published"),
                job_value("2", "Product Designer", "Design", "published"),
            ]),
        )
        .await;

        let app = app_router(testing::state_for(&server.base_url()));
        let (status, body) = get_json(app, "/api/jobs?department=Design").await;

        assert_eq!(status, StatusCode::OK);
        let jobs = body["jobs"].as_array().expect("jobs array");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0]["id"], "2");
    }

    #[tokio::test]
    async fn browse_reports_upstream_failure_distinctly_from_empty() {
        let server = MockServer::start_async().await;
        mock_listing(&server, json!([])).await;

        let app = app_router(testing::state_for(&server.base_url()));
        let (status, body) = get_json(app, "/api/jobs").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobs"], json!([]));

        let broken = app_router(testing::state_for("http://127.0.0.1:9"));
        let (status, body) = get_json(broken, "/api/jobs").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "upstream_unavailable");
    }

    #[tokio::test]
    async fn detail_returns_job_with_apply_url() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/public/jobs/job-1");
                then.status(200).json_body(job_value(
                    "job-1",
                    "Backend Engineer",
                    "Engineering",
                    "published",
                ));
            })
            .await;

        let app = app_router(testing::state_for(&server.base_url()));
        let (status, body) = get_json(app, "/api/jobs/job-1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "job-1");
        assert_eq!(
            body["apply_url"],
            format!("{}/company/nexacore/job-1", server.base_url())
        );
    }

    #[tokio::test]
    async fn detail_missing_and_unpublished_jobs_are_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/public/jobs/missing");
                then.status(404).body("not found");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/public/jobs/draft-1");
                then.status(200)
                    .json_body(job_value("draft-1", "QA Engineer", "Engineering", "draft"));
            })
            .await;

        let app = app_router(testing::state_for(&server.base_url()));
        let (status, body) = get_json(app.clone(), "/api/jobs/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "job_not_found");

        // A draft job is indistinguishable from an unknown id.
        let (status, body) = get_json(app, "/api/jobs/draft-1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "job_not_found");
    }

    #[tokio::test]
    async fn apply_accepts_valid_form() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/public/jobs/job-1");
                then.status(200).json_body(job_value(
                    "job-1",
                    "Backend Engineer",
                    "Engineering",
                    "published",
                ));
            })
            .await;

        let app = app_router(testing::state_for(&server.base_url()));
        let (status, body) = post_json(
            app,
            "/api/jobs/job-1/apply",
            json!({ "name": "Jane Doe", "email": "jane@example.com" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["job_id"], "job-1");
        assert!(!body["message"].as_str().expect("message").is_empty());
        assert!(body["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn apply_rejects_invalid_form_without_calling_upstream() {
        let server = MockServer::start_async().await;
        let lookup = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/public/jobs/job-1");
                then.status(200).json_body(job_value(
                    "job-1",
                    "Backend Engineer",
                    "Engineering",
                    "published",
                ));
            })
            .await;

        let app = app_router(testing::state_for(&server.base_url()));
        let (status, body) = post_json(
            app,
            "/api/jobs/job-1/apply",
            json!({ "name": "", "email": "not-an-email" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_failed");
        assert_eq!(body["fields"]["name"], "Name is required");
        assert_eq!(body["fields"]["email"], "Please enter a valid email");
        assert_eq!(lookup.hits_async().await, 0);
    }

    #[tokio::test]
    async fn apply_to_unknown_job_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/public/jobs/missing");
                then.status(404).body("not found");
            })
            .await;

        let app = app_router(testing::state_for(&server.base_url()));
        let (status, body) = post_json(
            app,
            "/api/jobs/missing/apply",
            json!({ "name": "Jane Doe", "email": "jane@example.com" }),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "job_not_found");
    }
}

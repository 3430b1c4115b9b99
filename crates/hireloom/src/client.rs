use nexacore_careers_core::{Job, JobsDocument};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Client for the public job-board endpoints of the Hireloom recruiting API.
///
/// The base URL and company slug are passed in at construction; the client
/// never consults ambient process state.
#[derive(Clone)]
pub struct HireloomClient {
    http: Client,
    base_url: Url,
    company_slug: String,
}

impl HireloomClient {
    /// Creates a new client with the provided configuration.
    pub fn new(company_slug: impl Into<String>, base_url: Url, http: Client) -> Self {
        Self {
            http,
            base_url,
            company_slug: company_slug.into(),
        }
    }

    pub fn company_slug(&self) -> &str {
        &self.company_slug
    }

    /// Fetches the job listing for the configured company.
    ///
    /// Jobs are returned exactly as the upstream sent them; the caller owns
    /// any display filtering.
    pub async fn list_jobs(&self) -> Result<Vec<Job>, HireloomError> {
        let response = self.http.get(self.jobs_url()?).send().await?;
        parse_json::<JobsDocument>(response)
            .await
            .map(JobsDocument::into_jobs)
    }

    /// Fetches the job listing without reshaping it.
    ///
    /// The body is parsed only to prove it is JSON; the relay endpoint sends
    /// it back to the browser verbatim.
    pub async fn list_jobs_raw(&self) -> Result<Value, HireloomError> {
        let response = self.http.get(self.jobs_url()?).send().await?;
        parse_json::<Value>(response).await
    }

    /// Looks up a single job by identifier.
    ///
    /// An upstream 404 maps to `Ok(None)`; transport failures stay errors so
    /// the two conditions remain distinguishable to callers.
    pub async fn fetch_job(&self, job_id: &str) -> Result<Option<Job>, HireloomError> {
        let url = self.endpoint(&["api", "public", "jobs", job_id])?;
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        parse_json::<Job>(response).await.map(Some)
    }

    /// Builds the external application URL for a job:
    /// `{base}/company/{companySlug}/{jobId}`.
    ///
    /// Pure and deterministic. Path segments are percent-encoded, so
    /// distinct `(company_slug, job_id)` pairs never collide on one URL.
    pub fn apply_url(&self, company_slug: &str, job_id: &str) -> Result<Url, HireloomError> {
        self.endpoint(&["company", company_slug, job_id])
    }

    fn jobs_url(&self) -> Result<Url, HireloomError> {
        let mut url = self.base_url.join("api/public/jobs")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("companySlug", &self.company_slug);
        }
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, HireloomError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HireloomError::BaseUrl)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Errors produced by the Hireloom client.
#[derive(Debug, Error)]
pub enum HireloomError {
    #[error("failed to build url: {0}")]
    Url(#[from] url::ParseError),
    #[error("base url cannot carry path segments")]
    BaseUrl,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

async fn parse_json<T>(response: Response) -> Result<T, HireloomError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<unavailable>"));
        return Err(HireloomError::Status { status, body });
    }

    Ok(response.json().await?)
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single open position as published by the recruiting backend.
///
/// Field names mirror the upstream JSON (camelCase); `postedDate` is kept as
/// the raw upstream string because its format is not part of the API
/// contract and the proxy must relay it untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub location: String,
    #[serde(rename = "type")]
    pub employment_type: String,
    pub department: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_slug: Option<String>,
    pub posted_date: String,
    pub status: JobStatus,
}

/// Publication status attached to every job by the recruiting backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Published,
    Draft,
    Closed,
}

impl JobStatus {
    /// Returns the canonical wire representation for the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
            Self::Closed => "closed",
        }
    }

    /// Only published jobs are eligible for display to end users.
    pub fn is_published(self) -> bool {
        matches!(self, Self::Published)
    }
}

/// Payload shapes the upstream uses for a jobs listing.
///
/// Older deployments return a bare array, newer ones wrap it in an object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JobsDocument {
    Bare(Vec<Job>),
    Wrapped { jobs: Vec<Job> },
}

impl JobsDocument {
    pub fn into_jobs(self) -> Vec<Job> {
        match self {
            Self::Bare(jobs) | Self::Wrapped { jobs } => jobs,
        }
    }
}

/// Raw application form fields as submitted by a candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub resume_filename: Option<String>,
}

/// A validated application bound to the job it targets.
///
/// Transient by design: built at submission time, handed to the recruiting
/// backend, and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationSubmission {
    pub job_id: String,
    pub job_title: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_filename: Option<String>,
}

/// Acknowledgement returned to the candidate after a submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub job_id: String,
    pub success: bool,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nexacore_careers_core::InvalidApplication;
use serde::Serialize;

/// JSON error body shared by every failing endpoint: an `error` string plus
/// a field→message map when a form was rejected.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<&'static str, String>>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new<S: Into<String>>(status: StatusCode, error: S) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                fields: None,
            },
        }
    }

    /// The upstream could not be reached or answered with an error.
    /// Distinct from an empty-but-successful listing.
    pub fn upstream_unavailable() -> Self {
        Self::new(StatusCode::BAD_GATEWAY, "upstream_unavailable")
    }

    pub fn job_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "job_not_found")
    }

    pub fn validation(err: InvalidApplication) -> Self {
        let fields = err
            .fields
            .into_iter()
            .map(|field| (field.field, field.message))
            .collect();
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ErrorBody {
                error: "validation_failed".to_string(),
                fields: Some(fields),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = Json(self.body).into_response();
        *response.status_mut() = self.status;
        response
    }
}

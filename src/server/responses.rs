//! HTTP responses produced by the contact handlers.
//!
//! - **201 Created** with a `Location` header for saved contacts
//! - **400** problem details for request bodies that cannot be read as a contact
//! - **404 Not Found** with an empty body for absent resources
//! - **500** problem details (RFC 7807) for failed saves and store faults

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::error::StoreError;

/// Media type for problem detail bodies.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// HTTP 201 Created response with an optional `Location` header.
#[derive(Debug)]
pub struct Created<T> {
    data: T,
    location: Option<String>,
}

impl<T> Created<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            location: None,
        }
    }

    /// Point the `Location` header at the created resource.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::CREATED, Json(&self.data)).into_response();

        if let Some(location) = self.location {
            if let Ok(value) = HeaderValue::from_str(&location) {
                response.headers_mut().insert(header::LOCATION, value);
            }
        }

        response
    }
}

/// RFC 7807 problem details body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProblemDetails {
    pub fn new(status: StatusCode, problem_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            problem_type: problem_type.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
        }
    }

    /// The generic 500 problem.
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "https://tools.ietf.org/html/rfc9110#section-15.6.1",
            "An error occurred while processing your request.",
        )
    }

    /// The generic 400 problem.
    pub fn bad_request() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "https://tools.ietf.org/html/rfc9110#section-15.5.1",
            "One or more validation errors occurred.",
        )
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(&self)).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        response
    }
}

/// Errors returned by the contact handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request body could not be read
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body is not declared as JSON
    #[error("Expected a JSON request body")]
    UnsupportedMediaType,

    /// The requested resource does not exist
    #[error("Resource not found")]
    NotFound,

    /// The operation failed in a way the caller should see described
    #[error("{0}")]
    Problem(String),

    /// The contact store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => Self::UnsupportedMediaType,
            other => Self::BadRequest(other.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(detail) => {
                ProblemDetails::bad_request().with_detail(detail).into_response()
            }
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Problem(detail) => ProblemDetails::internal().with_detail(detail).into_response(),
            Self::Store(err) => {
                error!("Contact store error: {}", err);
                ProblemDetails::internal().into_response()
            }
        }
    }
}

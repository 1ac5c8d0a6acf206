//! Response envelope shared by every route.
//!
//! Success: `{"success": true, "message": ..., "data": ..., "code": 0}`.
//! Failure: `{"success": false, "message": ..., "error": ..., "code": 1}`,
//! with the status code taken from the [`ServiceError`] class.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use panel_core::ServiceError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub code: u8,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            code: 0,
        }
    }
}

/// A successful response with an explicit status.
pub struct Reply<T: Serialize> {
    status: StatusCode,
    body: ApiResponse<T>,
}

impl<T: Serialize> Reply<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            body: ApiResponse::ok(message, data),
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: ApiResponse::ok(message, data),
        }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// A failed request.
///
/// `message` summarises what the route was doing; without one the failure
/// class label is used. `data` carries an optional structured report.
#[derive(Debug)]
pub struct ApiError {
    error: ServiceError,
    message: Option<&'static str>,
    data: Option<serde_json::Value>,
}

impl ApiError {
    pub fn context(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    pub fn with_data<T: Serialize>(mut self, data: &T) -> Self {
        self.data = serde_json::to_value(data).ok();
        self
    }

    pub fn service_error(&self) -> &ServiceError {
        &self.error
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        Self {
            error,
            message: None,
            data: None,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::validation(format!("Invalid request body: {}", rejection.body_text()))
            .into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.error);
        }

        let body = ApiResponse {
            success: false,
            message: self.message.unwrap_or(self.error.kind()).to_string(),
            data: self.data,
            error: Some(self.error.to_string()),
            code: 1,
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<Reply<T>, ApiError>;

/// Attach a route-level message to a service failure.
pub trait Context<T> {
    fn context(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T> Context<T> for Result<T, ServiceError> {
    fn context(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from(e).context(message))
    }
}

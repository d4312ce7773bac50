// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! Uniform response envelope shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Response body returned by every endpoint, success or failure.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Envelope {
    /// Mirrors the HTTP status code.
    pub code: u16,
    pub error: bool,
    /// Operation payload; `null` on failure.
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
    pub message: String,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            code: 200,
            error: false,
            data: Some(data),
            message: "success".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Generic failure; the underlying detail is logged, never returned.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(Envelope {
            code: self.status.as_u16(),
            error: true,
            data: None,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::json;

    #[test]
    fn constructors_set_status_and_message() {
        let bad = ApiError::bad_request("Parameters required: username");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "Parameters required: username");

        let internal = ApiError::internal();
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.message, "Internal Server Error");
    }

    #[test]
    fn success_envelope_shape() {
        let body = serde_json::to_value(Envelope::success(json!({"transaction_id": "abc"}))).unwrap();
        assert_eq!(
            body,
            json!({
                "code": 200,
                "error": false,
                "data": { "transaction_id": "abc" },
                "message": "success"
            })
        );
    }

    #[tokio::test]
    async fn into_response_returns_envelope_with_null_data() {
        let response = ApiError::internal().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "code": 500,
                "error": true,
                "data": null,
                "message": "Internal Server Error"
            })
        );
    }
}

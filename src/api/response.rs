use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Wrapper for successful API responses that applies the project envelope:
/// `{message_type, message, data}`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    message: String,
    data: Option<T>,
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with a payload.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            status: StatusCode::OK,
        }
    }

    /// 201 Created with the stored entity.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            status: StatusCode::CREATED,
        }
    }
}

impl ApiResponse<()> {
    /// 200 OK with a message and null data.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            status: StatusCode::OK,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data = match &self.data {
            Some(data) => match serde_json::to_value(data) {
                Ok(value) => value,
                Err(e) => {
                    tracing::error!("failed to serialize response data: {}", e);
                    return crate::error::ApiError::internal_server_error(
                        "Failed to format response",
                    )
                    .into_response();
                }
            },
            None => Value::Null,
        };

        let envelope = json!({
            "message_type": "success",
            "message": self.message,
            "data": data,
        });

        (self.status, Json(envelope)).into_response()
    }
}

/// Handler result: a success envelope or an `ApiError`.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

//! `AppError` 与接口响应体

use super::codes::ErrorCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

pub type ErrorDetails = HashMap<String, Value>;

/// 业务层统一错误: 错误码 + 提示文案 + 可选上下文
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<ErrorDetails>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// 使用错误码自带的文案
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// 附加一条上下文, 原样出现在响应的 `details` 中
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let details = self.details.get_or_insert_with(ErrorDetails::new);
        details.insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, message)
    }

    /// 同名资源已存在这类冲突
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, message)
    }
}

/// 错误响应体
///
/// ```json
/// { "code": 7001, "message": "No register session is open", "details": {...} }
/// ```
///
/// 成功响应直接返回数据本身, 不套这一层.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

impl From<AppError> for ApiResponse {
    fn from(err: AppError) -> Self {
        ApiResponse {
            code: err.code.code(),
            message: err.message,
            details: err.details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.code.category().is_system() {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        }
        let status = self.http_status();
        (status, Json(ApiResponse::from(self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_code_message() {
        let err = AppError::new(ErrorCode::SaleNotFound);
        assert_eq!(err.code, ErrorCode::SaleNotFound);
        assert_eq!(err.message, "Sale not found");
        assert!(err.details.is_none());
        assert_eq!(err.to_string(), "Sale not found");
    }

    #[test]
    fn details_accumulate() {
        let err = AppError::validation("Invalid date range")
            .with_detail("field", "startDate")
            .with_detail("value", "2024-13-40");

        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        let details = err.details.unwrap();
        assert_eq!(details["field"], "startDate");
        assert_eq!(details["value"], "2024-13-40");
    }

    #[test]
    fn helper_constructors() {
        let err = AppError::conflict("Category \"Drinks\" already exists");
        assert_eq!(err.code, ErrorCode::AlreadyExists);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
        assert_eq!(AppError::database("locked").code, ErrorCode::DatabaseError);
    }

    #[test]
    fn error_body_carries_code_and_details() {
        let err = AppError::new(ErrorCode::RegisterAlreadyOpen).with_detail("session_id", 7);
        let json = serde_json::to_value(ApiResponse::from(err)).unwrap();

        assert_eq!(json["code"], 7002);
        assert_eq!(json["message"], "A register session is already open");
        assert_eq!(json["details"]["session_id"], 7);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn error_body_skips_empty_details() {
        let json = serde_json::to_value(ApiResponse::from(AppError::validation("bad"))).unwrap();
        assert_eq!(json["code"], 2);
        assert!(json.get("details").is_none());
    }

    #[test]
    fn into_response_uses_mapped_status() {
        let response = AppError::new(ErrorCode::BookingNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

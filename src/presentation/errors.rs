// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::application::validators::ValidationError;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::rate_limiter::RateLimitError;
use crate::domain::services::report_service::ReportError;

/// 数据库读取失败时返回给客户端的提示
pub const DATABASE_ERROR_MESSAGE: &str = "数据库读取失败，请联系管理员";
/// 内部错误时返回给客户端的提示
pub const INTERNAL_ERROR_MESSAGE: &str = "服务器内部错误，请稍后重试";

/// 应用错误类型
///
/// 每个变体对应一种终止请求的响应：
/// - `Rejected`：业务拒绝，HTTP 200，`{"code":1,"msg":...}`
/// - `Frozen`：账户冻结，HTTP 200，只有 `msg` 字段
/// - `Malformed`：请求体无法解析，HTTP 400
/// - `Database`：记录日志，HTTP 200，统一的数据库错误提示
/// - `Internal`：记录日志，HTTP 500
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Frozen(String),

    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error(transparent)]
    Database(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        ApiError::Rejected(msg.into())
    }
}

fn envelope(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "code": 1, "msg": msg }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Rejected(msg) => envelope(StatusCode::OK, &msg),
            ApiError::Frozen(msg) => (StatusCode::OK, Json(json!({ "msg": msg }))).into_response(),
            ApiError::Malformed(reason) => {
                tracing::debug!("Rejecting malformed request: {}", reason);
                envelope(StatusCode::BAD_REQUEST, "请求格式不正确")
            }
            ApiError::Database(e) => {
                error!("Database error while handling request: {}", e);
                envelope(StatusCode::OK, DATABASE_ERROR_MESSAGE)
            }
            ApiError::Internal(reason) => {
                error!("Internal error while handling request: {}", reason);
                envelope(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Rejected(err.to_string())
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Repository(e) => ApiError::Database(e),
            other => ApiError::Rejected(other.to_string()),
        }
    }
}

impl From<RateLimitError> for ApiError {
    fn from(err: RateLimitError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

//! 统一错误处理模块
//!
//! 定义应用级错误类型，并实现 axum 的 IntoResponse trait 以便自动转换为 HTTP 响应。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::documentation::{ClientError, FormError, ValidationError};

/// 应用错误枚举
#[derive(Error, Debug)]
pub enum AppError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 输入校验失败
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 请求参数错误
    #[error("请求错误: {0}")]
    BadRequest(String),

    /// 资源未找到
    #[error("未找到: {0}")]
    NotFound(String),

    /// 已有提交在进行中
    #[error("{0}")]
    Conflict(String),

    /// 生成服务调用失败
    #[error("{0}")]
    Upstream(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::SubmissionPending => AppError::Conflict(err.to_string()),
            FormError::Validation(e) => AppError::Validation(e),
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ConfigError(msg) => AppError::Config(msg),
            ClientError::HttpError(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl AppError {
    /// 对应的 HTTP 状态码
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::Config(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Upstream(msg)
            | AppError::Internal(msg) => msg.clone(),
            AppError::Validation(e) => e.to_string(),
        };

        let body = Json(json!({
            "success": false,
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// 便捷类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(FormError::SubmissionPending).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(FormError::Validation(ValidationError::EmptyLink)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Upstream("repo not found".to_string()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::from(ClientError::ConfigError("empty".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_is_user_facing() {
        let err = AppError::from(ValidationError::EmptyLink);
        assert_eq!(err.to_string(), "Please enter a repository link.");
    }
}

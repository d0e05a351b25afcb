//! 提交结果类型定义

use serde::Serialize;

use super::model::DocumentationModel;

/// 服务未给出错误信息时的兜底提示
pub const GENERIC_SERVICE_ERROR: &str = "Error generating documentation.";

/// 网络错误时展示给用户的提示
pub const GENERIC_TRANSPORT_ERROR: &str = "Error connecting to the server.";

/// 单次提交的结果
///
/// 每次提交新建，渲染后丢弃，从不持久化。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum SubmissionResult {
    /// 生成成功
    Success(DocumentationModel),
    /// 服务端明确报告失败
    ServiceError(String),
    /// 请求未能完成（DNS、连接被拒、超时等）
    TransportError(String),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success(_))
    }

    /// 展示给用户的错误信息
    ///
    /// 服务错误原样展示；网络错误统一展示通用的连接提示。
    pub fn user_message(&self) -> Option<&str> {
        match self {
            SubmissionResult::Success(_) => None,
            SubmissionResult::ServiceError(message) => Some(message),
            SubmissionResult::TransportError(_) => Some(GENERIC_TRANSPORT_ERROR),
        }
    }
}

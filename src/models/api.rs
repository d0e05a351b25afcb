//! REST API 请求/响应模型

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 创建表单请求（字段均可选）
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    #[serde(default)]
    pub repository_link: Option<String>,
    #[serde(default)]
    pub selected_sections: Option<Vec<String>>,
}

/// 设置仓库链接请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLinkRequest {
    pub repository_link: String,
}

/// 切换章节请求
#[derive(Debug, Deserialize)]
pub struct ToggleSectionRequest {
    pub section: String,
}

/// 切换章节响应
#[derive(Debug, Serialize)]
pub struct ToggleSectionResponse {
    pub section: String,
    pub selected: bool,
    #[serde(rename = "selectedSections")]
    pub selected_sections: Vec<&'static str>,
}

/// 替换章节选择请求
#[derive(Debug, Deserialize)]
pub struct SetSectionsRequest {
    pub sections: Vec<String>,
}

/// 提交请求
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// 只发送仓库链接，不带章节选择
    #[serde(default)]
    pub link_only: bool,
}

/// 渲染任意文档 JSON 的请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub documentation: Value,
    #[serde(default)]
    pub repository_link: Option<String>,
}

/// 视图输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewFormat {
    #[default]
    Json,
    Markdown,
}

/// 视图查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub format: ViewFormat,
}

/// 通用操作响应
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

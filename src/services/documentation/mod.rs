//! 文档请求/响应模块
//!
//! 提供仓库文档生成的请求构建、提交和渲染功能
//!
//! # 功能
//!
//! - 章节目录：固定有序的 15 个章节
//! - 文档模型：每个章节可选的类型化结构，宽松解码
//! - 请求构建：校验链接和章节选择
//! - 提交客户端：调用外部生成服务，结果分为成功、服务错误、网络错误
//! - 渲染：始终输出 15 个章节，缺失章节显示占位内容
//!
//! # 使用示例
//!
//! ```ignore
//! use std::time::Duration;
//! use docs_portal_rs::services::documentation::{EmptySelectionPolicy, FormState, SubmissionClient};
//!
//! let mut form = FormState::new();
//! form.set_link("https://github.com/user/repo");
//! form.toggle_section("Getting Started")?;
//!
//! let (ticket, request) = form.begin_submission(EmptySelectionPolicy::All)?;
//! let client = SubmissionClient::new("http://localhost:4000", Duration::from_secs(120), Duration::from_secs(30))?;
//! form.complete(ticket, client.submit(&request).await);
//! let tree = form.render();
//! ```

pub mod catalog;
mod client;
mod endpoint;
mod form;
mod markdown;
pub mod model;
mod render;
mod request;
mod selection;
mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use catalog::{catalog, CatalogEntry, SectionId};
pub use client::{ClientError, SubmissionClient};
pub use form::{FormError, FormState};
pub use markdown::to_markdown;
pub use model::DocumentationModel;
pub use render::{render, render_documentation, RenderTree};
pub use request::{EmptySelectionPolicy, GenerationRequest, ValidationError};
pub use types::SubmissionResult;

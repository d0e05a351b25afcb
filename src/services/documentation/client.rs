//! 文档生成服务客户端
//!
//! 每次调用只发起一次 HTTP 请求，不重试。传输层和 HTTP 层的结果
//! 统一转换为 [`SubmissionResult`]。

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::endpoint::{build_documentation_endpoint, build_generate_endpoint};
use super::model::{looks_like_documentation, DocumentationModel};
use super::request::GenerationRequest;
use super::types::{SubmissionResult, GENERIC_SERVICE_ERROR};
use crate::config::AppConfig;

/// 客户端构建错误
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP 客户端构建失败
    #[error("HTTP 客户端创建失败: {0}")]
    HttpError(#[from] reqwest::Error),

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// 文档生成服务客户端
pub struct SubmissionClient {
    client: Client,
    base_url: String,
}

impl SubmissionClient {
    /// 创建新的客户端
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(ClientError::ConfigError("service_base_url is required".to_string()));
        }

        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .pool_max_idle_per_host(5)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// 根据应用配置创建客户端
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.service_base_url,
            Duration::from_secs(config.request_timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 提交生成请求 `{ githubLink, selectedSections }`
    pub async fn submit(&self, request: &GenerationRequest) -> SubmissionResult {
        let endpoint = build_generate_endpoint(&self.base_url);
        info!(
            "Submitting documentation request: endpoint={}, link={}, sections={}",
            endpoint,
            request.repository_link(),
            request.selected_sections().len()
        );
        self.post_json(&endpoint, &request.payload()).await
    }

    /// 提交不带章节选择的简单请求 `{ githubLink }`
    pub async fn submit_link_only(&self, request: &GenerationRequest) -> SubmissionResult {
        let endpoint = build_generate_endpoint(&self.base_url);
        info!(
            "Submitting link-only documentation request: endpoint={}, link={}",
            endpoint,
            request.repository_link()
        );
        self.post_json(&endpoint, &request.to_link_only_payload()).await
    }

    /// 读取已生成的文档（只读展示页）
    pub async fn fetch_documentation(&self) -> SubmissionResult {
        let endpoint = build_documentation_endpoint(&self.base_url);
        info!("Fetching documentation: endpoint={}", endpoint);

        let started = Instant::now();
        let outcome = self.client.get(&endpoint).send().await;
        self.finish(&endpoint, started, outcome).await
    }

    async fn post_json<T: Serialize>(&self, endpoint: &str, body: &T) -> SubmissionResult {
        let started = Instant::now();
        let outcome = self.client.post(endpoint).json(body).send().await;
        self.finish(endpoint, started, outcome).await
    }

    async fn finish(
        &self,
        endpoint: &str,
        started: Instant,
        outcome: Result<reqwest::Response, reqwest::Error>,
    ) -> SubmissionResult {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                warn!("Request to {} failed: {}", endpoint, e);
                return SubmissionResult::TransportError(describe_transport_error(&e));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Reading response from {} failed: {}", endpoint, e);
                return SubmissionResult::TransportError(describe_transport_error(&e));
            }
        };

        let result = interpret_response(status, &body);
        info!(
            "Documentation service responded: status={}, outcome={}, duration_ms={}",
            status.as_u16(),
            outcome_label(&result),
            started.elapsed().as_millis()
        );
        if let SubmissionResult::Success(model) = &result {
            if model.is_empty() {
                warn!("Documentation service returned no recognised sections");
            }
        }
        result
    }
}

/// 将 HTTP 状态码和响应体转换为提交结果
pub fn interpret_response(status: StatusCode, body: &str) -> SubmissionResult {
    let parsed = serde_json::from_str::<Value>(body);

    if !status.is_success() {
        let message = parsed
            .ok()
            .and_then(|value| error_message(&value))
            .unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string());
        debug!("Service error: status={}, message={}", status.as_u16(), message);
        return SubmissionResult::ServiceError(message);
    }

    let value = match parsed {
        Ok(value) => value,
        Err(e) => {
            warn!("Documentation service returned a non-JSON body: {}", e);
            return SubmissionResult::ServiceError(GENERIC_SERVICE_ERROR.to_string());
        }
    };

    if has_error_field(&value) || value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = error_message(&value).unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string());
        return SubmissionResult::ServiceError(message);
    }

    SubmissionResult::Success(extract_documentation(value))
}

/// 存在非 null 的 `error` 字段即视为失败，不论其内容
fn has_error_field(value: &Value) -> bool {
    value.get("error").is_some_and(|error| !error.is_null())
}

/// 错误信息：`error` 字符串，`error.message`，FastAPI 风格的 `detail`，依次尝试
fn error_message(value: &Value) -> Option<String> {
    let error = value.get("error");
    let candidates = [
        error.and_then(Value::as_str),
        error
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str),
        value.get("detail").and_then(Value::as_str),
    ];

    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// 从成功响应中提取文档
///
/// 依次尝试 `documentation`、`data` 和响应根；取第一个包含章节键的对象。
/// 章节数据以 JSON 字符串形式返回时先解析。都不符合时返回空文档。
fn extract_documentation(value: Value) -> DocumentationModel {
    let candidates = [
        value.get("documentation").cloned(),
        value.get("data").cloned(),
        Some(value),
    ];

    for candidate in candidates.into_iter().flatten() {
        let candidate = match candidate {
            Value::String(text) => match serde_json::from_str::<Value>(&text) {
                Ok(parsed) => parsed,
                Err(_) => continue,
            },
            other => other,
        };
        if looks_like_documentation(&candidate) {
            return DocumentationModel::from_json(candidate);
        }
    }

    debug!("Success response carried no documentation sections");
    DocumentationModel::default()
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {}", e)
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

fn outcome_label(result: &SubmissionResult) -> &'static str {
    match result {
        SubmissionResult::Success(_) => "success",
        SubmissionResult::ServiceError(_) => "service_error",
        SubmissionResult::TransportError(_) => "transport_error",
    }
}

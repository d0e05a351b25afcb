//! API 路由模块

mod config;
mod documentation;
mod forms;
mod health;
mod sections;

pub use config::config_routes;
pub use documentation::documentation_routes;
pub use forms::forms_routes;
pub use health::health_routes;
pub use sections::sections_routes;

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Router,
};

use crate::state::AppState;
use std::sync::Arc;

/// 创建所有 API 路由
pub fn create_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(config_routes())
        .merge(sections_routes())
        .merge(forms_routes())
        .merge(documentation_routes())
        .with_state(state)
}

/// Markdown 文本响应
pub(crate) fn markdown_response(text: String) -> Response {
    (
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        text,
    )
        .into_response()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    /// 发送请求并把响应体解析为 JSON
    pub(crate) async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    /// 发送 GET 请求并返回文本响应体
    pub(crate) async fn send_text(app: &Router, method: &str, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_api_routes(Arc::new(AppState::new()));
        let (status, value) = send(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["status"], "ok");
        assert_eq!(value["forms"], 0);
    }

    #[tokio::test]
    async fn test_sections_catalog() {
        let app = create_api_routes(Arc::new(AppState::new()));
        let (status, value) = send(&app, "GET", "/api/sections", None).await;
        assert_eq!(status, StatusCode::OK);

        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 15);
        assert_eq!(entries[0]["title"], "Overview of Code");
        assert_eq!(entries[4]["key"], "FunctionsAndAPIDocumentation");
        assert_eq!(entries[14]["position"], 15);
    }

    #[tokio::test]
    async fn test_config_update_validation() {
        let app = create_api_routes(Arc::new(AppState::new()));
        let (status, value) = send(
            &app,
            "PUT",
            "/api/config",
            Some(serde_json::json!({ "connect_timeout_secs": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["success"], false);
    }
}

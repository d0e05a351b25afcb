//! 文档展示端点
//!
//! 只读展示页：读取生成服务已有的文档并渲染；以及任意文档 JSON 的预览渲染

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{RenderRequest, ViewFormat, ViewQuery};
use crate::services::documentation::{
    render, render_documentation, to_markdown, DocumentationModel, RenderTree,
};
use crate::state::AppState;

use super::markdown_response;

/// 创建文档展示路由
pub fn documentation_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/documentation", get(get_documentation))
        .route("/api/render", post(render_preview))
}

fn tree_response(tree: RenderTree, format: ViewFormat) -> Response {
    match format {
        ViewFormat::Json => Json(tree).into_response(),
        ViewFormat::Markdown => markdown_response(to_markdown(&tree)),
    }
}

fn log_rendered(tree: &RenderTree) {
    info!(
        "Rendered documentation: {} sections, {} placeholders",
        tree.header_count(),
        tree.placeholder_count()
    );
}

/// 读取并渲染生成服务上的文档
async fn get_documentation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> AppResult<Response> {
    let client = state.submission_client()?;
    let result = client.fetch_documentation().await;

    if let Some(message) = result.user_message() {
        warn!("Documentation page unavailable: {}", message);
        return Err(AppError::Upstream(message.to_string()));
    }

    let tree = render(&result);
    log_rendered(&tree);
    Ok(tree_response(tree, query.format))
}

/// 渲染请求体中的文档 JSON
async fn render_preview(
    Query(query): Query<ViewQuery>,
    Json(req): Json<RenderRequest>,
) -> AppResult<Response> {
    if !req.documentation.is_object() {
        return Err(AppError::BadRequest(
            "documentation must be a JSON object".to_string(),
        ));
    }

    let model = DocumentationModel::from_json(req.documentation);
    let tree = render_documentation(&model, req.repository_link.as_deref());
    log_rendered(&tree);

    Ok(tree_response(tree, query.format))
}

#[cfg(test)]
mod tests {
    use super::super::create_api_routes;
    use super::super::tests::{send, send_text};
    use crate::services::documentation::fixtures::{full_documentation, spawn_service};
    use crate::state::AppState;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_documentation_page_renders_all_sections() {
        let service = Router::new().route(
            "/api/documentation",
            get(|| async { Json(json!({ "data": full_documentation() })) }),
        );
        let url = spawn_service(service).await;
        let app = create_api_routes(Arc::new(AppState::with_service_url(url)));

        let (status, value) = send(&app, "GET", "/api/documentation", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["state"], "rendered");
        assert_eq!(value["title"], "Project Documentation");
        let sections = value["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 15);
        assert!(sections.iter().all(|s| s["body"]["type"] == "content"));
    }

    #[tokio::test]
    async fn test_documentation_page_unreachable_service_is_502() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let app = create_api_routes(Arc::new(AppState::with_service_url(url)));

        let (status, value) = send(&app, "GET", "/api/documentation", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(value["error"], "Error connecting to the server.");
    }

    #[tokio::test]
    async fn test_render_preview() {
        let app = create_api_routes(Arc::new(AppState::new()));
        let body = json!({
            "documentation": { "FAQ": { "CommonQuestions": ["Why?"] } },
            "repositoryLink": "https://github.com/rust-lang/cargo"
        });

        let (status, value) = send(&app, "POST", "/api/render", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["sections"].as_array().unwrap().len(), 15);

        let (status, _) = send(&app, "POST", "/api/render", Some(json!({ "documentation": [] }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, text) = send_text(&app, "GET", "/api/documentation?format=xml").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!text.is_empty());
    }
}

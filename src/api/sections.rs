//! 章节目录端点

use axum::{routing::get, Json, Router};
use std::sync::Arc;

use crate::services::documentation::{catalog, CatalogEntry};
use crate::state::AppState;

/// 返回完整的章节目录（固定顺序）
async fn list_sections() -> Json<Vec<CatalogEntry>> {
    Json(catalog())
}

/// 创建章节目录路由
pub fn sections_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/sections", get(list_sections))
}

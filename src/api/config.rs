//! 配置管理端点

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::{get_config, reload_config, update_config, AppConfig};
use crate::error::{AppError, AppResult};
use crate::services::documentation::EmptySelectionPolicy;
use crate::state::AppState;

/// 配置更新请求
#[derive(Debug, Default, Deserialize)]
pub struct ConfigUpdateRequest {
    pub service_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub listen_addr: Option<String>,
    pub empty_selection: Option<EmptySelectionPolicy>,
}

impl ConfigUpdateRequest {
    /// 写入前校验，任一字段无效则整体拒绝
    fn validate(&self) -> AppResult<()> {
        if let Some(url) = &self.service_base_url {
            if url.trim().is_empty() {
                return Err(AppError::BadRequest(
                    "service_base_url must not be empty".to_string(),
                ));
            }
        }
        if self.request_timeout_secs == Some(0) || self.connect_timeout_secs == Some(0) {
            return Err(AppError::BadRequest(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        if let Some(addr) = &self.listen_addr {
            addr.parse::<SocketAddr>().map_err(|e| {
                AppError::BadRequest(format!("invalid listen_addr {}: {}", addr, e))
            })?;
        }
        Ok(())
    }

    fn apply(self, config: &mut AppConfig) {
        if let Some(url) = self.service_base_url {
            config.service_base_url = url.trim().to_string();
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout_secs = secs;
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout_secs = secs;
        }
        if let Some(addr) = self.listen_addr {
            config.listen_addr = addr;
        }
        if let Some(policy) = self.empty_selection {
            config.empty_selection = policy;
        }
    }
}

/// 获取当前配置
async fn get_config_handler() -> Json<AppConfig> {
    Json(get_config())
}

/// 更新配置（listen_addr 在重启后生效）
async fn update_config_handler(
    Json(req): Json<ConfigUpdateRequest>,
) -> AppResult<Json<AppConfig>> {
    req.validate()?;
    let config = update_config(|config| req.apply(config))?;
    info!(
        "Config updated: service_base_url={}, empty_selection={:?}",
        config.service_base_url, config.empty_selection
    );
    Ok(Json(config))
}

/// 从磁盘重新加载配置
async fn reload_config_handler() -> Json<AppConfig> {
    reload_config();
    let config = get_config();
    info!("Config reloaded: service_base_url={}", config.service_base_url);
    Json(config)
}

/// 创建配置路由
pub fn config_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/config", get(get_config_handler).put(update_config_handler))
        .route("/api/config/reload", post(reload_config_handler))
}

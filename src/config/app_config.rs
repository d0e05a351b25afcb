//! 应用配置管理
//!
//! 提供配置的加载、保存、更新功能，使用全局单例模式管理配置状态。

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::AppError;
use crate::services::documentation::EmptySelectionPolicy;

/// 获取配置文件路径
fn get_config_path() -> PathBuf {
    // 配置文件位于可执行文件同级目录
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.json")
}

/// 应用配置结构体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 文档生成服务基础 URL
    #[serde(default = "default_service_base_url")]
    pub service_base_url: String,

    /// 单次请求超时（秒），生成可能较慢
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// 连接超时（秒）
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// 监听地址
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// 空选择的语义
    #[serde(default)]
    pub empty_selection: EmptySelectionPolicy,
}

fn default_service_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_listen_addr() -> String {
    "127.0.0.1:8765".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_base_url: default_service_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            listen_addr: default_listen_addr(),
            empty_selection: EmptySelectionPolicy::default(),
        }
    }
}

/// 全局配置单例
static CONFIG: Lazy<RwLock<AppConfig>> = Lazy::new(|| {
    RwLock::new(load_config_from_file(&get_config_path()).unwrap_or_default())
});

/// 从文件加载配置
fn load_config_from_file(path: &Path) -> Option<AppConfig> {
    if !path.exists() {
        return None;
    }
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring invalid config file {}: {}", path.display(), e);
            None
        }
    }
}

/// 保存配置到文件
fn save_config_to_file(path: &Path, config: &AppConfig) -> Result<(), AppError> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| AppError::Config(format!("序列化配置失败: {}", e)))?;
    fs::write(path, content)
        .map_err(|e| AppError::Config(format!("写入配置文件失败: {}", e)))?;
    Ok(())
}

/// 获取当前配置（克隆）
pub fn get_config() -> AppConfig {
    CONFIG.read().clone()
}

/// 更新配置
///
/// 接收一个闭包来修改配置，修改后自动保存到文件
pub fn update_config<F>(updater: F) -> Result<AppConfig, AppError>
where
    F: FnOnce(&mut AppConfig),
{
    let mut config = CONFIG.write();
    let mut updated = config.clone();
    updater(&mut updated);
    save_config_to_file(&get_config_path(), &updated)?;
    *config = updated.clone();
    Ok(updated)
}

/// 重新从文件加载配置
pub fn reload_config() {
    if let Some(config) = load_config_from_file(&get_config_path()) {
        *CONFIG.write() = config;
    }
}

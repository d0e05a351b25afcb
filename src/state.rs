//! 应用状态管理
//!
//! 定义在请求处理器之间共享的状态。

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::AbortHandle;
use tracing::{debug, info};

use crate::config::get_config;
use crate::services::documentation::{
    ClientError, EmptySelectionPolicy, FormError, FormState, GenerationRequest, RenderTree,
    SubmissionClient, SubmissionResult,
};

/// 表单快照，用于 REST 响应和 WebSocket 推送
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub id: String,
    pub form: FormState,
    /// 当前渲染树（未提交时为空）
    pub view: Option<RenderTree>,
    /// 表单旁展示的提示
    pub message: Option<String>,
}

/// 单个表单实例的会话
///
/// 状态变化通过广播通道推送；会话关闭后到达的结果被丢弃。
pub struct FormSession {
    pub id: String,
    state: Mutex<FormState>,
    closed: AtomicBool,
    pending: Mutex<Option<AbortHandle>>,
    tx: broadcast::Sender<FormSnapshot>,
}

impl FormSession {
    pub fn new(id: impl Into<String>, state: FormState) -> Self {
        let (tx, _) = broadcast::channel(32);
        Self {
            id: id.into(),
            state: Mutex::new(state),
            closed: AtomicBool::new(false),
            pending: Mutex::new(None),
            tx,
        }
    }

    /// 当前快照
    pub fn snapshot(&self) -> FormSnapshot {
        let form = self.state.lock().clone();
        FormSnapshot {
            id: self.id.clone(),
            view: form.render(),
            message: form.message(),
            form,
        }
    }

    /// 订阅状态变化
    pub fn subscribe(&self) -> broadcast::Receiver<FormSnapshot> {
        self.tx.subscribe()
    }

    /// 修改表单状态并推送快照；会话关闭后不再推送
    pub fn update<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> R {
        let result = f(&mut self.state.lock());
        self.publish();
        result
    }

    /// 开始提交（同一时间只允许一个）
    pub fn begin_submission(
        &self,
        policy: EmptySelectionPolicy,
    ) -> Result<(u64, GenerationRequest), FormError> {
        let outcome = self.state.lock().begin_submission(policy);
        self.publish();
        outcome
    }

    /// 记录进行中的提交任务，关闭会话时中止
    pub fn set_pending(&self, handle: AbortHandle) {
        if self.is_closed() {
            handle.abort();
            return;
        }
        *self.pending.lock() = Some(handle);
    }

    /// 写入提交结果；会话已关闭或票据过期时丢弃
    pub fn complete(&self, ticket: u64, result: SubmissionResult) -> bool {
        let mut form = self.state.lock();
        // `closed` 只在持有状态锁时写入，这里的检查与 close() 互斥
        if self.is_closed() {
            debug!("Form {} closed, discarding submission result", self.id);
            return false;
        }

        info!(
            "Form {} submission finished: success={}",
            self.id,
            result.is_success()
        );
        let applied = form.complete(ticket, result);
        drop(form);
        if applied {
            self.pending.lock().take();
            self.publish();
        } else {
            debug!("Form {} ignored stale submission result (ticket {})", self.id, ticket);
        }
        applied
    }

    /// 关闭会话：中止进行中的提交，之后不再修改状态
    pub fn close(&self) {
        {
            let _form = self.state.lock();
            self.closed.store(true, Ordering::SeqCst);
        }
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
            info!("Form {} closed with a pending submission, aborted", self.id);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn publish(&self) {
        if self.is_closed() {
            return;
        }
        // 没有订阅者时 send 返回错误，忽略即可
        let _ = self.tx.send(self.snapshot());
    }
}

/// 表单会话注册表
pub type FormRegistry = DashMap<String, Arc<FormSession>>;

/// 应用共享状态
///
/// 使用 Arc 包裹以便在多个处理器之间安全共享
#[derive(Clone)]
pub struct AppState {
    /// 表单会话注册表
    pub forms: Arc<FormRegistry>,
    /// 覆盖配置中的生成服务地址
    service_base_url: Option<String>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new() -> Self {
        Self {
            forms: Arc::new(DashMap::new()),
            service_base_url: None,
        }
    }

    /// 使用指定的生成服务地址
    #[cfg(test)]
    pub fn with_service_url(url: impl Into<String>) -> Self {
        Self {
            forms: Arc::new(DashMap::new()),
            service_base_url: Some(url.into()),
        }
    }

    /// 按当前配置创建生成服务客户端
    pub fn submission_client(&self) -> Result<SubmissionClient, ClientError> {
        let mut config = get_config();
        if let Some(url) = &self.service_base_url {
            config.service_base_url = url.clone();
        }
        SubmissionClient::from_config(&config)
    }

    /// 当前空选择策略
    pub fn empty_selection_policy(&self) -> EmptySelectionPolicy {
        get_config().empty_selection
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// 创建可共享的应用状态
pub fn create_shared_state() -> Arc<AppState> {
    Arc::new(AppState::new())
}

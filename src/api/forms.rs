//! 表单会话端点
//!
//! 提供表单创建、编辑、提交的 REST API 和状态推送的 WebSocket 接口

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{
    ActionResponse, CreateFormRequest, SetLinkRequest, SetSectionsRequest, SubmitRequest,
    ToggleSectionRequest, ToggleSectionResponse, ViewFormat, ViewQuery, WsInbound, WsOutbound,
};
use crate::services::documentation::{to_markdown, FormState};
use crate::state::{AppState, FormSession, FormSnapshot};

use super::markdown_response;

/// 创建表单路由
pub fn forms_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/forms", post(create_form))
        .route("/api/forms/:id", get(get_form).delete(delete_form))
        .route("/api/forms/:id/link", put(set_link))
        .route("/api/forms/:id/sections/toggle", post(toggle_section))
        .route("/api/forms/:id/sections", put(set_sections))
        .route("/api/forms/:id/submit", post(submit_form))
        .route("/ws/forms/:id", get(ws_handler))
}

fn find_session(state: &AppState, id: &str) -> AppResult<Arc<FormSession>> {
    state
        .forms
        .get(id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound(format!("Form not found: {}", id)))
}

/// 创建表单会话
async fn create_form(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CreateFormRequest>>,
) -> AppResult<(StatusCode, Json<FormSnapshot>)> {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let mut form = FormState::new();
    if let Some(link) = req.repository_link {
        form.set_link(link);
    }
    if let Some(sections) = req.selected_sections {
        form.set_sections(sections)?;
    }

    let id = uuid::Uuid::new_v4().to_string();
    let session = Arc::new(FormSession::new(id.clone(), form));
    state.forms.insert(id.clone(), session.clone());
    info!("Form created: id={}", id);

    Ok((StatusCode::CREATED, Json(session.snapshot())))
}

/// 获取表单状态和渲染树
async fn get_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ViewQuery>,
) -> AppResult<Response> {
    let snapshot = find_session(&state, &id)?.snapshot();

    Ok(match query.format {
        ViewFormat::Json => Json(snapshot).into_response(),
        ViewFormat::Markdown => {
            let text = match (&snapshot.view, &snapshot.message) {
                (Some(view), _) => to_markdown(view),
                (None, Some(message)) => format!("{}\n", message),
                (None, None) => String::new(),
            };
            markdown_response(text)
        }
    })
}

/// 设置仓库链接
async fn set_link(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SetLinkRequest>,
) -> AppResult<Json<FormSnapshot>> {
    let session = find_session(&state, &id)?;
    session.update(|form| form.set_link(req.repository_link));
    Ok(Json(session.snapshot()))
}

/// 切换单个章节
async fn toggle_section(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ToggleSectionRequest>,
) -> AppResult<Json<ToggleSectionResponse>> {
    let session = find_session(&state, &id)?;
    let (selected, selected_sections) = session.update(|form| {
        form.toggle_section(&req.section)
            .map(|selected| (selected, form.selected_sections.titles()))
    })?;

    Ok(Json(ToggleSectionResponse {
        section: req.section,
        selected,
        selected_sections,
    }))
}

/// 替换整个章节选择
async fn set_sections(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SetSectionsRequest>,
) -> AppResult<Json<FormSnapshot>> {
    let session = find_session(&state, &id)?;
    session.update(|form| form.set_sections(req.sections))?;
    Ok(Json(session.snapshot()))
}

/// 校验并开始提交
///
/// 返回 202 和 `Loading` 状态；结果通过 `GET /api/forms/:id` 或 WebSocket 获取。
async fn submit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<SubmitRequest>>,
) -> AppResult<(StatusCode, Json<FormSnapshot>)> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let session = find_session(&state, &id)?;
    let client = state.submission_client()?;

    let (ticket, request) = session.begin_submission(state.empty_selection_policy())?;
    info!(
        "Form {} submitted: link={}, service={}, link_only={}",
        id,
        request.repository_link(),
        client.base_url(),
        req.link_only
    );

    let task_session = session.clone();
    let handle = tokio::spawn(async move {
        let result = if req.link_only {
            client.submit_link_only(&request).await
        } else {
            client.submit(&request).await
        };
        task_session.complete(ticket, result);
    });
    session.set_pending(handle.abort_handle());

    Ok((StatusCode::ACCEPTED, Json(session.snapshot())))
}

/// 关闭表单会话，进行中的提交被中止
async fn delete_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<ActionResponse>> {
    let (_, session) = state
        .forms
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(format!("Form not found: {}", id)))?;
    session.close();
    info!("Form closed: id={}", id);

    Ok(Json(ActionResponse::ok("Form closed")))
}

/// WebSocket 状态推送处理器
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state, id))
}

/// 处理 WebSocket 连接
async fn handle_ws_connection(socket: WebSocket, state: Arc<AppState>, id: String) {
    let (mut sender, mut receiver) = socket.split();

    // 先订阅再取快照，避免漏掉中间的更新；之后不再持有会话，会话关闭时通道随之关闭
    let (mut rx, snapshot) = match find_session(&state, &id) {
        Ok(session) => (session.subscribe(), session.snapshot()),
        Err(_) => {
            let msg = WsOutbound::error(format!("Form not found: {}", id)).to_json();
            let _ = sender.send(Message::Text(msg)).await;
            return;
        }
    };

    info!("WebSocket connection established: form_id={}", id);

    if sender
        .send(Message::Text(WsOutbound::form_state(snapshot).to_json()))
        .await
        .is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(snapshot) => {
                        let msg = WsOutbound::form_state(snapshot).to_json();
                        if sender.send(Message::Text(msg)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("WebSocket for form {} lagged, skipped {} snapshots", id, skipped);
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            }

            result = receiver.next() => {
                match result {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<WsInbound>(&text) {
                            Ok(WsInbound::Ping) => {
                                if sender.send(Message::Text(WsOutbound::Pong.to_json())).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => warn!("Failed to parse WebSocket message: {}", e),
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sender.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("WebSocket connection closed: form_id={}", id);
}

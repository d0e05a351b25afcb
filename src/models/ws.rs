//! WebSocket 消息类型定义
//!
//! 表单状态推送协议

use serde::{Deserialize, Serialize};

use crate::state::FormSnapshot;

/// 入站 WebSocket 消息
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsInbound {
    /// 心跳
    Ping,
}

/// 出站 WebSocket 消息
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsOutbound {
    /// 心跳响应
    Pong,
    /// 表单状态快照
    #[serde(rename = "form_state")]
    FormState { snapshot: Box<FormSnapshot> },
    /// 错误
    Error { message: String },
}

impl WsOutbound {
    /// 创建状态快照消息
    pub fn form_state(snapshot: FormSnapshot) -> Self {
        Self::FormState {
            snapshot: Box::new(snapshot),
        }
    }

    /// 创建错误消息
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// 序列化为 JSON 字符串
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::documentation::FormState;

    #[test]
    fn test_inbound_ping() {
        let msg: WsInbound = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(msg, WsInbound::Ping));
    }

    #[test]
    fn test_outbound_shapes() {
        assert_eq!(WsOutbound::Pong.to_json(), r#"{"type":"pong"}"#);

        let snapshot = FormSnapshot {
            id: "f1".to_string(),
            form: FormState::new(),
            view: None,
            message: None,
        };
        let value: serde_json::Value =
            serde_json::from_str(&WsOutbound::form_state(snapshot).to_json()).unwrap();
        assert_eq!(value["type"], "form_state");
        assert_eq!(value["snapshot"]["id"], "f1");
        assert_eq!(value["snapshot"]["form"]["phase"]["status"], "idle");
    }
}

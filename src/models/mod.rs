//! 数据模型模块

mod api;
mod ws;

pub use api::{
    ActionResponse, CreateFormRequest, RenderRequest, SetLinkRequest, SetSectionsRequest,
    SubmitRequest, ToggleSectionRequest, ToggleSectionResponse, ViewFormat, ViewQuery,
};
pub use ws::{WsInbound, WsOutbound};

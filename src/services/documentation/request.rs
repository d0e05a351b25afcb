//! 生成请求构建
//!
//! 在提交前校验用户输入，输出不可变的 [`GenerationRequest`]。

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::catalog::SectionId;

/// 提交前校验错误（从不发送到网络）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// 仓库链接为空
    #[error("Please enter a repository link.")]
    EmptyLink,

    /// 章节不在目录中
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// 策略禁止空选择
    #[error("Select at least one section.")]
    NoSectionsSelected,
}

/// 空选择的语义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionPolicy {
    /// 空选择表示请求全部章节，发送时显式展开为完整目录
    #[default]
    All,
    /// 空选择无效，提交时拒绝
    Reject,
}

/// 生成请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    repository_link: String,
    selected_sections: Vec<SectionId>,
}

/// 发往生成服务的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPayload {
    pub github_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_sections: Option<Vec<&'static str>>,
}

/// 构建生成请求
///
/// 链接去除首尾空白后不能为空；章节去重并按目录顺序排列。
/// 不校验 URL 格式，由服务端负责。
pub fn build<I, S>(repository_link: &str, selected_sections: I) -> Result<GenerationRequest, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let link = repository_link.trim();
    if link.is_empty() {
        return Err(ValidationError::EmptyLink);
    }

    let mut sections = BTreeSet::new();
    for name in selected_sections {
        let name = name.as_ref();
        let id = SectionId::from_name(name)
            .ok_or_else(|| ValidationError::UnknownSection(name.to_string()))?;
        sections.insert(id);
    }

    Ok(GenerationRequest {
        repository_link: link.to_string(),
        selected_sections: sections.into_iter().collect(),
    })
}

impl GenerationRequest {
    pub fn repository_link(&self) -> &str {
        &self.repository_link
    }

    pub fn selected_sections(&self) -> &[SectionId] {
        &self.selected_sections
    }

    /// 按空选择策略检查请求是否可提交
    pub fn check_policy(&self, policy: EmptySelectionPolicy) -> Result<(), ValidationError> {
        if self.selected_sections.is_empty() && policy == EmptySelectionPolicy::Reject {
            return Err(ValidationError::NoSectionsSelected);
        }
        Ok(())
    }

    /// 完整请求体；空选择显式展开为完整目录
    pub fn payload(&self) -> GenerationPayload {
        let sections: &[SectionId] = if self.selected_sections.is_empty() {
            &SectionId::ALL
        } else {
            &self.selected_sections
        };

        GenerationPayload {
            github_link: self.repository_link.clone(),
            selected_sections: Some(sections.iter().map(|id| id.title()).collect()),
        }
    }

    /// 旧版请求体 `{ githubLink }`
    pub fn to_link_only_payload(&self) -> GenerationPayload {
        GenerationPayload {
            github_link: self.repository_link.clone(),
            selected_sections: None,
        }
    }
}

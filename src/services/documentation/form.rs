//! 表单状态
//!
//! 单个表单实例的全部本地状态：仓库链接、章节选择和最近一次提交的阶段。
//! 同一表单同时最多只有一个提交在进行中。

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::catalog::SectionId;
use super::render::{render_for_link, RenderTree};
use super::request::{build, EmptySelectionPolicy, GenerationRequest, ValidationError};
use super::selection::SelectionSet;
use super::types::SubmissionResult;

/// 表单操作错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    /// 已有提交在进行中
    #[error("A submission is already in progress.")]
    SubmissionPending,

    /// 输入校验失败
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// 提交阶段
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FormPhase {
    /// 尚未提交
    Idle,
    /// 提交前校验失败
    Invalid { message: String },
    /// 等待生成服务响应
    Loading {
        submitted_link: String,
        started_at: DateTime<Utc>,
    },
    /// 已得到结果（成功或失败）
    Completed {
        submitted_link: String,
        result: SubmissionResult,
        completed_at: DateTime<Utc>,
    },
}

/// 表单状态
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub repository_link: String,
    pub selected_sections: SelectionSet,
    pub phase: FormPhase,
    #[serde(skip)]
    ticket: u64,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            repository_link: String::new(),
            selected_sections: SelectionSet::new(),
            phase: FormPhase::Idle,
            ticket: 0,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_link(&mut self, link: impl Into<String>) {
        self.repository_link = link.into();
    }

    /// 切换章节，返回切换后是否选中
    pub fn toggle_section(&mut self, name: &str) -> Result<bool, ValidationError> {
        let id = lookup(name)?;
        Ok(self.selected_sections.toggle(id))
    }

    /// 替换整个选择集；任一名称无效时保持原选择不变
    pub fn set_sections<I, S>(&mut self, names: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = SelectionSet::new();
        for name in names {
            selection.insert(lookup(name.as_ref())?);
        }
        self.selected_sections = selection;
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, FormPhase::Loading { .. })
    }

    /// 开始一次提交
    ///
    /// 进行中时拒绝；校验失败时进入 `Invalid` 阶段且不发起网络请求。
    /// 成功时进入 `Loading`，返回本次提交的票据和请求。
    pub fn begin_submission(
        &mut self,
        policy: EmptySelectionPolicy,
    ) -> Result<(u64, GenerationRequest), FormError> {
        if self.is_loading() {
            return Err(FormError::SubmissionPending);
        }

        let request = build(&self.repository_link, self.selected_sections.titles())
            .and_then(|request| request.check_policy(policy).map(|_| request));

        let request = match request {
            Ok(request) => request,
            Err(e) => {
                self.phase = FormPhase::Invalid {
                    message: e.to_string(),
                };
                return Err(e.into());
            }
        };

        self.ticket += 1;
        self.phase = FormPhase::Loading {
            submitted_link: request.repository_link().to_string(),
            started_at: Utc::now(),
        };
        Ok((self.ticket, request))
    }

    /// 写入提交结果
    ///
    /// 票据过期或当前不在 `Loading` 阶段时丢弃结果，返回 false。
    pub fn complete(&mut self, ticket: u64, result: SubmissionResult) -> bool {
        let submitted_link = match &self.phase {
            FormPhase::Loading { submitted_link, .. } if ticket == self.ticket => {
                submitted_link.clone()
            }
            _ => return false,
        };

        self.phase = FormPhase::Completed {
            submitted_link,
            result,
            completed_at: Utc::now(),
        };
        true
    }

    /// 当前渲染树；未提交或校验失败时没有渲染内容
    pub fn render(&self) -> Option<RenderTree> {
        match &self.phase {
            FormPhase::Idle | FormPhase::Invalid { .. } => None,
            FormPhase::Loading { .. } => Some(RenderTree::Loading),
            FormPhase::Completed {
                submitted_link,
                result,
                ..
            } => Some(render_for_link(result, Some(submitted_link))),
        }
    }

    /// 表单旁展示的提示信息
    pub fn message(&self) -> Option<String> {
        match &self.phase {
            FormPhase::Invalid { message } => Some(message.clone()),
            FormPhase::Completed { result, .. } => result.user_message().map(str::to_string),
            _ => None,
        }
    }
}

fn lookup(name: &str) -> Result<SectionId, ValidationError> {
    SectionId::from_name(name).ok_or_else(|| ValidationError::UnknownSection(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::documentation::model::DocumentationModel;
    use crate::services::documentation::types::GENERIC_TRANSPORT_ERROR;

    const LINK: &str = "https://github.com/spring-projects/spring-petclinic";

    fn ready_form() -> FormState {
        let mut form = FormState::new();
        form.set_link(LINK);
        form.toggle_section("FAQ").unwrap();
        form
    }

    #[test]
    fn test_toggle_is_idempotent_in_pairs() {
        let mut form = FormState::new();
        assert_eq!(form.toggle_section("Getting Started"), Ok(true));
        assert_eq!(form.toggle_section("Getting Started"), Ok(false));
        assert!(form.selected_sections.titles().is_empty());
        assert_eq!(
            form.toggle_section("NotARealSection"),
            Err(ValidationError::UnknownSection("NotARealSection".to_string()))
        );
    }

    #[test]
    fn test_set_sections_is_atomic() {
        let mut form = ready_form();
        assert!(form.set_sections(["Appendix", "Bogus"]).is_err());
        assert_eq!(form.selected_sections.titles(), vec!["FAQ"]);

        form.set_sections(["Appendix", "Conclusion"]).unwrap();
        assert_eq!(form.selected_sections.titles(), vec!["Appendix", "Conclusion"]);
    }

    #[test]
    fn test_empty_link_is_invalid() {
        let mut form = FormState::new();
        let err = form.begin_submission(EmptySelectionPolicy::All).unwrap_err();

        assert_eq!(err, FormError::Validation(ValidationError::EmptyLink));
        assert!(matches!(form.phase, FormPhase::Invalid { .. }));
        assert_eq!(form.render(), None);
        assert_eq!(form.message().as_deref(), Some("Please enter a repository link."));
    }

    #[test]
    fn test_reject_policy() {
        let mut form = FormState::new();
        form.set_link(LINK);
        assert_eq!(
            form.begin_submission(EmptySelectionPolicy::Reject).unwrap_err(),
            FormError::Validation(ValidationError::NoSectionsSelected)
        );
        assert!(form.begin_submission(EmptySelectionPolicy::All).is_ok());
    }

    #[test]
    fn test_single_submission_in_flight() {
        let mut form = ready_form();
        let (ticket, request) = form.begin_submission(EmptySelectionPolicy::All).unwrap();
        assert_eq!(request.selected_sections(), &[SectionId::Faq]);
        assert_eq!(form.render(), Some(RenderTree::Loading));

        assert_eq!(
            form.begin_submission(EmptySelectionPolicy::All).unwrap_err(),
            FormError::SubmissionPending
        );

        assert!(form.complete(ticket, SubmissionResult::Success(DocumentationModel::default())));
        assert!(!form.is_loading());
        assert_eq!(form.render().unwrap().placeholder_count(), 15);
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut form = ready_form();
        let (first, _) = form.begin_submission(EmptySelectionPolicy::All).unwrap();
        assert!(form.complete(first, SubmissionResult::ServiceError("boom".to_string())));

        let (second, _) = form.begin_submission(EmptySelectionPolicy::All).unwrap();
        assert!(!form.complete(first, SubmissionResult::ServiceError("late".to_string())));
        assert!(form.is_loading());
        assert!(form.complete(second, SubmissionResult::TransportError("refused".to_string())));
        assert_eq!(form.message().as_deref(), Some(GENERIC_TRANSPORT_ERROR));
    }

    #[test]
    fn test_resubmit_after_failure() {
        let mut form = ready_form();
        let (ticket, _) = form.begin_submission(EmptySelectionPolicy::All).unwrap();
        form.complete(ticket, SubmissionResult::ServiceError("repo not found".to_string()));
        assert_eq!(
            form.render(),
            Some(RenderTree::Failed {
                message: "repo not found".to_string()
            })
        );

        form.set_link("https://github.com/rust-lang/cargo");
        assert!(form.begin_submission(EmptySelectionPolicy::All).is_ok());
    }

    #[test]
    fn test_serializes_as_camel_case() {
        let value = serde_json::to_value(ready_form()).unwrap();
        assert_eq!(value["repositoryLink"], LINK);
        assert_eq!(value["selectedSections"], serde_json::json!(["FAQ"]));
        assert_eq!(value["phase"]["status"], "idle");
        assert!(value.get("ticket").is_none());
    }
}

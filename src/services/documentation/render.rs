//! 文档渲染
//!
//! 将提交结果映射为渲染树。`Rendered` 始终包含全部 15 个章节，
//! 缺失的章节渲染为占位内容而不是省略标题，保证版面稳定。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::catalog::SectionId;
use super::model::*;
use super::types::SubmissionResult;

/// 缺失章节的占位文本
pub const PLACEHOLDER_TEXT: &str = "This section is not available.";

/// 章节存在但没有任何内容时的提示
const EMPTY_SECTION_TEXT: &str = "No details provided.";

const DEFAULT_TITLE: &str = "Project Documentation";

static REPO_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?(?:github|gitlab|bitbucket)\.(?:com|org)/([^/\s]+)/([^/\s?#]+?)(?:\.git)?/?(?:[?#].*)?$")
        .expect("valid repository link regex")
});

/// 渲染树
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RenderTree {
    /// 等待生成服务响应
    Loading,
    /// 渲染成功
    Rendered {
        title: String,
        sections: Vec<SectionView>,
    },
    /// 提交失败，展示错误信息
    Failed { message: String },
}

/// 单个章节的视图
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub id: SectionId,
    pub key: &'static str,
    pub heading: String,
    pub body: SectionBody,
}

/// 章节内容
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionBody {
    Placeholder { message: String },
    Content { blocks: Vec<Block> },
}

/// 内容块
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Paragraph { text: String },
    List { items: Vec<String> },
    Definitions { items: Vec<Definition> },
    Table { headers: Vec<String>, rows: Vec<Vec<String>> },
    Tree { nodes: Vec<TreeNode> },
    Code { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Definition {
    pub term: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub folder: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl RenderTree {
    /// 章节标题数量
    pub fn header_count(&self) -> usize {
        match self {
            RenderTree::Rendered { sections, .. } => sections.len(),
            _ => 0,
        }
    }

    /// 占位章节数量
    pub fn placeholder_count(&self) -> usize {
        match self {
            RenderTree::Rendered { sections, .. } => sections
                .iter()
                .filter(|s| matches!(s.body, SectionBody::Placeholder { .. }))
                .count(),
            _ => 0,
        }
    }
}

/// 渲染提交结果
pub fn render(result: &SubmissionResult) -> RenderTree {
    render_for_link(result, None)
}

/// 渲染提交结果，标题中带上仓库名
pub fn render_for_link(result: &SubmissionResult, repository_link: Option<&str>) -> RenderTree {
    match result {
        SubmissionResult::Success(model) => render_documentation(model, repository_link),
        SubmissionResult::ServiceError(_) | SubmissionResult::TransportError(_) => {
            RenderTree::Failed {
                message: result.user_message().unwrap_or_default().to_string(),
            }
        }
    }
}

/// 渲染文档模型（15 个章节，按目录顺序）
pub fn render_documentation(model: &DocumentationModel, repository_link: Option<&str>) -> RenderTree {
    let sections = SectionId::ALL
        .iter()
        .map(|&id| SectionView {
            id,
            key: id.key(),
            heading: format!("{}. {}", id.position(), id.title()),
            body: match render_section(model, id) {
                None => SectionBody::Placeholder {
                    message: PLACEHOLDER_TEXT.to_string(),
                },
                Some(blocks) if blocks.is_empty() => SectionBody::Content {
                    blocks: vec![paragraph(EMPTY_SECTION_TEXT)],
                },
                Some(blocks) => SectionBody::Content { blocks },
            },
        })
        .collect();

    RenderTree::Rendered {
        title: document_title(repository_link),
        sections,
    }
}

/// 从仓库链接推导标题，如 `Documentation for owner/repo`
pub fn document_title(repository_link: Option<&str>) -> String {
    repository_link
        .and_then(|link| REPO_LINK_RE.captures(link.trim()))
        .map(|caps| format!("Documentation for {}/{}", &caps[1], &caps[2]))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

fn render_section(model: &DocumentationModel, id: SectionId) -> Option<Vec<Block>> {
    match id {
        SectionId::Overview => model.overview.as_ref().map(render_overview),
        SectionId::GettingStarted => model.getting_started.as_ref().map(render_getting_started),
        SectionId::CodeStructureOverview => {
            model.code_structure_overview.as_ref().map(render_code_structure)
        }
        SectionId::KeyCodeComponents => {
            model.key_code_components.as_ref().map(render_key_components)
        }
        SectionId::FunctionsAndApiDocumentation => model
            .functions_and_api_documentation
            .as_ref()
            .map(render_functions_and_api),
        SectionId::ErrorHandlingAndLogging => {
            model.error_handling_and_logging.as_ref().map(render_error_handling)
        }
        SectionId::Dependencies => model.dependencies.as_ref().map(render_dependencies),
        SectionId::Configuration => model.configuration.as_ref().map(render_configuration),
        SectionId::PerformanceConsiderations => {
            model.performance_considerations.as_ref().map(render_performance)
        }
        SectionId::TestingAndQualityAssurance => {
            model.testing_and_quality_assurance.as_ref().map(render_testing)
        }
        SectionId::SecurityConsiderations => {
            model.security_considerations.as_ref().map(render_security)
        }
        SectionId::VersionControlAndChangelog => {
            model.version_control_and_changelog.as_ref().map(render_version_control)
        }
        SectionId::Faq => model.faq.as_ref().map(render_faq),
        SectionId::Appendix => model.appendix.as_ref().map(render_appendix),
        SectionId::Conclusion => model.conclusion.as_ref().map(render_conclusion),
    }
}

// ============================================================================
// 各章节渲染
// ============================================================================

fn render_overview(section: &OverviewSection) -> Vec<Block> {
    let mut blocks = Vec::new();
    push_text(&mut blocks, None, &section.description);
    blocks
}

fn render_getting_started(section: &GettingStartedSection) -> Vec<Block> {
    let mut blocks = Vec::new();
    push_list(&mut blocks, "Prerequisites", &section.prerequisites);
    push_list(&mut blocks, "Setup Instructions", &section.setup_instructions);
    push_list(&mut blocks, "Run Instructions", &section.run_instructions);
    push_list(&mut blocks, "Example Usage", &section.example_usage);
    blocks
}

fn render_code_structure(section: &CodeStructureOverviewSection) -> Vec<Block> {
    let mut blocks = Vec::new();
    if !section.file_organization.is_empty() {
        blocks.push(heading("File Organization"));
        blocks.push(Block::Tree {
            nodes: section.file_organization.iter().map(tree_node).collect(),
        });
    }
    if !section.module_breakdown.is_empty() {
        blocks.push(heading("Module Breakdown"));
        blocks.push(Block::Definitions {
            items: section
                .module_breakdown
                .iter()
                .map(|(module, description)| definition(module, description))
                .collect(),
        });
    }
    blocks
}

fn tree_node(item: &FileOrganizationItem) -> TreeNode {
    TreeNode {
        name: item.name.clone(),
        folder: item.is_folder(),
        children: item.children.iter().map(tree_node).collect(),
    }
}

fn render_key_components(section: &KeyCodeComponentsSection) -> Vec<Block> {
    let mut blocks = Vec::new();

    for class in &section.classes {
        blocks.push(heading(&format!("Class {}", non_empty(&class.class_name, "(unnamed)"))));
        push_text(&mut blocks, None, &class.description);

        for constructor in &class.constructors {
            push_text(&mut blocks, Some("Constructor"), &constructor.description);
            push_parameters(&mut blocks, &constructor.parameters);
        }

        for method in &class.methods {
            let signature = format!(
                "{}({}) -> {}",
                method.method_name,
                method
                    .parameters
                    .iter()
                    .map(|p| format!("{}: {}", p.name, p.kind))
                    .collect::<Vec<_>>()
                    .join(", "),
                non_empty(&method.return_type, "void")
            );
            blocks.push(heading(&format!("Method {}", method.method_name)));
            blocks.push(Block::Code { text: signature });
            push_text(&mut blocks, None, &method.description);
            push_parameters(&mut blocks, &method.parameters);
            if !method.example_usage.is_empty() {
                blocks.push(Block::Code {
                    text: method.example_usage.clone(),
                });
            }
        }
    }

    if !section.data_structures.is_empty() {
        blocks.push(heading("Data Structures"));
        blocks.push(Block::Table {
            headers: strings(&["Name", "Type", "Purpose", "Assumptions"]),
            rows: section
                .data_structures
                .iter()
                .map(|d| {
                    vec![
                        d.name.clone(),
                        d.kind.clone(),
                        d.purpose.clone(),
                        d.assumptions.join("; "),
                    ]
                })
                .collect(),
        });
    }

    blocks
}

fn render_functions_and_api(section: &FunctionsAndApiDocumentationSection) -> Vec<Block> {
    let mut blocks = Vec::new();

    for function in &section.functions {
        blocks.push(heading(&format!("Function {}", function.function_name)));
        if !function.signature.is_empty() {
            blocks.push(Block::Code {
                text: function.signature.clone(),
            });
        }
        push_text(&mut blocks, None, &function.description);
        let details: Vec<Definition> = [
            ("Example input", &function.example_input),
            ("Example output", &function.example_output),
            ("Side effects", &function.side_effects),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(term, value)| definition(term, value))
        .collect();
        if !details.is_empty() {
            blocks.push(Block::Definitions { items: details });
        }
    }

    for endpoint in &section.api_endpoints {
        blocks.push(heading(&format!(
            "{} {}",
            non_empty(&endpoint.method, "ANY").to_uppercase(),
            endpoint.endpoint
        )));
        push_text(&mut blocks, None, &endpoint.description);
        if !endpoint.parameters.is_empty() {
            blocks.push(Block::Table {
                headers: strings(&["Name", "Type", "Required", "Description"]),
                rows: endpoint
                    .parameters
                    .iter()
                    .map(|p| {
                        vec![
                            p.name.clone(),
                            p.kind.clone(),
                            if p.required { "yes" } else { "no" }.to_string(),
                            p.description.clone(),
                        ]
                    })
                    .collect(),
            });
        }
        let response = &endpoint.response;
        let mut details = Vec::new();
        if !response.status_codes.is_empty() {
            details.push(definition("Status codes", &response.status_codes.join(", ")));
        }
        if !response.data_format.is_empty() {
            details.push(definition("Data format", &response.data_format));
        }
        if !details.is_empty() {
            blocks.push(Block::Definitions { items: details });
        }
        if !response.example_response.is_empty() {
            blocks.push(Block::Code {
                text: response.example_response.clone(),
            });
        }
    }

    blocks
}

fn render_error_handling(section: &ErrorHandlingAndLoggingSection) -> Vec<Block> {
    let mut blocks = Vec::new();
    push_text(&mut blocks, Some("Exception Handling"), &section.exception_handling);
    if !section.error_codes.is_empty() {
        blocks.push(heading("Error Codes"));
        blocks.push(Block::Definitions {
            items: section
                .error_codes
                .iter()
                .map(|c| definition(&c.code, &c.description))
                .collect(),
        });
    }
    push_text(&mut blocks, Some("Logging"), &section.logging);
    blocks
}

fn render_dependencies(section: &DependenciesSection) -> Vec<Block> {
    let mut blocks = Vec::new();
    if !section.external_libraries.is_empty() {
        blocks.push(heading("External Libraries"));
        blocks.push(Block::Table {
            headers: strings(&["Library", "Version"]),
            rows: section
                .external_libraries
                .iter()
                .map(|l| vec![l.library.clone(), l.version.clone()])
                .collect(),
        });
    }
    push_list(&mut blocks, "Internal Dependencies", &section.internal_dependencies);
    blocks
}

fn render_configuration(section: &ConfigurationSection) -> Vec<Block> {
    let mut blocks = Vec::new();
    if !section.configuration_files.is_empty() {
        blocks.push(heading("Configuration Files"));
        blocks.push(Block::Definitions {
            items: section
                .configuration_files
                .iter()
                .map(|f| definition(&f.name, &f.description))
                .collect(),
        });
    }
    if !section.environment_variables.is_empty() {
        blocks.push(heading("Environment Variables"));
        blocks.push(Block::Definitions {
            items: section
                .environment_variables
                .iter()
                .map(|v| definition(&v.variable, &v.description))
                .collect(),
        });
    }
    blocks
}

fn render_performance(section: &PerformanceConsiderationsSection) -> Vec<Block> {
    let mut blocks = Vec::new();
    push_list(&mut blocks, "Optimizations", &section.optimizations);
    push_text(&mut blocks, Some("Scalability"), &section.scalability);
    if let Some(benchmarks) = &section.benchmarks {
        push_list(&mut blocks, "Benchmarks", benchmarks);
    }
    blocks
}

fn render_testing(section: &TestingAndQualityAssuranceSection) -> Vec<Block> {
    let mut blocks = Vec::new();
    push_text(&mut blocks, Some("Testing Strategy"), &section.testing_strategy);
    push_text(&mut blocks, Some("Test Coverage"), &section.test_coverage);
    if !section.test_cases.is_empty() {
        blocks.push(heading("Test Cases"));
        blocks.push(Block::Table {
            headers: strings(&["Description", "Input", "Expected Output"]),
            rows: section
                .test_cases
                .iter()
                .map(|t| {
                    vec![
                        t.description.clone(),
                        t.expected_input.clone(),
                        t.expected_output.clone(),
                    ]
                })
                .collect(),
        });
    }
    push_list(&mut blocks, "Tools", &section.tools);
    blocks
}

fn render_security(section: &SecurityConsiderationsSection) -> Vec<Block> {
    let mut blocks = Vec::new();
    push_text(&mut blocks, Some("Sensitive Data Handling"), &section.sensitive_data_handling);
    push_text(&mut blocks, Some("Access Control"), &section.access_control);
    push_list(&mut blocks, "Vulnerabilities", &section.vulnerabilities);
    blocks
}

fn render_version_control(section: &VersionControlAndChangelogSection) -> Vec<Block> {
    let mut blocks = Vec::new();
    push_text(&mut blocks, Some("Git History"), &section.git_history);
    push_list(&mut blocks, "Changelog", &section.changelog);
    blocks
}

fn render_faq(section: &FaqSection) -> Vec<Block> {
    let mut blocks = Vec::new();
    push_list(&mut blocks, "Common Questions", &section.common_questions);
    if !section.troubleshooting.is_empty() {
        blocks.push(heading("Troubleshooting"));
        blocks.push(Block::Definitions {
            items: section
                .troubleshooting
                .iter()
                .map(|t| definition(&t.issue, &t.solution))
                .collect(),
        });
    }
    blocks
}

fn render_appendix(section: &AppendixSection) -> Vec<Block> {
    let mut blocks = Vec::new();
    if !section.glossary.is_empty() {
        blocks.push(heading("Glossary"));
        blocks.push(Block::Definitions {
            items: section
                .glossary
                .iter()
                .map(|g| definition(&g.term, &g.definition))
                .collect(),
        });
    }
    push_list(&mut blocks, "References", &section.references);
    blocks
}

fn render_conclusion(section: &ConclusionSection) -> Vec<Block> {
    let mut blocks = Vec::new();
    push_text(&mut blocks, Some("Summary"), &section.summary);
    push_text(&mut blocks, Some("Next Steps"), &section.next_steps);
    blocks
}

// ============================================================================
// 辅助函数
// ============================================================================

fn heading(text: &str) -> Block {
    Block::Heading {
        text: text.to_string(),
    }
}

fn paragraph(text: &str) -> Block {
    Block::Paragraph {
        text: text.to_string(),
    }
}

fn definition(term: &str, description: &str) -> Definition {
    Definition {
        term: term.to_string(),
        description: description.to_string(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// 非空文本才输出，可带小标题
fn push_text(blocks: &mut Vec<Block>, title: Option<&str>, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    if let Some(title) = title {
        blocks.push(heading(title));
    }
    blocks.push(paragraph(text));
}

/// 非空列表才输出
fn push_list(blocks: &mut Vec<Block>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    blocks.push(heading(title));
    blocks.push(Block::List {
        items: items.to_vec(),
    });
}

fn push_parameters(blocks: &mut Vec<Block>, parameters: &[ParameterDetail]) {
    if parameters.is_empty() {
        return;
    }
    blocks.push(Block::Table {
        headers: strings(&["Parameter", "Type", "Description"]),
        rows: parameters
            .iter()
            .map(|p| vec![p.name.clone(), p.kind.clone(), p.description.clone()])
            .collect(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::documentation::fixtures::{full_documentation, partial_documentation};
    use crate::services::documentation::types::GENERIC_TRANSPORT_ERROR;

    #[test]
    fn test_full_document_has_no_placeholders() {
        let model = DocumentationModel::from_json(full_documentation());
        let tree = render(&SubmissionResult::Success(model));

        assert_eq!(tree.header_count(), 15);
        assert_eq!(tree.placeholder_count(), 0);
    }

    #[test]
    fn test_partial_document_keeps_all_headers() {
        let model = DocumentationModel::from_json(partial_documentation(&[
            SectionId::Overview,
            SectionId::Configuration,
            SectionId::Conclusion,
        ]));
        let tree = render(&SubmissionResult::Success(model));

        assert_eq!(tree.header_count(), 15);
        assert_eq!(tree.placeholder_count(), 12);

        let RenderTree::Rendered { sections, .. } = tree else {
            panic!("expected rendered tree");
        };
        let headings: Vec<&str> = sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings[0], "1. Overview of Code");
        assert_eq!(headings[14], "15. Conclusion");
        assert!(matches!(sections[1].body, SectionBody::Placeholder { .. }));
        assert!(matches!(sections[7].body, SectionBody::Content { .. }));
    }

    #[test]
    fn test_empty_model_is_all_placeholders() {
        let tree = render(&SubmissionResult::Success(DocumentationModel::default()));
        assert_eq!(tree.placeholder_count(), 15);
    }

    #[test]
    fn test_present_but_empty_section() {
        let model = DocumentationModel {
            faq: Some(FaqSection::default()),
            ..Default::default()
        };
        let RenderTree::Rendered { sections, .. } = render_documentation(&model, None) else {
            panic!("expected rendered tree");
        };
        assert_eq!(
            sections[SectionId::Faq as usize].body,
            SectionBody::Content {
                blocks: vec![paragraph(EMPTY_SECTION_TEXT)]
            }
        );
    }

    #[test]
    fn test_failures_render_messages() {
        let tree = render(&SubmissionResult::ServiceError("repo not found".to_string()));
        assert_eq!(
            tree,
            RenderTree::Failed {
                message: "repo not found".to_string()
            }
        );

        let tree = render(&SubmissionResult::TransportError("connection refused".to_string()));
        assert_eq!(
            tree,
            RenderTree::Failed {
                message: GENERIC_TRANSPORT_ERROR.to_string()
            }
        );
    }

    #[test]
    fn test_document_title() {
        assert_eq!(
            document_title(Some("https://github.com/spring-projects/spring-petclinic.git")),
            "Documentation for spring-projects/spring-petclinic"
        );
        assert_eq!(
            document_title(Some("github.com/rust-lang/cargo/")),
            "Documentation for rust-lang/cargo"
        );
        assert_eq!(document_title(Some("not a link")), DEFAULT_TITLE);
        assert_eq!(document_title(None), DEFAULT_TITLE);
    }

    #[test]
    fn test_code_structure_tree() {
        let model = DocumentationModel::from_json(partial_documentation(&[
            SectionId::CodeStructureOverview,
        ]));
        let blocks = render_section(&model, SectionId::CodeStructureOverview).unwrap();
        let Block::Tree { nodes } = &blocks[1] else {
            panic!("expected tree block");
        };
        assert!(nodes[0].folder);
        assert_eq!(nodes[0].children[0].name, "PetClinicApplication.java");
        assert!(!nodes[1].folder);
    }
}

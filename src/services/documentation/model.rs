//! 文档模型定义
//!
//! 完整文档产物的类型化结构：15 个顶层章节，每个章节都是可选的。
//! 生成服务可能只返回部分章节，缺失即是唯一的"无数据"信号。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::catalog::SectionId;

/// 完整文档产物
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentationModel {
    #[serde(rename = "Overview", skip_serializing_if = "Option::is_none")]
    pub overview: Option<OverviewSection>,
    #[serde(rename = "GettingStarted", skip_serializing_if = "Option::is_none")]
    pub getting_started: Option<GettingStartedSection>,
    #[serde(rename = "CodeStructureOverview", skip_serializing_if = "Option::is_none")]
    pub code_structure_overview: Option<CodeStructureOverviewSection>,
    #[serde(rename = "KeyCodeComponents", skip_serializing_if = "Option::is_none")]
    pub key_code_components: Option<KeyCodeComponentsSection>,
    #[serde(rename = "FunctionsAndAPIDocumentation", skip_serializing_if = "Option::is_none")]
    pub functions_and_api_documentation: Option<FunctionsAndApiDocumentationSection>,
    #[serde(rename = "ErrorHandlingAndLogging", skip_serializing_if = "Option::is_none")]
    pub error_handling_and_logging: Option<ErrorHandlingAndLoggingSection>,
    #[serde(rename = "Dependencies", skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependenciesSection>,
    #[serde(rename = "Configuration", skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ConfigurationSection>,
    #[serde(rename = "PerformanceConsiderations", skip_serializing_if = "Option::is_none")]
    pub performance_considerations: Option<PerformanceConsiderationsSection>,
    #[serde(rename = "TestingAndQualityAssurance", skip_serializing_if = "Option::is_none")]
    pub testing_and_quality_assurance: Option<TestingAndQualityAssuranceSection>,
    #[serde(rename = "SecurityConsiderations", skip_serializing_if = "Option::is_none")]
    pub security_considerations: Option<SecurityConsiderationsSection>,
    #[serde(rename = "VersionControlAndChangelog", skip_serializing_if = "Option::is_none")]
    pub version_control_and_changelog: Option<VersionControlAndChangelogSection>,
    #[serde(rename = "FAQ", skip_serializing_if = "Option::is_none")]
    pub faq: Option<FaqSection>,
    #[serde(rename = "Appendix", skip_serializing_if = "Option::is_none")]
    pub appendix: Option<AppendixSection>,
    #[serde(rename = "Conclusion", skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<ConclusionSection>,
}

// ============================================================================
// 章节结构
// ============================================================================

/// 概述
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewSection {
    #[serde(alias = "Description", deserialize_with = "lenient::string")]
    pub description: String,
}

/// 快速开始
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GettingStartedSection {
    // 旧版前端使用了拼错的 `Prequsites`
    #[serde(
        rename = "Prerequisites",
        alias = "prerequisites",
        alias = "Prequsites",
        deserialize_with = "lenient::strings",
    )]
    pub prerequisites: Vec<String>,
    #[serde(
        rename = "SetupInstructions",
        alias = "setupInstructions",
        deserialize_with = "lenient::strings",
    )]
    pub setup_instructions: Vec<String>,
    #[serde(
        rename = "RunInstructions",
        alias = "runInstructions",
        deserialize_with = "lenient::strings",
    )]
    pub run_instructions: Vec<String>,
    #[serde(rename = "ExampleUsage", alias = "exampleUsage", deserialize_with = "lenient::strings")]
    pub example_usage: Vec<String>,
}

/// 代码结构概览
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeStructureOverviewSection {
    #[serde(rename = "FileOrganization", alias = "fileOrganization")]
    pub file_organization: Vec<FileOrganizationItem>,
    #[serde(
        rename = "ModuleBreakdown",
        alias = "moduleBreakdown",
        deserialize_with = "lenient::string_map",
    )]
    pub module_breakdown: BTreeMap<String, String>,
}

/// 文件树节点
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrganizationItem {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    /// `file` 或 `folder`
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileOrganizationItem>,
}

impl FileOrganizationItem {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind.to_ascii_lowercase().as_str(), "folder" | "directory" | "dir")
            || !self.children.is_empty()
    }
}

/// 关键代码组件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyCodeComponentsSection {
    #[serde(rename = "Classes", alias = "classes")]
    pub classes: Vec<ClassDetail>,
    #[serde(rename = "DataStructures", alias = "dataStructures")]
    pub data_structures: Vec<DataStructureDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassDetail {
    #[serde(deserialize_with = "lenient::string")]
    pub class_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    pub constructors: Vec<ConstructorDetail>,
    pub methods: Vec<MethodDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructorDetail {
    pub parameters: Vec<ParameterDetail>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MethodDetail {
    #[serde(deserialize_with = "lenient::string")]
    pub method_name: String,
    pub parameters: Vec<ParameterDetail>,
    #[serde(deserialize_with = "lenient::string")]
    pub return_type: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub example_usage: String,
}

/// 参数描述 `{name, type, description}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterDetail {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataStructureDetail {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::string")]
    pub purpose: String,
    #[serde(deserialize_with = "lenient::strings")]
    pub assumptions: Vec<String>,
}

/// 函数与 API 文档
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionsAndApiDocumentationSection {
    #[serde(rename = "Functions", alias = "functions")]
    pub functions: Vec<FunctionDetail>,
    #[serde(rename = "APIEndpoints", alias = "apiEndpoints")]
    pub api_endpoints: Vec<ApiEndpointDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FunctionDetail {
    #[serde(deserialize_with = "lenient::string")]
    pub function_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub signature: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub example_input: String,
    #[serde(deserialize_with = "lenient::string")]
    pub example_output: String,
    #[serde(deserialize_with = "lenient::string")]
    pub side_effects: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEndpointDetail {
    #[serde(deserialize_with = "lenient::string")]
    pub endpoint: String,
    #[serde(deserialize_with = "lenient::string")]
    pub method: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    pub parameters: Vec<ApiParameter>,
    pub response: ApiResponseDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiParameter {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub required: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiResponseDetail {
    #[serde(deserialize_with = "lenient::strings")]
    pub status_codes: Vec<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub data_format: String,
    #[serde(deserialize_with = "lenient::string")]
    pub example_response: String,
}

/// 错误处理与日志
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorHandlingAndLoggingSection {
    #[serde(
        rename = "ExceptionHandling",
        alias = "exceptionHandling",
        deserialize_with = "lenient::string",
    )]
    pub exception_handling: String,
    #[serde(rename = "ErrorCodes", alias = "errorCodes")]
    pub error_codes: Vec<ErrorCode>,
    #[serde(rename = "Logging", alias = "logging", deserialize_with = "lenient::string")]
    pub logging: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorCode {
    #[serde(deserialize_with = "lenient::string")]
    pub code: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

/// 依赖
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependenciesSection {
    #[serde(rename = "ExternalLibraries", alias = "externalLibraries")]
    pub external_libraries: Vec<ExternalLibrary>,
    #[serde(
        rename = "InternalDependencies",
        alias = "internalDependencies",
        deserialize_with = "lenient::strings",
    )]
    pub internal_dependencies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalLibrary {
    #[serde(deserialize_with = "lenient::string")]
    pub library: String,
    #[serde(deserialize_with = "lenient::string")]
    pub version: String,
}

/// 配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationSection {
    #[serde(rename = "ConfigurationFiles", alias = "configurationFiles")]
    pub configuration_files: Vec<ConfigurationFile>,
    #[serde(rename = "EnvironmentVariables", alias = "environmentVariables")]
    pub environment_variables: Vec<EnvironmentVariable>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationFile {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentVariable {
    #[serde(deserialize_with = "lenient::string")]
    pub variable: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

/// 性能考量
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConsiderationsSection {
    #[serde(
        rename = "Optimizations",
        alias = "optimizations",
        deserialize_with = "lenient::strings",
    )]
    pub optimizations: Vec<String>,
    #[serde(rename = "Scalability", alias = "scalability", deserialize_with = "lenient::string")]
    pub scalability: String,
    #[serde(
        rename = "Benchmarks",
        alias = "benchmarks",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_strings",
    )]
    pub benchmarks: Option<Vec<String>>,
}

/// 测试与质量保证
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestingAndQualityAssuranceSection {
    #[serde(
        rename = "TestingStrategy",
        alias = "testingStrategy",
        deserialize_with = "lenient::string",
    )]
    pub testing_strategy: String,
    #[serde(rename = "TestCoverage", alias = "testCoverage", deserialize_with = "lenient::string")]
    pub test_coverage: String,
    #[serde(rename = "TestCases", alias = "testCases")]
    pub test_cases: Vec<TestCase>,
    #[serde(rename = "Tools", alias = "tools", deserialize_with = "lenient::strings")]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestCase {
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub expected_input: String,
    #[serde(deserialize_with = "lenient::string")]
    pub expected_output: String,
}

/// 安全考量
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConsiderationsSection {
    #[serde(
        rename = "SensitiveDataHandling",
        alias = "sensitiveDataHandling",
        deserialize_with = "lenient::string",
    )]
    pub sensitive_data_handling: String,
    #[serde(
        rename = "AccessControl",
        alias = "accessControl",
        deserialize_with = "lenient::string",
    )]
    pub access_control: String,
    #[serde(
        rename = "Vulnerabilities",
        alias = "vulnerabilities",
        deserialize_with = "lenient::strings",
    )]
    pub vulnerabilities: Vec<String>,
}

/// 版本控制与变更日志
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionControlAndChangelogSection {
    #[serde(rename = "GitHistory", alias = "gitHistory", deserialize_with = "lenient::string")]
    pub git_history: String,
    #[serde(rename = "Changelog", alias = "changelog", deserialize_with = "lenient::strings")]
    pub changelog: Vec<String>,
}

/// 常见问题
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqSection {
    #[serde(
        rename = "CommonQuestions",
        alias = "commonQuestions",
        deserialize_with = "lenient::strings",
    )]
    pub common_questions: Vec<String>,
    #[serde(rename = "Troubleshooting", alias = "troubleshooting")]
    pub troubleshooting: Vec<TroubleshootingTip>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TroubleshootingTip {
    #[serde(deserialize_with = "lenient::string")]
    pub issue: String,
    #[serde(deserialize_with = "lenient::string")]
    pub solution: String,
}

/// 附录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppendixSection {
    #[serde(rename = "Glossary", alias = "glossary")]
    pub glossary: Vec<GlossaryTerm>,
    #[serde(rename = "References", alias = "references", deserialize_with = "lenient::strings")]
    pub references: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossaryTerm {
    #[serde(deserialize_with = "lenient::string")]
    pub term: String,
    #[serde(deserialize_with = "lenient::string")]
    pub definition: String,
}

/// 结论
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConclusionSection {
    #[serde(rename = "Summary", alias = "summary", deserialize_with = "lenient::string")]
    pub summary: String,
    #[serde(rename = "NextSteps", alias = "nextSteps", deserialize_with = "lenient::string")]
    pub next_steps: String,
}

// ============================================================================
// 叶子字段的宽松解码
// ============================================================================

/// 生成服务的输出并不总是严格符合类型：数字状态码、字符串形式的布尔值、
/// 单个字符串代替列表等。叶子字段在这里统一转换，避免整个章节解码失败。
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::collections::BTreeMap;

    /// 标量转为文本；对象和数组保留为紧凑 JSON
    pub fn text(value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Value::deserialize(deserializer).map(text)
    }

    pub fn strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => Vec::new(),
            Value::Array(items) => items
                .into_iter()
                .filter(|item| !item.is_null())
                .map(text)
                .collect(),
            other => vec![text(other)],
        })
    }

    pub fn optional_strings<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<String>>, D::Error> {
        strings(deserializer).map(Some)
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => b,
            Value::String(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "required" | "1"
            ),
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            _ => false,
        })
    }

    pub fn string_map<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Object(map) => map.into_iter().map(|(k, v)| (k, text(v))).collect(),
            _ => BTreeMap::new(),
        })
    }
}

// ============================================================================
// 宽松解析
// ============================================================================

impl DocumentationModel {
    /// 从任意 JSON 值宽松地构建文档模型
    ///
    /// 逐章节解码：未知键被忽略，无法解码的章节视为缺失，
    /// 不会因为单个章节出错而丢弃整个产物。
    pub fn from_json(value: Value) -> Self {
        let mut model = Self::default();

        let map = match value {
            Value::Object(map) => map,
            other => {
                warn!("Documentation payload is not an object: {}", type_name(&other));
                return model;
            }
        };

        for (key, mut raw) in map {
            strip_nulls(&mut raw);
            if raw.is_null() {
                continue;
            }

            let Some(id) = SectionId::from_key(&key) else {
                debug!("Ignoring unknown documentation key: {}", key);
                continue;
            };

            if let Err(e) = model.set_section(id, raw) {
                warn!("Section {} could not be decoded, treating as absent: {}", id.key(), e);
            }
        }

        model
    }

    fn set_section(&mut self, id: SectionId, raw: Value) -> Result<(), serde_json::Error> {
        match id {
            SectionId::Overview => {
                // 旧版服务直接返回概述文本
                let section = match raw {
                    Value::String(description) => OverviewSection { description },
                    other => serde_json::from_value(other)?,
                };
                self.overview = Some(section);
            }
            SectionId::GettingStarted => self.getting_started = Some(serde_json::from_value(raw)?),
            SectionId::CodeStructureOverview => {
                self.code_structure_overview = Some(serde_json::from_value(raw)?)
            }
            SectionId::KeyCodeComponents => {
                self.key_code_components = Some(serde_json::from_value(raw)?)
            }
            SectionId::FunctionsAndApiDocumentation => {
                self.functions_and_api_documentation = Some(serde_json::from_value(raw)?)
            }
            SectionId::ErrorHandlingAndLogging => {
                self.error_handling_and_logging = Some(serde_json::from_value(raw)?)
            }
            SectionId::Dependencies => self.dependencies = Some(serde_json::from_value(raw)?),
            SectionId::Configuration => self.configuration = Some(serde_json::from_value(raw)?),
            SectionId::PerformanceConsiderations => {
                self.performance_considerations = Some(serde_json::from_value(raw)?)
            }
            SectionId::TestingAndQualityAssurance => {
                self.testing_and_quality_assurance = Some(serde_json::from_value(raw)?)
            }
            SectionId::SecurityConsiderations => {
                self.security_considerations = Some(serde_json::from_value(raw)?)
            }
            SectionId::VersionControlAndChangelog => {
                self.version_control_and_changelog = Some(serde_json::from_value(raw)?)
            }
            SectionId::Faq => self.faq = Some(serde_json::from_value(raw)?),
            SectionId::Appendix => self.appendix = Some(serde_json::from_value(raw)?),
            SectionId::Conclusion => self.conclusion = Some(serde_json::from_value(raw)?),
        }
        Ok(())
    }

    /// 指定章节是否存在
    pub fn has_section(&self, id: SectionId) -> bool {
        match id {
            SectionId::Overview => self.overview.is_some(),
            SectionId::GettingStarted => self.getting_started.is_some(),
            SectionId::CodeStructureOverview => self.code_structure_overview.is_some(),
            SectionId::KeyCodeComponents => self.key_code_components.is_some(),
            SectionId::FunctionsAndApiDocumentation => {
                self.functions_and_api_documentation.is_some()
            }
            SectionId::ErrorHandlingAndLogging => self.error_handling_and_logging.is_some(),
            SectionId::Dependencies => self.dependencies.is_some(),
            SectionId::Configuration => self.configuration.is_some(),
            SectionId::PerformanceConsiderations => self.performance_considerations.is_some(),
            SectionId::TestingAndQualityAssurance => {
                self.testing_and_quality_assurance.is_some()
            }
            SectionId::SecurityConsiderations => self.security_considerations.is_some(),
            SectionId::VersionControlAndChangelog => {
                self.version_control_and_changelog.is_some()
            }
            SectionId::Faq => self.faq.is_some(),
            SectionId::Appendix => self.appendix.is_some(),
            SectionId::Conclusion => self.conclusion.is_some(),
        }
    }

    /// 已存在的章节（目录顺序）
    pub fn present_sections(&self) -> Vec<SectionId> {
        SectionId::ALL
            .iter()
            .copied()
            .filter(|&id| self.has_section(id))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present_sections().is_empty()
    }
}

/// 判断 JSON 值是否像一份文档（至少包含一个章节键）
pub fn looks_like_documentation(value: &Value) -> bool {
    value
        .as_object()
        .map(|map| map.keys().any(|k| SectionId::from_key(k).is_some()))
        .unwrap_or(false)
}

/// 递归移除 null 字段和 null 数组元素，使其回退为默认值
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

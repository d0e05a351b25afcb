//! 文档章节目录
//!
//! 固定、有序的 15 个章节标识。选择界面按此顺序枚举复选框，
//! 请求构建器据此校验用户选择。

use serde::{Deserialize, Serialize};

/// 文档章节标识
///
/// 变体顺序即目录顺序，`Ord` 依赖该顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionId {
    Overview,
    GettingStarted,
    CodeStructureOverview,
    KeyCodeComponents,
    FunctionsAndApiDocumentation,
    ErrorHandlingAndLogging,
    Dependencies,
    Configuration,
    PerformanceConsiderations,
    TestingAndQualityAssurance,
    SecurityConsiderations,
    VersionControlAndChangelog,
    Faq,
    Appendix,
    Conclusion,
}

impl SectionId {
    /// 按目录顺序排列的全部章节
    pub const ALL: [SectionId; 15] = [
        SectionId::Overview,
        SectionId::GettingStarted,
        SectionId::CodeStructureOverview,
        SectionId::KeyCodeComponents,
        SectionId::FunctionsAndApiDocumentation,
        SectionId::ErrorHandlingAndLogging,
        SectionId::Dependencies,
        SectionId::Configuration,
        SectionId::PerformanceConsiderations,
        SectionId::TestingAndQualityAssurance,
        SectionId::SecurityConsiderations,
        SectionId::VersionControlAndChangelog,
        SectionId::Faq,
        SectionId::Appendix,
        SectionId::Conclusion,
    ];

    /// 显示名称（也是请求体中 `selectedSections` 使用的值）
    pub fn title(self) -> &'static str {
        match self {
            SectionId::Overview => "Overview of Code",
            SectionId::GettingStarted => "Getting Started",
            SectionId::CodeStructureOverview => "Code Structure Overview",
            SectionId::KeyCodeComponents => "Key Code Components",
            SectionId::FunctionsAndApiDocumentation => "Functions and API Documentation",
            SectionId::ErrorHandlingAndLogging => "Error Handling and Logging",
            SectionId::Dependencies => "Dependencies",
            SectionId::Configuration => "Configuration",
            SectionId::PerformanceConsiderations => "Performance Considerations",
            SectionId::TestingAndQualityAssurance => "Testing and Quality Assurance",
            SectionId::SecurityConsiderations => "Security Considerations",
            SectionId::VersionControlAndChangelog => "Version Control and Changelog",
            SectionId::Faq => "FAQ",
            SectionId::Appendix => "Appendix",
            SectionId::Conclusion => "Conclusion",
        }
    }

    /// 文档模型中的顶层 JSON 键
    pub fn key(self) -> &'static str {
        match self {
            SectionId::Overview => "Overview",
            SectionId::GettingStarted => "GettingStarted",
            SectionId::CodeStructureOverview => "CodeStructureOverview",
            SectionId::KeyCodeComponents => "KeyCodeComponents",
            SectionId::FunctionsAndApiDocumentation => "FunctionsAndAPIDocumentation",
            SectionId::ErrorHandlingAndLogging => "ErrorHandlingAndLogging",
            SectionId::Dependencies => "Dependencies",
            SectionId::Configuration => "Configuration",
            SectionId::PerformanceConsiderations => "PerformanceConsiderations",
            SectionId::TestingAndQualityAssurance => "TestingAndQualityAssurance",
            SectionId::SecurityConsiderations => "SecurityConsiderations",
            SectionId::VersionControlAndChangelog => "VersionControlAndChangelog",
            SectionId::Faq => "FAQ",
            SectionId::Appendix => "Appendix",
            SectionId::Conclusion => "Conclusion",
        }
    }

    /// 目录中的序号（从 1 开始）
    pub fn position(self) -> usize {
        self as usize + 1
    }

    /// 按名称查找章节
    ///
    /// 显示名称精确匹配；模型键不区分大小写匹配。
    pub fn from_name(name: &str) -> Option<SectionId> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.title() == name)
            .or_else(|| Self::from_key(name))
    }

    /// 按模型键查找章节（不区分大小写）
    pub fn from_key(key: &str) -> Option<SectionId> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.key().eq_ignore_ascii_case(key))
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl Serialize for SectionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.title())
    }
}

impl<'de> Deserialize<'de> for SectionId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        SectionId::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown section: {}", name)))
    }
}

/// 目录条目（供前端枚举复选框）
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: SectionId,
    pub title: &'static str,
    pub key: &'static str,
    pub position: usize,
}

/// 返回完整目录
pub fn catalog() -> Vec<CatalogEntry> {
    SectionId::ALL
        .iter()
        .map(|&id| CatalogEntry {
            id,
            title: id.title(),
            key: id.key(),
            position: id.position(),
        })
        .collect()
}

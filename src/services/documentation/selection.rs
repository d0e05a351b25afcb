//! 章节选择集

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::catalog::SectionId;

/// 用户选择的章节集合
///
/// 内部按目录顺序存储，序列化为显示名称数组。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(BTreeSet<SectionId>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 切换某个章节的选中状态，返回切换后是否选中
    pub fn toggle(&mut self, id: SectionId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn insert(&mut self, id: SectionId) -> bool {
        self.0.insert(id)
    }

    /// 按目录顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.0.iter().copied()
    }

    /// 显示名称列表（目录顺序）
    pub fn titles(&self) -> Vec<&'static str> {
        self.iter().map(SectionId::title).collect()
    }
}

impl FromIterator<SectionId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = SectionId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

//! 课程模型
//!
//! 课程 = 名称 + 颜色 + 一组升序的源文档页索引

use serde::Serialize;

/// 课程颜色（按创建顺序轮流取用）
pub const LESSON_COLORS: [&str; 7] = [
    "#34D399", // Emerald
    "#60A5FA", // Blue
    "#F87171", // Red
    "#FBBF24", // Amber
    "#A78BFA", // Violet
    "#2DD4BF", // Teal
    "#F472B6", // Pink
];

/// 第 `position` 个创建的课程所用的颜色
pub fn color_for(position: usize) -> &'static str {
    LESSON_COLORS[position % LESSON_COLORS.len()]
}

/// 课程
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    /// 显示名称，同时作为导出文件名
    pub name: String,
    /// 0 起始的页索引，升序，创建后不再变化
    pages: Vec<usize>,
    /// 展示颜色
    pub color: &'static str,
}

impl Lesson {
    /// 页索引会被排序去重，输出顺序始终与源文档一致
    pub fn new(name: impl Into<String>, mut pages: Vec<usize>, color: &'static str) -> Self {
        pages.sort_unstable();
        pages.dedup();
        Self {
            name: name.into(),
            pages,
            color,
        }
    }

    pub fn pages(&self) -> &[usize] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.pages.binary_search(&index).is_ok()
    }

    /// 导出到压缩包中的条目名
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.name)
    }
}

impl std::fmt::Display for Lesson {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {} 页", self.name, self.pages.len())
    }
}

//! 课程登记表 - 业务能力层
//!
//! 只负责课程的增删改和命名，不关心页面选择的界面逻辑

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::models::{color_for, Lesson, Selection};

/// 课程登记表
///
/// 按创建顺序保存所有课程，是页归属的唯一数据来源。
/// 页不重叠由选择环节保证，这里创建课程时不再校验。
#[derive(Debug, Clone, Default)]
pub struct LessonRegistry {
    lessons: Vec<Lesson>,
}

impl LessonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn get(&self, index: usize) -> Option<&Lesson> {
        self.lessons.get(index)
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// 用当前选择创建课程并清空选择
    ///
    /// 选择为空时什么也不做，返回 `None`；否则返回新课程的位置
    pub fn create_lesson(&mut self, selection: &mut Selection) -> Option<usize> {
        if selection.is_empty() {
            debug!("选择为空，忽略创建课程");
            return None;
        }

        let name = self.next_name();
        let color = color_for(self.lessons.len());
        let pages = selection.take();

        info!("✓ 创建课程 {} ({} 页)", name, pages.len());
        self.lessons.push(Lesson::new(name, pages, color));

        Some(self.lessons.len() - 1)
    }

    /// 重命名课程，名称去除首尾空白后不能为空；不检查重名
    pub fn rename_lesson(&mut self, index: usize, new_name: &str) -> bool {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.lessons.get_mut(index) {
            Some(lesson) => {
                debug!("课程 {} 重命名: {} -> {}", index, lesson.name, trimmed);
                lesson.name = trimmed.to_string();
                true
            }
            None => false,
        }
    }

    /// 删除课程，后面的课程依次前移；其页立即可以重新选择
    pub fn delete_lesson(&mut self, index: usize) -> Option<Lesson> {
        if index >= self.lessons.len() {
            return None;
        }
        let removed = self.lessons.remove(index);
        info!("🗑️ 删除课程 {} (释放 {} 页)", removed.name, removed.page_count());
        Some(removed)
    }

    /// 拥有该页的课程位置
    pub fn owner_of(&self, page: usize) -> Option<usize> {
        self.lessons.iter().position(|lesson| lesson.contains(page))
    }

    pub fn is_assigned(&self, page: usize) -> bool {
        self.owner_of(page).is_some()
    }

    /// 所有课程的页两两不相交
    pub fn pages_are_disjoint(&self) -> bool {
        let mut seen = HashSet::new();
        self.lessons
            .iter()
            .flat_map(|lesson| lesson.pages().iter())
            .all(|page| seen.insert(*page))
    }

    pub fn clear(&mut self) {
        self.lessons.clear();
    }

    /// 下一个课程的自动名称
    ///
    /// 上一个课程名形如 `年级-序号`（如 `7-3`）时序号加一；
    /// 否则回退为 `Lesson {课程数 + 1}`。回退只看数量，手动改名或删除后可能与已有名称重复。
    pub fn next_name(&self) -> String {
        self.lessons
            .last()
            .and_then(|previous| next_grade_number(&previous.name))
            .unwrap_or_else(|| format!("Lesson {}", self.lessons.len() + 1))
    }
}

/// `年级-序号`，只接受 ASCII 数字
static GRADE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)-([0-9]+)$").expect("valid grade-number regex"));

/// 序号超出 u64 时无法递增，按不匹配处理
fn next_grade_number(previous: &str) -> Option<String> {
    let caps = GRADE_NUMBER_REGEX.captures(previous)?;
    let next = caps[2].parse::<u64>().ok().and_then(|n| n.checked_add(1));
    if next.is_none() {
        debug!("序号无法递增，回退默认命名: {}", previous);
    }
    Some(format!("{}-{}", &caps[1], next?))
}

//! 会话 - 流程层
//!
//! 一次会话 = 一个源文档 + 课程登记表 + 当前选择。
//! 所有修改都是同步命令方法，非法请求静默忽略。

use tracing::{debug, info};

use crate::models::{Lesson, Selection, SourceDocument};
use crate::services::LessonRegistry;

/// 单页所处状态
///
/// `Unselected → Selected → Assigned`；删除所属课程后回到 `Unselected`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// 未选择
    Unselected,
    /// 已选中，等待组成课程
    Selected,
    /// 已归属某个课程
    Assigned { lesson: usize },
}

/// 会话上下文
#[derive(Debug, Default)]
pub struct Session {
    source: Option<SourceDocument>,
    registry: LessonRegistry,
    selection: Selection,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 装入新的源文档，清空课程和选择（旧的页索引全部失效）
    pub fn load_source(&mut self, source: SourceDocument) {
        info!("📄 切换源文档: {} ({} 页)", source.name(), source.page_count());
        self.registry.clear();
        self.selection.clear();
        self.source = Some(source);
    }

    /// 回到初始状态
    pub fn reset(&mut self) {
        debug!("重置会话");
        self.source = None;
        self.registry.clear();
        self.selection.clear();
    }

    pub fn source(&self) -> Option<&SourceDocument> {
        self.source.as_ref()
    }

    pub fn page_count(&self) -> usize {
        self.source.as_ref().map_or(0, SourceDocument::page_count)
    }

    pub fn lessons(&self) -> &[Lesson] {
        self.registry.lessons()
    }

    pub fn registry(&self) -> &LessonRegistry {
        &self.registry
    }

    /// 当前选中的页（升序）
    pub fn selected_pages(&self) -> Vec<usize> {
        self.selection.to_vec()
    }

    // ========== 页选择 ==========

    /// 翻转一页的选中状态；已归属课程的页不受影响
    ///
    /// 不校验范围，调用方保证 `index < page_count()`。返回选择是否发生变化
    pub fn toggle_page(&mut self, index: usize) -> bool {
        if self.registry.is_assigned(index) {
            debug!("第 {} 页已归属课程，忽略", index + 1);
            return false;
        }
        self.selection.toggle(index);
        true
    }

    /// 依次翻转多页，返回实际变化的页数
    pub fn toggle_pages(&mut self, indices: &[usize]) -> usize {
        indices
            .iter()
            .filter(|&&index| self.toggle_page(index))
            .count()
    }

    pub fn is_assigned(&self, index: usize) -> bool {
        self.registry.is_assigned(index)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(index)
    }

    pub fn page_state(&self, index: usize) -> PageState {
        if let Some(lesson) = self.registry.owner_of(index) {
            PageState::Assigned { lesson }
        } else if self.selection.contains(index) {
            PageState::Selected
        } else {
            PageState::Unselected
        }
    }

    // ========== 课程命令 ==========

    /// 用当前选择创建课程
    pub fn create_lesson(&mut self) -> Option<usize> {
        self.registry.create_lesson(&mut self.selection)
    }

    pub fn rename_lesson(&mut self, index: usize, new_name: &str) -> bool {
        self.registry.rename_lesson(index, new_name)
    }

    pub fn delete_lesson(&mut self, index: usize) -> Option<Lesson> {
        self.registry.delete_lesson(index)
    }

    pub fn can_create_lesson(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn can_extract(&self) -> bool {
        self.source.is_some() && !self.registry.is_empty()
    }
}

use std::collections::BTreeSet;

/// 当前选中、等待组成下一个课程的页（升序、去重）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pages: BTreeSet<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 翻转某页的选中状态，返回翻转后是否处于选中
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.pages.remove(&index) {
            false
        } else {
            self.pages.insert(index);
            true
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.pages.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// 升序页索引
    pub fn to_vec(&self) -> Vec<usize> {
        self.pages.iter().copied().collect()
    }

    /// 取出全部页并清空
    pub fn take(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.pages).into_iter().collect()
    }

    pub fn clear(&mut self) {
        self.pages.clear();
    }
}

impl FromIterator<usize> for Selection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

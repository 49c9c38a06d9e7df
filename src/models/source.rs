use std::path::PathBuf;

/// 源文档来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    /// 本地文件
    File(PathBuf),
    /// 远程 URL
    Url(String),
    /// 内存数据
    Memory,
}

/// 已加载并校验过的源文档
///
/// 只读；页索引从 0 开始，范围由加载时确定的页数限定
#[derive(Debug, Clone)]
pub struct SourceDocument {
    name: String,
    bytes: Vec<u8>,
    page_count: usize,
    origin: SourceOrigin,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, page_count: usize, origin: SourceOrigin) -> Self {
        Self {
            name: name.into(),
            bytes,
            page_count,
            origin,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn origin(&self) -> &SourceOrigin {
        &self.origin
    }

    /// 去掉第一处 `.pdf` 后的文件名
    pub fn base_name(&self) -> String {
        self.name.replacen(".pdf", "", 1)
    }

    /// 导出压缩包文件名
    pub fn archive_name(&self) -> String {
        format!("{}_lessons.zip", self.base_name())
    }
}

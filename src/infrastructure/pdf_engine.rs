//! PDF 引擎 - 基础设施层
//!
//! 持有唯一的已解析文档，只暴露"数页"和"按页拆出新文档"的能力

use lopdf::Document;
use std::collections::BTreeSet;
use tracing::debug;

/// PDF 引擎
///
/// 职责：
/// - 持有解析后的源文档
/// - 按页索引复制出独立的 PDF 字节流（结构复制，不重新渲染）
/// - 不认识 Lesson / Session
pub struct PdfEngine {
    document: Document,
}

impl PdfEngine {
    /// 解析 PDF 字节
    pub fn load(bytes: &[u8]) -> Result<Self, lopdf::Error> {
        let document = Document::load_mem(bytes)?;
        debug!("PDF 解析完成，版本 {}", document.version);
        Ok(Self { document })
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// 生成只包含指定页的新文档并序列化
    ///
    /// `pages` 为 0 起始的升序索引；输出按源文档顺序保留这些页，
    /// 调用方负责保证索引都在范围内。
    pub fn extract_pages(&self, pages: &[usize]) -> Result<Vec<u8>, lopdf::Error> {
        let keep: BTreeSet<u32> = pages.iter().map(|&p| p as u32 + 1).collect();
        let to_delete: Vec<u32> = self
            .document
            .get_pages()
            .keys()
            .copied()
            .filter(|number| !keep.contains(number))
            .collect();

        let mut output = self.document.clone();
        output.delete_pages(&to_delete);
        output.prune_objects();
        output.compress();

        let mut buffer = Vec::new();
        output.save_to(&mut buffer)?;

        debug!(
            "拆出 {} 页 (删除 {} 页), 输出 {} 字节",
            keep.len(),
            to_delete.len(),
            buffer.len()
        );

        Ok(buffer)
    }
}

/// 测试夹具与 `tests/` 共用一份
#[cfg(test)]
#[path = "../../tests/common/mod.rs"]
pub(crate) mod test_support;

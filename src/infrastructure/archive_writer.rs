//! ZIP 写入器 - 基础设施层
//!
//! 只负责"把若干命名字节流打成一个压缩包"

use std::io::{Cursor, Write};
use tracing::warn;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// 压缩包 MIME 类型
pub const ARCHIVE_MIME_TYPE: &str = "application/zip";

/// 压缩包构建器
///
/// 条目在 `finish` 之前只保存在内存里；同名条目后写覆盖先写，位置保持不变
#[derive(Debug, Default)]
pub struct ArchiveWriter {
    entries: Vec<(String, Vec<u8>)>,
}

impl ArchiveWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加条目，返回是否覆盖了已有的同名条目
    pub fn add(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> bool {
        let name = name.into();
        if let Some(existing) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            warn!("⚠️ 条目重名，覆盖: {}", name);
            existing.1 = bytes;
            true
        } else {
            self.entries.push((name, bytes));
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// 写出 ZIP 字节
    pub fn finish(self) -> zip::result::ZipResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, bytes) in &self.entries {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(bytes)?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

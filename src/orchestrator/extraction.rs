//! 课程导出 - 编排层
//!
//! ## 职责
//!
//! 把源文档 + 课程列表变成一个 ZIP：
//!
//! 1. **解析**：源文档只解析一次
//! 2. **逐课拆分**：每个课程复制出一个独立 PDF（`{课程名}.pdf`）
//! 3. **打包**：全部成功后才生成压缩包，任一步失败都不返回部分结果
//!
//! 每一步之间让出执行权，便于调用方显示进度。

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{AppResult, ExtractionError};
use crate::infrastructure::archive_writer::ARCHIVE_MIME_TYPE;
use crate::infrastructure::{ArchiveWriter, PdfEngine};
use crate::models::{Lesson, SourceDocument};
use crate::utils::logging;

/// 压缩包中的一个条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveEntry {
    pub name: String,
    pub page_count: usize,
}

/// 导出结果
#[derive(Debug, Clone)]
pub struct LessonArchive {
    /// `{源文件名}_lessons.zip`
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// 与压缩包内顺序一致
    pub entries: Vec<ArchiveEntry>,
}

impl LessonArchive {
    pub const MIME_TYPE: &'static str = ARCHIVE_MIME_TYPE;

    /// 写入目录，返回文件路径
    pub async fn save_to(&self, dir: impl AsRef<Path>) -> AppResult<PathBuf> {
        let dir = dir.as_ref();
        let path = dir.join(&self.file_name);

        let write_error = |source| ExtractionError::Write {
            path: path.display().to_string(),
            source,
        };

        tokio::fs::create_dir_all(dir).await.map_err(write_error)?;
        tokio::fs::write(&path, &self.bytes)
            .await
            .map_err(write_error)?;

        info!("💾 已保存: {} ({})", path.display(), Self::MIME_TYPE);
        Ok(path)
    }
}

/// 按课程拆分源文档并打包
///
/// # 参数
/// - `source`: 已校验的源文档
/// - `lessons`: 课程列表，按此顺序写入压缩包
///
/// # 返回
/// 课程为空返回 `NoLessons`；课程引用越界页返回 `PageOutOfRange`
pub async fn extract_lessons(
    source: &SourceDocument,
    lessons: &[Lesson],
) -> AppResult<LessonArchive> {
    if lessons.is_empty() {
        return Err(ExtractionError::NoLessons.into());
    }

    logging::log_extraction_start(source.name(), lessons.len());

    let engine = PdfEngine::load(source.bytes()).map_err(ExtractionError::Parse)?;
    let page_count = engine.page_count();
    tokio::task::yield_now().await;

    let mut writer = ArchiveWriter::new();
    let mut entries: Vec<ArchiveEntry> = Vec::with_capacity(lessons.len());
    let total = lessons.len();

    for (step, lesson) in lessons.iter().enumerate() {
        if let Some(&page) = lesson.pages().iter().find(|&&p| p >= page_count) {
            return Err(ExtractionError::PageOutOfRange {
                lesson: lesson.name.clone(),
                page: page + 1,
                page_count,
            }
            .into());
        }

        let bytes =
            engine
                .extract_pages(lesson.pages())
                .map_err(|source| ExtractionError::Assemble {
                    lesson: lesson.name.clone(),
                    source,
                })?;
        let size = bytes.len();

        let entry = ArchiveEntry {
            name: lesson.file_name(),
            page_count: lesson.page_count(),
        };
        if writer.add(entry.name.clone(), bytes) {
            if let Some(existing) = entries.iter_mut().find(|e| e.name == entry.name) {
                *existing = entry;
            }
        } else {
            entries.push(entry);
        }

        logging::log_lesson_assembled(step + 1, total, &lesson.name, lesson.page_count(), size);
        tokio::task::yield_now().await;
    }

    debug!("写入压缩包: {:?}", writer.names().collect::<Vec<_>>());
    let bytes = writer.finish().map_err(ExtractionError::Archive)?;
    let file_name = source.archive_name();

    logging::print_final_stats(&file_name, entries.len(), bytes.len());

    Ok(LessonArchive {
        file_name,
        bytes,
        entries,
    })
}

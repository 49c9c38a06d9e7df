//! 源文档加载服务 - 业务能力层
//!
//! 把本地文件、内存字节或远程下载结果校验成 `SourceDocument`

use std::path::Path;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, SourceError};
use crate::infrastructure::PdfEngine;
use crate::models::{SourceDocument, SourceOrigin};
use crate::utils::logging;

/// 无法从路径或 URL 得到文件名时使用的名称
pub const DEFAULT_FILE_NAME: &str = "document.pdf";

/// 从本地文件加载
pub async fn load_from_path(path: impl AsRef<Path>) -> AppResult<SourceDocument> {
    let path = path.as_ref();
    debug!("读取本地文件: {}", path.display());

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::unreadable(path.display().to_string(), e))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

    load_from_bytes(name, bytes, SourceOrigin::File(path.to_path_buf()))
}

/// 校验内存中的 PDF 字节
///
/// 解析失败或没有页面时返回 `InvalidSource`
pub fn load_from_bytes(
    name: impl Into<String>,
    bytes: Vec<u8>,
    origin: SourceOrigin,
) -> AppResult<SourceDocument> {
    let name = name.into();

    let engine = PdfEngine::load(&bytes).map_err(|e| {
        warn!("PDF 解析失败 {}: {}", name, e);
        AppError::unparsable(name.clone(), e)
    })?;

    let page_count = engine.page_count();
    if page_count == 0 {
        return Err(SourceError::NoPages { name }.into());
    }

    logging::log_source_loaded(&name, page_count, bytes.len());

    Ok(SourceDocument::new(name, bytes, page_count, origin))
}

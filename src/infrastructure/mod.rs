//! 基础设施层
//!
//! 持有第三方库资源（解析后的 PDF、ZIP 写入器），只向上暴露能力

pub mod archive_writer;
pub mod pdf_engine;

pub use archive_writer::ArchiveWriter;
pub use pdf_engine::PdfEngine;

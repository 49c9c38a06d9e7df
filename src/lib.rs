//! # Lesson Splitter
//!
//! 把一个 PDF 按页拆分成多个命名"课程"，并打包为 ZIP 的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有第三方资源，只暴露能力
//! - `PdfEngine` - 解析后的 PDF，提供按页拆出新文档的能力
//! - `ArchiveWriter` - 内存中的 ZIP 构建器
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `LessonRegistry` - 课程的创建、重命名、删除与自动命名
//! - `source_loader` - 本地文件 / 内存字节 → 已校验的源文档
//! - `PdfFetcher` - 远程下载（可选代理、进度汇报）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 一次拆分会话的状态
//! - `Session` - 源文档 + 课程 + 当前选择
//! - `parse_page_range` - 页码表达式解析
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - stdin 命令循环
//! - `orchestrator/extraction` - 课程导出为 ZIP
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ArchiveWriter, PdfEngine};
pub use models::{Lesson, Selection, SourceDocument, SourceOrigin};
pub use orchestrator::{extract_lessons, App, ArchiveEntry, Command, LessonArchive, Outcome};
pub use services::{LessonRegistry, PdfFetcher};
pub use workflow::{PageState, Session};

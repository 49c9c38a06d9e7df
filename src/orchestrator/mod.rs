//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 交互式前端
//! - 管理应用生命周期（初始化、命令循环）
//! - 持有唯一的 `Session` 和下载服务
//!
//! ### `command` - 命令解析
//! - 一行文本 → `Command`
//!
//! ### `extraction` - 课程导出
//! - 源文档 + 课程列表 → ZIP
//!
//! ## 层次关系
//!
//! ```text
//! app (命令循环)
//!     ↓
//! workflow::Session (页/课程状态)     extraction (拆分 + 打包)
//!     ↓                                  ↓
//! services (登记表 / 加载 / 下载)     infrastructure (PdfEngine / ArchiveWriter)
//! ```

pub mod app;
pub mod command;
pub mod extraction;

// 重新导出主要类型
pub use app::{App, Outcome};
pub use command::Command;
pub use extraction::{extract_lessons, ArchiveEntry, LessonArchive};

/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// `RUST_LOG` 优先；否则按 `verbose` 选择 debug 或 info。重复调用时静默忽略。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,lesson_splitter={}", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(output_dir: &str, use_proxy: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - PDF 课程拆分");
    info!("📂 输出目录: {}", output_dir);
    info!("🌐 代理: {}", if use_proxy { "开启" } else { "关闭" });
    info!("{}", "=".repeat(60));
}

/// 记录源文档加载信息
pub fn log_source_loaded(name: &str, page_count: usize, size: usize) {
    info!("✓ 已加载: {}", name);
    info!("📄 共 {} 页, {} 字节", page_count, size);
}

/// 记录导出开始信息
pub fn log_extraction_start(source_name: &str, lesson_count: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始导出: {}", source_name);
    info!("📚 课程数量: {}", lesson_count);
    info!("{}", "=".repeat(60));
}

/// 记录单个课程完成信息
pub fn log_lesson_assembled(step: usize, total: usize, name: &str, pages: usize, size: usize) {
    info!(
        "[{}/{}] ✓ {}.pdf ({} 页, {} 字节)",
        step, total, name, pages, size
    );
}

/// 打印最终统计信息
pub fn print_final_stats(file_name: &str, entries: usize, size: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 导出完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 文件: {}", file_name);
    info!("📚 条目: {}", entries);
    info!("💾 大小: {} 字节", size);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

/// 把 0 起始的页索引格式化为用户看到的页码列表
pub fn format_page_numbers(pages: &[usize]) -> String {
    pages
        .iter()
        .map(|p| (p + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

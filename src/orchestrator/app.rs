//! 交互式前端 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，持有唯一的会话：
//!
//! 1. **应用初始化**：记录启动信息、创建下载服务
//! 2. **命令循环**：逐行读取 stdin，解析为 [`Command`] 后执行
//! 3. **向下委托**：加载交给 services，页/课程状态交给 `Session`，导出交给 `extraction`
//! 4. **错误呈现**：跨域拦截时提示开启代理重试
//!
//! 会话只存在于内存中，进程退出即丢弃。

use std::fmt::Write as _;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::SourceOrigin;
use crate::orchestrator::command::{Command, HELP_TEXT};
use crate::orchestrator::extraction;
use crate::services::{self, FetchOptions, FetchProgress, PdfFetcher};
use crate::utils::logging::{self, format_page_numbers, truncate_text};
use crate::workflow::{parse_page_range, PageState, Session};

/// 单条命令的执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 继续读取下一条命令，附带回显文本
    Continue(String),
    Quit,
}

/// 应用主结构
pub struct App {
    config: Config,
    session: Session,
    fetcher: PdfFetcher,
    use_proxy: bool,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config.output_dir, config.use_proxy);

        if config.proxy_index >= config.cors_proxies.len() {
            warn!(
                "⚠️ 代理索引 {} 超出范围 (共 {} 个代理)，启用代理时加载将失败",
                config.proxy_index,
                config.cors_proxies.len()
            );
        }

        Ok(Self {
            fetcher: PdfFetcher::new(&config),
            use_proxy: config.use_proxy,
            session: Session::new(),
            config,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn use_proxy(&self) -> bool {
        self.use_proxy
    }

    /// 运行命令循环，直到 `quit` 或 stdin 结束
    pub async fn run(&mut self) -> Result<()> {
        println!("{}", HELP_TEXT);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(message) => {
                    println!("{}", message);
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(Outcome::Continue(reply)) => println!("{}", reply),
                Ok(Outcome::Quit) => break,
                Err(e) => {
                    error!("❌ {}", e);
                    if e.is_cross_origin_blocked() {
                        println!("💡 可执行 `proxy on` 后重新 open 该地址");
                    }
                }
            }
        }

        info!("👋 会话结束");
        Ok(())
    }

    /// 执行一条命令
    ///
    /// 非法的页/课程操作只回显提示，不返回错误；
    /// 加载、下载、导出失败时会话保持不变
    pub async fn execute(&mut self, command: Command) -> AppResult<Outcome> {
        let reply = match command {
            Command::Open(target) => self.open(&target).await?,
            Command::Proxy(on) => {
                self.use_proxy = on;
                format!("代理已{}", if on { "开启" } else { "关闭" })
            }
            Command::Toggle(expr) => self.toggle(&expr),
            Command::Create => match self.session.create_lesson() {
                Some(index) => {
                    let lesson = &self.session.lessons()[index];
                    format!("已创建 {}: {}", index + 1, lesson)
                }
                None => "请先选择页面".to_string(),
            },
            Command::Rename { index, name } => {
                if self.session.rename_lesson(index, &name) {
                    format!("课程 {} 已重命名为 {}", index + 1, name.trim())
                } else {
                    "重命名失败：序号不存在或名称为空".to_string()
                }
            }
            Command::Delete(index) => match self.session.delete_lesson(index) {
                Some(lesson) => format!(
                    "已删除 {}，释放第 {} 页",
                    lesson.name,
                    format_page_numbers(lesson.pages())
                ),
                None => format!("课程 {} 不存在", index + 1),
            },
            Command::List => self.render(),
            Command::Json => {
                serde_json::to_string_pretty(self.session.lessons()).unwrap_or_default()
            }
            Command::Extract => self.extract().await?,
            Command::Reset => {
                self.session.reset();
                "会话已清空".to_string()
            }
            Command::Help => HELP_TEXT.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Continue(reply))
    }

    // ========== 命令实现 ==========

    async fn open(&mut self, target: &str) -> AppResult<String> {
        let source = if looks_like_url(target) {
            let options = FetchOptions {
                use_proxy: self.use_proxy,
                proxy_index: self.config.proxy_index,
            };
            let mut last_bucket = 0;
            let fetched = self
                .fetcher
                .fetch(target, options, |progress: FetchProgress| {
                    let bucket = progress.percentage / 10;
                    if bucket > last_bucket {
                        last_bucket = bucket;
                        info!(
                            "⬇️ {}% ({}/{} 字节)",
                            progress.percentage, progress.loaded, progress.total
                        );
                    }
                })
                .await?;
            services::load_from_bytes(
                fetched.file_name,
                fetched.bytes,
                SourceOrigin::Url(target.to_string()),
            )?
        } else {
            services::load_from_path(target).await?
        };

        let reply = format!("已加载 {}，共 {} 页", source.name(), source.page_count());
        self.session.load_source(source);
        Ok(reply)
    }

    fn toggle(&mut self, expr: &str) -> String {
        let page_count = self.session.page_count();
        if page_count == 0 {
            return "请先 open 一个 PDF".to_string();
        }

        let pages = match parse_page_range(expr, page_count) {
            Ok(pages) => pages,
            Err(message) => return message,
        };

        let changed = self.session.toggle_pages(&pages);
        let skipped = pages.len() - changed;
        let mut reply = format!(
            "已选: [{}]",
            format_page_numbers(&self.session.selected_pages())
        );
        if skipped > 0 {
            let _ = write!(reply, "（{} 页已属于课程，已跳过）", skipped);
        }
        reply
    }

    async fn extract(&mut self) -> AppResult<String> {
        let Some(source) = self.session.source() else {
            return Ok("请先 open 一个 PDF".to_string());
        };

        let archive = extraction::extract_lessons(source, self.session.lessons()).await?;
        let path = archive.save_to(&self.config.output_dir).await?;

        Ok(format!(
            "已导出 {} 个课程 → {}",
            archive.entries.len(),
            path.display()
        ))
    }

    /// 页面网格 + 课程列表
    fn render(&self) -> String {
        let Some(source) = self.session.source() else {
            return "尚未加载 PDF".to_string();
        };

        let mut out = format!(
            "📄 {} ({} 页)\n",
            truncate_text(source.name(), 40),
            source.page_count()
        );

        for index in 0..source.page_count() {
            let cell = match self.session.page_state(index) {
                PageState::Unselected => format!("{:>4}    ", index + 1),
                PageState::Selected => format!("{:>4}*   ", index + 1),
                PageState::Assigned { lesson } => format!("{:>4}[{}]", index + 1, lesson + 1),
            };
            out.push_str(&cell);
            if (index + 1) % 10 == 0 {
                out.push('\n');
            }
        }
        if source.page_count() % 10 != 0 {
            out.push('\n');
        }

        if self.session.lessons().is_empty() {
            out.push_str("（暂无课程）");
        } else {
            for (i, lesson) in self.session.lessons().iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{}. {} {} [{}]",
                    i + 1,
                    lesson,
                    lesson.color,
                    format_page_numbers(lesson.pages())
                );
            }
        }

        out.trim_end().to_string()
    }
}

/// 以 http(s):// 开头的都按 URL 处理，格式错误交给下载服务报告
fn looks_like_url(target: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

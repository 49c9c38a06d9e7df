//! 远程 PDF 获取服务 - 业务能力层
//!
//! 只负责"把 URL 下载成 PDF 字节"，可选经由代理转发，边下载边汇报进度

use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppResult, ConfigError, NetworkError, SourceError};
use crate::services::source_loader::DEFAULT_FILE_NAME;

/// 下载进度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FetchProgress {
    pub loaded: u64,
    pub total: u64,
    pub percentage: u32,
}

impl FetchProgress {
    pub fn new(loaded: u64, total: u64) -> Self {
        let percentage = if total > 0 {
            (loaded as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };
        Self {
            loaded,
            total,
            percentage,
        }
    }
}

/// 单次获取的选项
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// 是否经代理转发
    pub use_proxy: bool,
    /// 使用第几个代理
    pub proxy_index: usize,
}

/// 下载结果（尚未做 PDF 结构校验）
#[derive(Debug, Clone)]
pub struct FetchedPdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 远程 PDF 获取服务
///
/// 职责：
/// - 校验 URL、拼接代理地址
/// - 按状态码和 Content-Type 区分失败原因
/// - 流式读取响应体并汇报进度
/// - 不解析 PDF
pub struct PdfFetcher {
    client: reqwest::Client,
    proxies: Vec<String>,
}

impl PdfFetcher {
    /// 创建新的获取服务
    pub fn new(config: &Config) -> Self {
        Self::with_proxies(config.cors_proxies.clone())
    }

    /// 使用自定义代理列表创建
    pub fn with_proxies(proxies: Vec<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            proxies,
        }
    }

    /// 下载 PDF
    ///
    /// # 参数
    /// - `url`: 目标地址（http/https）
    /// - `options`: 代理选项
    /// - `on_progress`: 已知总长度时每个数据块回调一次
    ///
    /// # 返回
    /// 直连时连接层失败返回 `CrossOriginBlocked`，提示改用代理；
    /// 代理下同样的失败返回 `ProxyFailed`
    pub async fn fetch<F>(
        &self,
        url: &str,
        options: FetchOptions,
        mut on_progress: F,
    ) -> AppResult<FetchedPdf>
    where
        F: FnMut(FetchProgress),
    {
        if !is_valid_url(url) {
            return Err(NetworkError::InvalidUrl {
                url: url.to_string(),
            }
            .into());
        }

        let request_url = self.request_url(url, options)?;
        info!("🌐 正在获取: {}", url);
        debug!("请求地址: {}", request_url);

        let response = match self.client.get(&request_url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("请求失败 (代理: {}): {}", options.use_proxy, e);
                let url = url.to_string();
                return Err(if options.use_proxy {
                    NetworkError::ProxyFailed { url }
                } else {
                    NetworkError::CrossOriginBlocked { url }
                }
                .into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(url, status).into());
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.contains("application/pdf") {
                return Err(SourceError::NotPdf {
                    content_type: content_type.to_string(),
                }
                .into());
            }
        }

        let total = response.content_length().unwrap_or(0);
        let mut bytes = Vec::with_capacity(total as usize);
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| NetworkError::Transport {
                url: url.to_string(),
                source,
            })?;
            bytes.extend_from_slice(&chunk);

            if total > 0 {
                on_progress(FetchProgress::new(bytes.len() as u64, total));
            }
        }

        info!("✓ 下载完成: {} 字节", bytes.len());

        Ok(FetchedPdf {
            file_name: file_name_from_url(url),
            bytes,
        })
    }

    /// 实际请求的地址：直连时原样返回，走代理时为 `代理前缀 + 编码后的 URL`
    fn request_url(&self, url: &str, options: FetchOptions) -> AppResult<String> {
        if !options.use_proxy {
            return Ok(url.to_string());
        }
        let prefix = self
            .proxies
            .get(options.proxy_index)
            .ok_or(ConfigError::ProxyIndexOutOfRange {
                index: options.proxy_index,
                available: self.proxies.len(),
            })?;
        Ok(format!("{}{}", prefix, urlencoding::encode(url)))
    }
}

fn status_error(url: &str, status: StatusCode) -> NetworkError {
    match status {
        StatusCode::NOT_FOUND => NetworkError::NotFound {
            url: url.to_string(),
        },
        StatusCode::FORBIDDEN => NetworkError::AccessDenied {
            url: url.to_string(),
        },
        _ => NetworkError::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        },
    }
}

/// 是否为可用的 http/https 地址
pub fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// 取 URL 路径的最后一段作为文件名；不像文件名时使用默认名称
pub fn file_name_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|segments| segments.last())
                .filter(|last| last.contains('.'))
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
}

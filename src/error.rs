use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入文件不是可用的 PDF
    #[error("无效的源文件: {0}")]
    InvalidSource(#[from] SourceError),
    /// 远程获取失败
    #[error("网络错误: {0}")]
    Network(#[from] NetworkError),
    /// 拆分或打包失败
    #[error("导出失败: {0}")]
    Extraction(#[from] ExtractionError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 源文件错误
#[derive(Debug, Error)]
pub enum SourceError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 内容类型不是 PDF
    #[error("该 URL 指向的不是 PDF 文件 (Content-Type: {content_type})")]
    NotPdf { content_type: String },
    /// PDF 解析失败
    #[error("无法解析 PDF ({name}): {source}")]
    Unparsable {
        name: String,
        #[source]
        source: lopdf::Error,
    },
    /// 文档没有页面
    #[error("PDF 不包含任何页面: {name}")]
    NoPages { name: String },
}

/// 网络错误
#[derive(Debug, Error)]
pub enum NetworkError {
    /// URL 格式错误
    #[error("URL 格式无效: {url}")]
    InvalidUrl { url: String },
    /// 404
    #[error("未找到 PDF，请检查 URL 后重试: {url}")]
    NotFound { url: String },
    /// 403
    #[error("访问被拒绝，该 PDF 可能需要身份验证: {url}")]
    AccessDenied { url: String },
    /// 其他非成功状态码
    #[error("获取 PDF 失败: {status} {reason}")]
    HttpStatus { status: u16, reason: String },
    /// 跨域拦截（直连失败，可改用代理重试）
    #[error("请求被跨域策略拦截，可启用代理后重试: {url}")]
    CrossOriginBlocked { url: String },
    /// 通过代理仍然失败
    #[error("使用代理仍无法获取 PDF，请下载后从本地加载: {url}")]
    ProxyFailed { url: String },
    /// 读取响应流失败
    #[error("读取响应失败 ({url}): {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 导出错误
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// 没有课程
    #[error("没有可导出的课程")]
    NoLessons,
    /// 课程引用了不存在的页
    #[error("课程 {lesson} 引用了不存在的第 {page} 页 (文档共 {page_count} 页)")]
    PageOutOfRange {
        lesson: String,
        page: usize,
        page_count: usize,
    },
    /// 源文档解析失败
    #[error("源文档解析失败: {0}")]
    Parse(#[source] lopdf::Error),
    /// 生成课程文档失败
    #[error("生成课程文档失败 ({lesson}): {source}")]
    Assemble {
        lesson: String,
        #[source]
        source: lopdf::Error,
    },
    /// 打包失败
    #[error("ZIP 打包失败: {0}")]
    Archive(#[from] zip::result::ZipError),
    /// 写入输出文件失败
    #[error("写入文件失败 ({path}): {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 代理索引越界
    #[error("代理索引 {index} 超出范围 (共 {available} 个代理)")]
    ProxyIndexOutOfRange { index: usize, available: usize },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    FileParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置文件读取失败
    #[error("配置文件读取失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建 PDF 解析错误
    pub fn unparsable(name: impl Into<String>, source: lopdf::Error) -> Self {
        AppError::InvalidSource(SourceError::Unparsable {
            name: name.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn unreadable(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::InvalidSource(SourceError::Unreadable {
            path: path.into(),
            source,
        })
    }

    /// 是否为跨域拦截（前端据此提示使用代理重试）
    pub fn is_cross_origin_blocked(&self) -> bool {
        matches!(
            self,
            AppError::Network(NetworkError::CrossOriginBlocked { .. })
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

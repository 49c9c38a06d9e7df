use crate::error::{AppResult, ConfigError};
use serde::Deserialize;

/// 公共 CORS 代理（敏感文档请谨慎使用）
pub const DEFAULT_CORS_PROXIES: [&str; 2] = [
    "https://corsproxy.io/?",
    "https://api.allorigins.win/raw?url=",
];

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ZIP 输出目录
    pub output_dir: String,
    /// 远程加载时是否走代理
    pub use_proxy: bool,
    /// 使用第几个代理
    pub proxy_index: usize,
    /// 代理前缀列表，目标 URL 编码后直接拼接在后面
    pub cors_proxies: Vec<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            use_proxy: false,
            proxy_index: 0,
            cors_proxies: DEFAULT_CORS_PROXIES.iter().map(|p| p.to_string()).collect(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 加载配置：`LESSON_SPLITTER_CONFIG` 指定的 TOML 文件优先于默认值，环境变量优先于文件
    pub fn load() -> AppResult<Self> {
        match std::env::var("LESSON_SPLITTER_CONFIG") {
            Ok(path) => Ok(Self::from_file(&path)?.with_env_overrides()),
            Err(_) => Ok(Self::from_env()),
        }
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| {
            ConfigError::FileParseFailed {
                path: path.to_string(),
                source,
            }
            .into()
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(self.output_dir),
            use_proxy: std::env::var("USE_PROXY").ok().and_then(|v| v.parse().ok()).unwrap_or(self.use_proxy),
            proxy_index: std::env::var("PROXY_INDEX").ok().and_then(|v| v.parse().ok()).unwrap_or(self.proxy_index),
            cors_proxies: std::env::var("CORS_PROXIES")
                .ok()
                .map(|v| parse_proxy_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or(self.cors_proxies),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }
}

fn parse_proxy_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_proxies() {
        let config = Config::default();
        assert_eq!(config.cors_proxies.len(), 2);
        assert_eq!(config.cors_proxies[0], "https://corsproxy.io/?");
        assert!(!config.use_proxy);
        assert_eq!(config.output_dir, ".");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("use_proxy = true\noutput_dir = \"out\"\n").unwrap();
        assert!(config.use_proxy);
        assert_eq!(config.output_dir, "out");
        assert_eq!(config.proxy_index, 0);
        assert_eq!(config.cors_proxies.len(), 2);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml_str("use_proxy = \"maybe\"").is_err());
    }

    #[test]
    fn test_load_without_file_matches_env() {
        if std::env::var("LESSON_SPLITTER_CONFIG").is_ok() {
            return;
        }
        let loaded = Config::load().unwrap();
        let from_env = Config::from_env();
        assert_eq!(loaded.output_dir, from_env.output_dir);
        assert_eq!(loaded.use_proxy, from_env.use_proxy);
        assert_eq!(loaded.cors_proxies, from_env.cors_proxies);
    }

    #[test]
    fn test_parse_proxy_list() {
        assert_eq!(
            parse_proxy_list(" http://a/?u= , ,http://b/"),
            vec!["http://a/?u=".to_string(), "http://b/".to_string()]
        );
    }
}

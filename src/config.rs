use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppResult, ConfigError, FileError};

/// 程序配置
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 分析服务基础地址
    pub api_base_url: String,
    /// 简历分析接口路径
    pub analysis_path: String,
    /// PDF 导出接口路径
    pub export_path: String,
    /// 分析请求超时（秒）
    pub request_timeout_secs: u64,
    /// 导出请求超时（秒）
    pub export_timeout_secs: u64,
    /// 导出文件保存目录
    pub export_dir: String,
    /// 导出文件默认文件名
    pub export_file_name: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:4000".to_string(),
            analysis_path: "/upload".to_string(),
            export_path: "/download-analysis".to_string(),
            request_timeout_secs: 30,
            export_timeout_secs: 60,
            export_dir: ".".to_string(),
            export_file_name: "analysis_result.pdf".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 默认配置 + 环境变量覆盖
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，缺失的字段使用默认值，然后再应用环境变量覆盖
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| FileError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })?;

        Ok(config.with_env_overrides())
    }

    /// 用环境变量覆盖当前配置
    pub fn with_env_overrides(self) -> Self {
        Self {
            api_base_url: std::env::var("RESUME_API_BASE_URL").unwrap_or(self.api_base_url),
            analysis_path: std::env::var("RESUME_ANALYSIS_PATH").unwrap_or(self.analysis_path),
            export_path: std::env::var("RESUME_EXPORT_PATH").unwrap_or(self.export_path),
            request_timeout_secs: std::env::var("RESUME_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_secs),
            export_timeout_secs: std::env::var("RESUME_EXPORT_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.export_timeout_secs),
            export_dir: std::env::var("RESUME_EXPORT_DIR").unwrap_or(self.export_dir),
            export_file_name: std::env::var("RESUME_EXPORT_FILE_NAME").unwrap_or(self.export_file_name),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    /// 分析接口完整地址
    pub fn analysis_url(&self) -> String {
        join_url(&self.api_base_url, &self.analysis_path)
    }

    /// 导出接口完整地址
    pub fn export_url(&self) -> String {
        join_url(&self.api_base_url, &self.export_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn export_timeout(&self) -> Duration {
        Duration::from_secs(self.export_timeout_secs)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

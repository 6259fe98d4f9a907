//! 命令行参数

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::{AppResult, FileError};

/// 提交简历和职位描述，显示分析结果，可选导出 PDF
#[derive(Debug, Parser)]
#[command(name = "resume_analyzer", version)]
pub struct Cli {
    /// 简历文件路径（只接受 PDF）
    pub resume: PathBuf,

    /// 职位描述文本
    #[arg(short = 'j', long, conflicts_with = "job_file")]
    pub job_description: Option<String>,

    /// 从文件读取职位描述
    #[arg(long)]
    pub job_file: Option<PathBuf>,

    /// TOML 配置文件
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 分析成功后导出 PDF
    #[arg(short, long)]
    pub export: bool,

    /// 导出目录（覆盖配置）
    #[arg(long)]
    pub export_dir: Option<String>,

    /// 显示详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 配置文件 / 环境变量 / 命令行，后者覆盖前者
    pub fn load_config(&self) -> AppResult<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::from_env(),
        };

        if let Some(dir) = &self.export_dir {
            config.export_dir = dir.clone();
        }
        if self.verbose {
            config.verbose_logging = true;
        }

        Ok(config)
    }

    /// 职位描述；都没给时返回空字符串，交给校验处理
    pub async fn read_job_description(&self) -> AppResult<String> {
        match (&self.job_description, &self.job_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FileError::ReadFailed {
                        path: path.display().to_string(),
                        source,
                    })?;
                Ok(text)
            }
            (None, None) => Ok(String::new()),
        }
    }
}

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::config::Config;
use crate::models::{Document, DocumentSource};
use crate::orchestrator::{SubmissionOrchestrator, SubmitDisposition};
use crate::utils::logging::log_startup;
use crate::utils::report::{render_evaluation, render_notice};
use crate::workflow::SessionView;

/// 应用主结构
pub struct App {
    config: Config,
    orchestrator: SubmissionOrchestrator,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let orchestrator =
            SubmissionOrchestrator::new(&config).context("无法初始化提交编排器")?;

        Ok(Self {
            config,
            orchestrator,
        })
    }

    /// 运行一次完整的分析流程
    ///
    /// 返回分析是否成功；带 `--export` 时导出失败也算失败。
    pub async fn run(&self, cli: &Cli) -> Result<bool> {
        let job_description = cli
            .read_job_description()
            .await
            .context("无法读取职位描述")?;
        self.orchestrator.set_job_description(job_description);

        let document = Document::from_path(&cli.resume)
            .await
            .with_context(|| format!("无法读取简历文件: {}", cli.resume.display()))?;

        if self
            .orchestrator
            .select_document(document, DocumentSource::Picker)
            .is_err()
        {
            print_view(&self.orchestrator.view());
            return Ok(false);
        }

        let succeeded = match self.orchestrator.submit().await {
            SubmitDisposition::Settled(outcome) => outcome.is_success(),
            SubmitDisposition::Ignored => {
                warn!("⚠️ 提交被忽略：已有分析在进行中");
                false
            }
        };

        print_view(&self.orchestrator.view());

        if !(cli.export && succeeded) {
            return Ok(succeeded);
        }

        info!("📄 正在导出分析结果到 {}", self.config.export_dir);
        let exported = match self.orchestrator.export().await {
            Ok(path) => {
                info!("✓ 导出完成: {}", path.display());
                true
            }
            Err(failure) => {
                warn!("❌ 导出失败: {}", failure.detail());
                false
            }
        };
        if let Some(notice) = self.orchestrator.view().notice {
            println!("{}", render_notice(&notice));
        }

        Ok(exported)
    }
}

fn print_view(view: &SessionView) {
    if let (Some(evaluation), Some(state)) = (&view.evaluation, view.presentation()) {
        println!("{}", render_evaluation(evaluation, &state));
    }
    if let Some(notice) = &view.notice {
        println!("{}", render_notice(notice));
    }
}

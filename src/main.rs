use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use resume_analyzer::cli::Cli;
use resume_analyzer::utils::logging;
use resume_analyzer::App;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 加载配置
    let config = cli.load_config()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config)?;
    let succeeded = app.run(&cli).await?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

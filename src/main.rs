use crate::cli::Cli;
use crate::config::Config;
use crate::errors::AppError;
use crate::services::RunOutcome;
use crate::startup::startup::Application;
use crate::utils::logger::init_logger;
use std::process::ExitCode;

mod cli;
mod config;
mod errors;

mod infrastructure;
mod models;
mod services;
mod startup;
mod utils;

#[tokio::main]
async fn main() -> ExitCode {
    let (cli, env_file) = Cli::load();
    init_logger();
    if let Some(path) = env_file {
        log_debug!("loaded environment from {}", path.display());
    }

    match run(cli).await {
        Ok(RunOutcome::Dispatched(report)) => {
            log_info!("Successfully broadcasted a transaction");
            log_info!("[Transaction] [ID: {}]", report.tx_id);
            log_info!("[Transaction] [Type: {}]", report.decision.kind);
            log_info!("[Transaction] [Nonce: {}]", report.decision.nonce);
            log_info!("[Transaction] [Fee Rate: {}]", report.decision.fee_rate);
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Skipped(reason)) => {
            log_warn!("No refresh needed: {}", reason);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error!("[Operation Error] {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunOutcome, AppError> {
    // 1. 加载并校验配置（失败则不执行任何运行）
    let config = Config::load(&cli.config_dir, &cli.environment)?;
    config.validate(!cli.dry_run)?;

    // 2. 组装
    let application = Application::build(config, cli.dry_run)?;

    // 3. 单次运行
    application.run().await
}

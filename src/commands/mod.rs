//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `engine/`, `models/`, `utils/`
//! - 子模块: run, check

pub mod check;
pub mod run;

use crate::batch::gate;
use crate::cli::Commands;
use crate::error::{DeadAirError, Result};
use crate::models::JobConfig;
use crate::utils::output;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Run(args) => run::execute(args),
        Commands::Check(args) => check::execute(args),
    }
}

/// 校验作业配置：逐条打印问题，存在问题时不启动
fn validate_job(job: &JobConfig) -> Result<()> {
    if let Err(issues) = gate::validate(job) {
        for issue in &issues {
            output::print_issue(issue.field(), &issue.to_string());
        }
        return Err(DeadAirError::InvalidConfig(issues));
    }

    for note in gate::advisories(job) {
        output::print_warning(&note);
    }

    Ok(())
}

//! 日志配置
//!
//! 终端日志（警告/错误写入stderr），可选追加写入日志文件供问题排查。

use anyhow::Context;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::OpenOptions;
use std::path::Path;

fn build_config(with_time: bool) -> Config {
    let mut builder = ConfigBuilder::new();
    builder
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off);
    if with_time {
        builder.set_time_format_rfc3339();
    } else {
        builder.set_time_level(LevelFilter::Off);
    }
    builder.build()
}

/// 终端日志级别
pub fn terminal_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// 初始化日志系统
///
/// 重复初始化（例如同一进程内多次运行流水线）不视为错误。
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        terminal_level(verbose),
        build_config(false),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建日志目录 / cannot create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("无法打开日志文件 / cannot open {}", path.display()))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, build_config(true), file));
    }

    if CombinedLogger::init(loggers).is_err() {
        log::debug!("Logger already initialized / 日志已初始化");
    }

    Ok(())
}

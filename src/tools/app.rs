//! 流程控制模块
//!
//! 三个命令行工具共用的流水线：解析 → 校验 → 扫描 → 逐个转码 → 封面 → 汇总。

use super::batch_state::BatchStats;
use super::cli::{self, AppConfig};
use super::cover::{self, CopiedCover};
use super::formatter::{self, BatchReport, DestinationSummary};
use super::processor::{self, ConversionJob};
use super::{scanner, validator};
use crate::audio::{ConversionConfig, FFmpegTranscoder, FormatProfile, Transcoder};
use crate::error::{ConvertError, ConvertResult, ErrorCategory, exit_codes};
use crate::logging;
use std::ffi::OsString;

/// 一次运行的结果
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    /// 扫描到的源文件数
    pub files_found: usize,
    pub stats: BatchStats,
    pub jobs: Vec<ConversionJob>,
    pub cover: Option<CopiedCover>,
    /// 目标目录统计（没有源文件时为None）
    pub destination: Option<DestinationSummary>,
}

impl RunOutcome {
    /// 根据结果计算退出码
    ///
    /// 单文件失败默认不影响退出码；`fail_on_error` 时有失败则返回 PARTIAL_FAILURE。
    pub fn exit_code(&self, fail_on_error: bool) -> i32 {
        if fail_on_error && self.stats.failed > 0 {
            exit_codes::PARTIAL_FAILURE
        } else {
            exit_codes::SUCCESS
        }
    }
}

/// 获取错误建议文本
fn get_error_suggestion(error: &ConvertError) -> &'static str {
    match ErrorCategory::from_convert_error(error) {
        ErrorCategory::Validation => {
            "检查命令行参数是否正确，使用 --help 查看完整用法 / Check the command-line arguments, use --help to see full usage"
        }
        ErrorCategory::Dependency => {
            "安装FFmpeg或使用 --ffmpeg 指定路径 / Install FFmpeg or point --ffmpeg at it"
        }
        ErrorCategory::Io => {
            "检查目录是否存在且可写 / Check that the folders exist and are writable"
        }
        ErrorCategory::Transcode | ErrorCategory::Other => {
            "请检查输入文件和参数设置 / Please check input files and parameter settings"
        }
    }
}

/// 错误处理和建议，返回退出码
fn handle_error(error: &ConvertError) -> i32 {
    eprintln!("[ERROR] 错误 / Error: {error}");
    eprintln!("[INFO] 建议 / Suggestion: {}", get_error_suggestion(error));
    exit_codes::GENERAL_ERROR
}

/// 处理clap解析结果：帮助/版本退出码0，其余用法错误退出码1
fn handle_clap_error(error: &clap::Error) -> i32 {
    use clap::error::ErrorKind;

    let _ = error.print();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_codes::SUCCESS,
        _ => exit_codes::GENERAL_ERROR,
    }
}

/// 执行批处理（配置已校验、转码器已就绪）
pub fn execute(
    profile: FormatProfile,
    config: &AppConfig,
    conversion: ConversionConfig,
    transcoder: &dyn Transcoder,
) -> ConvertResult<RunOutcome> {
    cli::show_startup_info(profile, config);
    println!("⚙️  输出参数 / Output: {}", conversion.describe());

    let files = scanner::scan_source_files(&config.source_dir, profile)?;
    scanner::show_scan_results(profile, &config.source_dir, &files, config.verbose);

    if files.is_empty() {
        return Ok(RunOutcome::default());
    }

    std::fs::create_dir_all(&config.dest_dir)?;

    let mut jobs = processor::create_jobs(&files, &config.dest_dir);
    let stats = processor::convert_all(&mut jobs, transcoder, &conversion, config.verbose);

    let copied_cover = cover::resolve_cover(&config.source_dir, &config.dest_dir);

    let destination = formatter::summarize_destination(&config.dest_dir)?;
    formatter::show_summary(files.len(), &stats, &destination, &config.dest_dir);

    if let Some(report_path) = &config.report_path {
        let report = BatchReport::new(
            profile,
            &config.source_dir,
            &config.dest_dir,
            &conversion,
            &jobs,
            &stats,
            destination,
            copied_cover.clone(),
        );
        formatter::write_report(report_path, &report)?;
    }

    Ok(RunOutcome {
        files_found: files.len(),
        stats,
        jobs,
        cover: copied_cover,
        destination: Some(destination),
    })
}

/// 校验并执行（使用给定转码器，便于测试注入）
pub fn run_with_transcoder(
    profile: FormatProfile,
    config: &AppConfig,
    transcoder: &dyn Transcoder,
) -> ConvertResult<RunOutcome> {
    let conversion = validator::validate(config)?;
    execute(profile, config, conversion, transcoder)
}

/// 从命令行参数运行完整流程，返回退出码
pub fn run_from<I, T>(profile: FormatProfile, args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let config = match cli::parse_args_from(profile, args) {
        Ok(config) => config,
        Err(e) => return handle_clap_error(&e),
    };

    if let Err(e) = logging::init_logging(config.verbose, config.log_file.as_deref()) {
        eprintln!("[WARNING] 日志初始化失败 / Logging setup failed: {e:#}");
    }

    let result = validator::validate(&config).and_then(|conversion| {
        let transcoder = FFmpegTranscoder::locate(config.ffmpeg_path.as_deref())?;
        execute(profile, &config, conversion, &transcoder)
    });

    match result {
        Ok(outcome) => outcome.exit_code(config.fail_on_error),
        Err(error) => handle_error(&error),
    }
}

/// 使用进程参数运行
pub fn run(profile: FormatProfile) -> i32 {
    run_from(profile, std::env::args_os())
}

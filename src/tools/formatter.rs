//! 汇总输出模块
//!
//! 批处理结束后以文件系统为准重新统计目标目录（AIFF数量与总大小），
//! 并可选写出JSON批量报告。

use super::batch_state::BatchStats;
use super::constants::output::AIFF_EXTENSION;
use super::cover::CopiedCover;
use super::processor::{ConversionJob, JobStatus};
use super::scanner::list_files;
use super::utils;
use crate::audio::{ConversionConfig, FormatProfile};
use crate::error::{ConvertError, ConvertResult};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 目标目录统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DestinationSummary {
    /// 目标目录中实际存在的 `.aiff` 文件数
    pub aiff_count: usize,
    /// 目标目录总字节数（递归）
    pub total_bytes: u64,
}

/// 统计目标目录中的AIFF文件（不递归）
pub fn count_aiff_files(dest_dir: &Path) -> ConvertResult<usize> {
    Ok(list_files(dest_dir)?
        .iter()
        .filter(|p| utils::has_extension_ignore_case(p, &[AIFF_EXTENSION]))
        .count())
}

/// 递归统计目录大小（不跟随符号链接，无法读取的子项跳过）
pub fn directory_size(dir: &Path) -> ConvertResult<u64> {
    let mut total = 0u64;
    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                log::debug!("统计大小时跳过 / Skipped while sizing: {}", ConvertError::from(e));
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}

/// 以文件系统为准统计目标目录
pub fn summarize_destination(dest_dir: &Path) -> ConvertResult<DestinationSummary> {
    Ok(DestinationSummary {
        aiff_count: count_aiff_files(dest_dir)?,
        total_bytes: directory_size(dest_dir)?,
    })
}

/// 显示批量处理完成信息
pub fn show_summary(
    found: usize,
    stats: &BatchStats,
    summary: &DestinationSummary,
    dest_dir: &Path,
) {
    println!();
    println!("📊 批量处理完成 / Batch finished");
    println!("   找到文件 / Files found:      {found}");
    println!("   成功转换 / Converted:        {}", stats.processed);
    if stats.failed > 0 {
        println!("   转换失败 / Failed:           {}", stats.failed);
        for (category, files) in &stats.error_stats {
            println!("      [{}] {}", category.display_name(), files.join(", "));
        }
    }
    println!("   AIFF文件 / AIFF files:       {}", summary.aiff_count);
    println!(
        "   总大小 / Total size:         {} ({})",
        utils::format_bytes(summary.total_bytes),
        dest_dir.display()
    );
}

/// 报告中的单个任务
#[derive(Debug, Serialize)]
pub struct JobReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ConversionJob> for JobReport {
    fn from(job: &ConversionJob) -> Self {
        Self {
            source: job.source_path.clone(),
            output: job.output_path.clone(),
            status: job.status,
            error: job.error.clone(),
        }
    }
}

/// JSON批量报告
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub tool: String,
    pub version: String,
    pub profile: String,
    pub generated_at: chrono::DateTime<chrono::Local>,
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub sample_rate_hz: Option<u32>,
    pub bit_depth: Option<u32>,
    pub converted: usize,
    pub failed: usize,
    pub destination: DestinationSummary,
    pub cover: Option<CopiedCover>,
    pub jobs: Vec<JobReport>,
}

impl BatchReport {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        profile: FormatProfile,
        source_dir: &Path,
        dest_dir: &Path,
        config: &ConversionConfig,
        jobs: &[ConversionJob],
        stats: &BatchStats,
        destination: DestinationSummary,
        cover: Option<CopiedCover>,
    ) -> Self {
        Self {
            tool: profile.tool_name().to_string(),
            version: VERSION.to_string(),
            profile: profile.display_name().to_string(),
            generated_at: chrono::Local::now(),
            source_dir: source_dir.to_path_buf(),
            dest_dir: dest_dir.to_path_buf(),
            sample_rate_hz: config.sample_rate_hz,
            bit_depth: config.bit_depth.map(|d| d.bits()),
            converted: stats.processed,
            failed: stats.failed,
            destination,
            cover,
            jobs: jobs.iter().map(JobReport::from).collect(),
        }
    }
}

/// 写出JSON报告
pub fn write_report(path: &Path, report: &BatchReport) -> ConvertResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|e| {
        ConvertError::ReportError(format!("{}: {e}", path.display()))
    })?;
    println!("📄 报告 / Report: {}", path.display());
    Ok(())
}

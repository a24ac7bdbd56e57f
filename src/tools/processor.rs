//! 转码调用模块
//!
//! 按枚举顺序逐个（串行、阻塞）调用转码器。单文件失败只记录，不中断批处理，不重试。

use super::batch_state::BatchStats;
use super::constants::output::AIFF_EXTENSION;
use super::utils;
use crate::audio::{ConversionConfig, Transcoder, probe_output};
use crate::error::{ConvertResult, ErrorCategory};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 转换任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Succeeded,
    Failed,
}

/// 单个源文件的转换任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub source_path: PathBuf,
    /// 目标目录下同名 `.aiff`
    pub output_path: PathBuf,
    pub status: JobStatus,
    /// 失败原因
    pub error: Option<String>,
}

impl ConversionJob {
    pub fn new(source_path: &Path, dest_dir: &Path) -> Self {
        let stem = utils::extract_file_stem_string(source_path);
        Self {
            source_path: source_path.to_path_buf(),
            output_path: dest_dir.join(format!("{stem}.{AIFF_EXTENSION}")),
            status: JobStatus::Pending,
            error: None,
        }
    }

    /// 记录转码结果（只在Pending状态下生效一次）
    pub fn record(&mut self, result: &ConvertResult<()>) {
        if self.status != JobStatus::Pending {
            return;
        }
        match result {
            Ok(()) => self.status = JobStatus::Succeeded,
            Err(e) => {
                self.status = JobStatus::Failed;
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn display_name(&self) -> String {
        utils::extract_filename_lossy(&self.source_path)
    }
}

/// 为扫描到的文件创建任务（保持顺序）
pub fn create_jobs(files: &[PathBuf], dest_dir: &Path) -> Vec<ConversionJob> {
    files
        .iter()
        .map(|file| ConversionJob::new(file, dest_dir))
        .collect()
}

/// 串行执行全部任务
pub fn convert_all(
    jobs: &mut [ConversionJob],
    transcoder: &dyn Transcoder,
    config: &ConversionConfig,
    verbose: bool,
) -> BatchStats {
    let total = jobs.len();
    let mut stats = BatchStats::default();

    log::debug!("转码器 / Transcoder: {} ({})", transcoder.name(), config.describe());

    for (index, job) in jobs.iter_mut().enumerate() {
        let name = job.display_name();
        println!("[{}/{}] Converting: {}", index + 1, total, name);

        let result = transcoder.transcode(&job.source_path, &job.output_path, config);
        job.record(&result);

        match result {
            Ok(()) => {
                stats.record_success();
                println!("   [OK] 完成 / done");

                if verbose {
                    match probe_output(&job.output_path) {
                        Ok(format) => println!("      {format}"),
                        Err(e) => log::warn!("{name}: 无法校验输出 / cannot verify output: {e}"),
                    }
                }
            }
            Err(e) => {
                let category = ErrorCategory::from_convert_error(&e);
                println!("   [FAIL] 失败 / failed");
                log::error!("{name} [{}]: {e}", category.display_name());
                stats.record_failure(category, name);
            }
        }
    }

    stats
}

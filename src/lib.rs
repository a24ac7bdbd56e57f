//! lossless2aiff - 无损音频批量转换AIFF工具
//!
//! 将目录中的 FLAC / WAV / DSD 文件通过外部FFmpeg转码为大端PCM AIFF，
//! 可选重采样与位深转换，并复制专辑封面到目标目录。
//!
//! ## 核心特性
//! - 三个命令行工具共用一条由 `FormatProfile` 参数化的流水线
//! - `--redbook` 与 `-r/-b` 按出现顺序覆盖
//! - 串行阻塞转码，单文件失败不中断批处理
//! - 固定优先级的封面搜索
//! - 以文件系统为准的结果汇总，可选JSON报告

pub mod audio;
pub mod error;
pub mod logging;
pub mod tools;

// 重新导出核心类型
pub use audio::{BitDepth, ConversionConfig, FFmpegTranscoder, FormatProfile, Transcoder};
pub use error::{ConvertError, ConvertResult, ErrorCategory};

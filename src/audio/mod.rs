//! 音频转换模块
//!
//! 格式档案、FFmpeg转码桥接以及输出文件探测。

pub mod ffmpeg_bridge;
pub mod format;
pub mod probe;

pub use ffmpeg_bridge::{FFMPEG_INSTALL_GUIDE, FFmpegTranscoder, Transcoder, build_ffmpeg_args};
pub use format::{AiffSampleFormat, BitDepth, ConversionConfig, FormatProfile};
pub use probe::{ProbedFormat, probe_output};

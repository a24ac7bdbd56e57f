//! 输出文件探测
//!
//! 使用symphonia读取已生成AIFF的头部信息，用于详细模式下的结果核对。

use crate::error::{ConvertError, ConvertResult, format_error};
use std::fmt;
use std::path::Path;

/// 探测到的输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbedFormat {
    pub sample_rate: u32,
    pub channels: u16,
    /// 有效位深（24位样本在32位容器中仍报告24）
    pub bits_per_sample: u32,
    /// 帧数（容器未声明时为0）
    pub frames: u64,
}

impl ProbedFormat {
    /// 时长（秒）
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frames as f64 / self.sample_rate as f64
        }
    }
}

impl fmt::Display for ProbedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz, {} ch, {}-bit, {:.1}s",
            self.sample_rate,
            self.channels,
            self.bits_per_sample,
            self.duration_seconds()
        )
    }
}

/// 探测音频文件格式
pub fn probe_output(path: &Path) -> ConvertResult<ProbedFormat> {
    use symphonia::core::codecs::{self, CODEC_TYPE_NULL};
    use symphonia::core::formats::FormatOptions;
    use symphonia::core::io::MediaSourceStream;
    use symphonia::core::meta::MetadataOptions;
    use symphonia::core::probe::Hint;

    let file = std::fs::File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = path.extension() {
        hint.with_extension(&extension.to_string_lossy());
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| format_error("格式探测失败 / probe failed", e))?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| ConvertError::FormatError("未找到音频轨道 / no audio track".to_string()))?;

    let params = &track.codec_params;
    let sample_rate = params
        .sample_rate
        .ok_or_else(|| ConvertError::FormatError("缺少采样率 / missing sample rate".to_string()))?;
    let channels = params
        .channels
        .map(|ch| ch.count() as u16)
        .ok_or_else(|| ConvertError::FormatError("无法获取声道数信息 / missing channels".to_string()))?;

    let bits_per_sample = params.bits_per_sample.unwrap_or(match params.codec {
        codecs::CODEC_TYPE_PCM_S16BE | codecs::CODEC_TYPE_PCM_S16LE => 16,
        codecs::CODEC_TYPE_PCM_S24BE | codecs::CODEC_TYPE_PCM_S24LE => 24,
        _ => 32,
    });

    Ok(ProbedFormat {
        sample_rate,
        channels,
        bits_per_sample,
        frames: params.n_frames.unwrap_or(0),
    })
}

//! 转换格式定义模块
//!
//! 定义源格式档案（FLAC/WAV/DSD）、目标位深和不可变的转换配置。

use crate::tools::constants::redbook;
use std::fmt;
use std::path::Path;

/// 源格式档案
///
/// 三个命令行工具共享同一条流水线，只在扩展名和默认参数上不同。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatProfile {
    Flac,
    Wav,
    Dsd,
}

impl FormatProfile {
    /// 对应命令行工具名
    pub fn tool_name(&self) -> &'static str {
        match self {
            FormatProfile::Flac => "flac2aiff",
            FormatProfile::Wav => "wav2aiff",
            FormatProfile::Dsd => "dsd2aiff",
        }
    }

    /// 可识别的源文件扩展名（小写，不含点）
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FormatProfile::Flac => &["flac"],
            FormatProfile::Wav => &["wav"],
            FormatProfile::Dsd => &["dsf", "dff"],
        }
    }

    /// 扩展名匹配是否区分大小写
    pub fn case_sensitive(&self) -> bool {
        !matches!(self, FormatProfile::Dsd)
    }

    /// 默认输出采样率（None = 保持源采样率）
    ///
    /// DSD原生采样率远高于PCM可听范围，抽取时默认保留176.4kHz。
    pub fn default_sample_rate(&self) -> Option<u32> {
        match self {
            FormatProfile::Dsd => Some(176_400),
            _ => None,
        }
    }

    /// 默认输出位深（None = 保持源位深）
    pub fn default_bit_depth(&self) -> Option<u32> {
        match self {
            FormatProfile::Dsd => Some(24),
            _ => None,
        }
    }

    /// 判断路径扩展名是否属于本档案
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };

        if self.case_sensitive() {
            self.extensions().contains(&ext)
        } else {
            self.extensions()
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(ext))
        }
    }

    /// 显示名（大写扩展名列表）
    pub fn display_name(&self) -> &'static str {
        match self {
            FormatProfile::Flac => "FLAC",
            FormatProfile::Wav => "WAV",
            FormatProfile::Dsd => "DSD (DSF/DFF)",
        }
    }
}

impl fmt::Display for FormatProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// 输出位深
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 16位整数（大端）
    Sixteen,
    /// 24位样本，32位容器（大端）
    TwentyFour,
}

impl BitDepth {
    /// 从命令行数值构造，仅接受16或24
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            16 => Some(BitDepth::Sixteen),
            24 => Some(BitDepth::TwentyFour),
            _ => None,
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            BitDepth::Sixteen => 16,
            BitDepth::TwentyFour => 24,
        }
    }
}

/// AIFF输出采样格式（FFmpeg编码器 + 内部样本格式）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiffSampleFormat {
    /// FFmpeg音频编码器
    pub codec: &'static str,
    /// FFmpeg样本格式
    pub sample_fmt: &'static str,
}

/// 转换配置（创建后不可变，按值传递）
///
/// 字段为 None 表示保持源文件对应属性。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionConfig {
    pub sample_rate_hz: Option<u32>,
    pub bit_depth: Option<BitDepth>,
}

impl ConversionConfig {
    pub fn new(sample_rate_hz: Option<u32>, bit_depth: Option<BitDepth>) -> Self {
        Self {
            sample_rate_hz,
            bit_depth,
        }
    }

    /// Red Book (CD-DA) 配置：44.1kHz / 16位
    pub fn redbook() -> Self {
        Self::new(
            Some(redbook::SAMPLE_RATE_HZ),
            BitDepth::from_bits(redbook::BIT_DEPTH),
        )
    }

    /// 映射到AIFF编码参数
    ///
    /// 未指定位深时使用24位（32位容器），可无损容纳16位或24位源。
    pub fn aiff_sample_format(&self) -> AiffSampleFormat {
        match self.bit_depth {
            Some(BitDepth::Sixteen) => AiffSampleFormat {
                codec: "pcm_s16be",
                sample_fmt: "s16",
            },
            Some(BitDepth::TwentyFour) | None => AiffSampleFormat {
                codec: "pcm_s24be",
                sample_fmt: "s32",
            },
        }
    }

    /// 用于日志的参数描述
    pub fn describe(&self) -> String {
        let rate = self
            .sample_rate_hz
            .map(|r| format!("{r} Hz"))
            .unwrap_or_else(|| "原始 / original".to_string());
        let depth = self
            .bit_depth
            .map(|d| format!("{}-bit", d.bits()))
            .unwrap_or_else(|| "原始 / original (24-bit container)".to_string());
        format!("{rate}, {depth}")
    }
}

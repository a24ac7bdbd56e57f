//! 配置校验模块
//!
//! 按顺序校验位深、源目录；外部工具的可用性由 FFmpegTranscoder::locate 检查。
//! 校验阶段不修改文件系统。

use super::cli::AppConfig;
use crate::audio::{BitDepth, ConversionConfig};
use crate::error::{ConvertError, ConvertResult};

/// 校验位深（允许未设置）
pub fn validate_bit_depth(bit_depth: Option<u32>) -> ConvertResult<Option<BitDepth>> {
    match bit_depth {
        None => Ok(None),
        Some(bits) => BitDepth::from_bits(bits).map(Some).ok_or_else(|| {
            ConvertError::InvalidInput(format!(
                "位深必须为16或24 / bit depth must be 16 or 24, got {bits}"
            ))
        }),
    }
}

/// 校验配置并生成不可变的转换配置
pub fn validate(config: &AppConfig) -> ConvertResult<ConversionConfig> {
    let bit_depth = validate_bit_depth(config.bit_depth)?;

    if !config.source_dir.is_dir() {
        return Err(ConvertError::InvalidInput(format!(
            "源目录不存在 / source folder does not exist: {}",
            config.source_dir.display()
        )));
    }

    if config.sample_rate == Some(0) {
        return Err(ConvertError::InvalidInput(
            "采样率必须为正整数 / sample rate must be a positive integer".to_string(),
        ));
    }

    Ok(ConversionConfig::new(config.sample_rate, bit_depth))
}

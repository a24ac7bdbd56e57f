//! FFmpeg桥接转码器
//!
//! 所有解码、重采样、位深转换和DSD抽取都交给外部FFmpeg进程完成，
//! 本模块只负责定位FFmpeg、构建参数并以阻塞子进程方式调用。

use super::format::ConversionConfig;
use crate::error::{ConvertError, ConvertResult, transcode_error};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// FFmpeg安装指南（跨平台）
pub const FFMPEG_INSTALL_GUIDE: &str = r#"
FFmpeg is required to convert audio to AIFF / 需要安装FFmpeg才能转换为AIFF

Installation / 安装方法:
  macOS:   brew install ffmpeg
  Windows: https://www.gyan.dev/ffmpeg/builds/ (推荐Full版本)
           或使用: winget install Gyan.FFmpeg
  Linux:
    - Ubuntu/Debian: sudo apt install ffmpeg
    - Fedora/RHEL:   sudo dnf install ffmpeg
    - Arch:          sudo pacman -S ffmpeg

Official site / 官方网站: https://ffmpeg.org/download.html
"#;

/// 转码器抽象
///
/// 每次调用转换一个文件并阻塞直到完成。
pub trait Transcoder {
    /// 转码器名称（用于日志）
    fn name(&self) -> &str;

    /// 将 `input` 转码为 `output` 处的AIFF文件
    fn transcode(&self, input: &Path, output: &Path, config: &ConversionConfig)
    -> ConvertResult<()>;
}

/// 构建FFmpeg参数（纯函数：相同输入总是得到相同参数）
pub fn build_ffmpeg_args(input: &Path, output: &Path, config: &ConversionConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-loglevel", "error", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(input.as_os_str().to_owned());

    // 仅保留第一条音频流，复制源标签
    args.extend(["-map", "0:a:0", "-map_metadata", "0"].map(OsString::from));

    if let Some(rate) = config.sample_rate_hz {
        args.push("-ar".into());
        args.push(rate.to_string().into());
    }

    let sample_format = config.aiff_sample_format();
    args.extend(
        [
            "-c:a",
            sample_format.codec,
            "-sample_fmt",
            sample_format.sample_fmt,
            "-write_id3v2",
            "1",
            "-f",
            "aiff",
            "-y",
        ]
        .map(OsString::from),
    );
    args.push(output.as_os_str().to_owned());

    args
}

/// 基于FFmpeg子进程的转码器
#[derive(Debug, Clone)]
pub struct FFmpegTranscoder {
    ffmpeg_path: PathBuf,
}

impl FFmpegTranscoder {
    /// 使用已知路径创建（不做可用性检查）
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    /// 定位FFmpeg并创建转码器
    ///
    /// 指定了 `override_path` 时只检查该路径，否则在执行路径中查找。
    pub fn locate(override_path: Option<&Path>) -> ConvertResult<Self> {
        let found = match override_path {
            Some(path) => Self::probe(path).then(|| path.to_path_buf()),
            None => Self::find_ffmpeg_path(),
        };

        match found {
            Some(path) => {
                log::debug!("FFmpeg located / 已找到FFmpeg: {}", path.display());
                Ok(Self::new(path))
            }
            None => {
                let what = override_path
                    .map(|p| format!("FFmpeg not usable at {}", p.display()))
                    .unwrap_or_else(|| "FFmpeg not found in PATH".to_string());
                Err(ConvertError::MissingDependency(format!(
                    "{what}\n{FFMPEG_INSTALL_GUIDE}"
                )))
            }
        }
    }

    /// 运行 `-version` 判断可执行文件是否可用
    fn probe(path: &Path) -> bool {
        Command::new(path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// 查找FFmpeg可执行文件路径（跨平台）
    fn find_ffmpeg_path() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            let mut candidates = vec![
                PathBuf::from("ffmpeg.exe"), // PATH中
                PathBuf::from(r"C:\Program Files\ffmpeg\bin\ffmpeg.exe"),
                PathBuf::from(r"C:\ffmpeg\bin\ffmpeg.exe"),
            ];
            // 便携部署：与可执行文件同目录
            if let Some(dir) = std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
            {
                candidates.push(dir.join("ffmpeg.exe"));
            }

            candidates.into_iter().find(|p| Self::probe(p))
        }

        #[cfg(not(target_os = "windows"))]
        {
            // macOS/Linux: 直接使用PATH中的ffmpeg
            let path = PathBuf::from("ffmpeg");
            Self::probe(&path).then_some(path)
        }
    }
}

impl Transcoder for FFmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn transcode(
        &self,
        input: &Path,
        output: &Path,
        config: &ConversionConfig,
    ) -> ConvertResult<()> {
        let args = build_ffmpeg_args(input, output, config);
        log::debug!(
            "{} {}",
            self.ffmpeg_path.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        // 阻塞等待，不设超时
        let result = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                ConvertError::IoError(std::io::Error::new(
                    e.kind(),
                    format!("Failed to spawn FFmpeg / 无法启动FFmpeg: {e}"),
                ))
            })?;

        if result.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&result.stderr);
        let detail = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("no diagnostic output");
        Err(transcode_error(
            &format!("FFmpeg exited with {}", result.status),
            detail.trim(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::format::BitDepth;

    fn args_as_strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_args_preserve_source_values() {
        let args = args_as_strings(&build_ffmpeg_args(
            Path::new("in/a.flac"),
            Path::new("out/a.aiff"),
            &ConversionConfig::default(),
        ));

        assert!(!args.contains(&"-ar".to_string()));
        assert_eq!(args[5], "in/a.flac");
        assert_eq!(args.last().map(String::as_str), Some("out/a.aiff"));

        let codec_pos = args.iter().position(|a| a == "-c:a").unwrap();
        assert_eq!(args[codec_pos + 1], "pcm_s24be");
        let fmt_pos = args.iter().position(|a| a == "-sample_fmt").unwrap();
        assert_eq!(args[fmt_pos + 1], "s32");
    }

    #[test]
    fn test_args_redbook() {
        let args = args_as_strings(&build_ffmpeg_args(
            Path::new("a.wav"),
            Path::new("a.aiff"),
            &ConversionConfig::redbook(),
        ));

        let rate_pos = args.iter().position(|a| a == "-ar").unwrap();
        assert_eq!(args[rate_pos + 1], "44100");
        let codec_pos = args.iter().position(|a| a == "-c:a").unwrap();
        assert_eq!(args[codec_pos + 1], "pcm_s16be");
        assert!(args.contains(&"-y".to_string()));
        assert!(args.contains(&"-map_metadata".to_string()));
    }

    #[test]
    fn test_args_are_pure() {
        let config = ConversionConfig::new(Some(96_000), Some(BitDepth::TwentyFour));
        let first = build_ffmpeg_args(Path::new("x.dsf"), Path::new("x.aiff"), &config);
        let second = build_ffmpeg_args(Path::new("x.dsf"), Path::new("x.aiff"), &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_locate_rejects_missing_override() {
        let result = FFmpegTranscoder::locate(Some(Path::new("/definitely/not/here/ffmpeg")));
        match result {
            Err(ConvertError::MissingDependency(msg)) => {
                assert!(msg.contains("ffmpeg.org"));
            }
            other => panic!("应该返回MissingDependency / expected MissingDependency: {other:?}"),
        }
    }

    #[test]
    fn test_install_guide_contains_all_platforms() {
        assert!(FFMPEG_INSTALL_GUIDE.contains("macOS"));
        assert!(FFMPEG_INSTALL_GUIDE.contains("Windows"));
        assert!(FFMPEG_INSTALL_GUIDE.contains("Linux"));
        assert!(FFMPEG_INSTALL_GUIDE.contains("ffmpeg.org"));
    }
}

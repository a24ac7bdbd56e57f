//! 真实FFmpeg端到端测试
//!
//! 用hound生成WAV，经FFmpeg转为AIFF后用symphonia校验。
//! 系统中没有FFmpeg时跳过。

use lossless2aiff::audio::{FFmpegTranscoder, FormatProfile, probe_output};
use lossless2aiff::tools::{self, AppConfig};
use std::path::Path;

fn write_sine_wav(path: &Path, sample_rate: u32, bits: u16, seconds: f32) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: bits,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let amplitude = ((1i64 << (bits - 1)) - 1) as f32 * 0.5;
    let frames = (sample_rate as f32 * seconds) as u32;
    for n in 0..frames {
        let t = n as f32 / sample_rate as f32;
        let sample = (amplitude * (2.0 * std::f32::consts::PI * 440.0 * t).sin()) as i32;
        writer.write_sample(sample).unwrap();
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
}

fn ffmpeg_or_skip() -> Option<FFmpegTranscoder> {
    match FFmpegTranscoder::locate(None) {
        Ok(t) => Some(t),
        Err(_) => {
            println!("⚠️  未找到FFmpeg，跳过 / ffmpeg not found, skipping");
            None
        }
    }
}

/// 验证Red Book预设输出 44.1kHz/16位
#[test]
fn test_wav_to_redbook_aiff() {
    let Some(transcoder) = ffmpeg_or_skip() else {
        return;
    };
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    write_sine_wav(&src.path().join("tone.wav"), 96_000, 24, 0.5);

    let mut config = AppConfig::with_defaults(FormatProfile::Wav, src.path(), dest.path());
    config.sample_rate = Some(44_100);
    config.bit_depth = Some(16);

    let outcome = tools::run_with_transcoder(FormatProfile::Wav, &config, &transcoder).unwrap();
    assert_eq!(outcome.stats.processed, 1);

    let probed = probe_output(&dest.path().join("tone.aiff")).unwrap();
    assert_eq!(probed.sample_rate, 44_100);
    assert_eq!(probed.bits_per_sample, 16);
    assert_eq!(probed.channels, 2);
}

/// 验证未指定参数时保留原始采样率，位深为24
#[test]
fn test_wav_preserves_rate() {
    let Some(transcoder) = ffmpeg_or_skip() else {
        return;
    };
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    write_sine_wav(&src.path().join("tone.wav"), 48_000, 16, 0.25);

    let config = AppConfig::with_defaults(FormatProfile::Wav, src.path(), dest.path());
    tools::run_with_transcoder(FormatProfile::Wav, &config, &transcoder).unwrap();

    let probed = probe_output(&dest.path().join("tone.aiff")).unwrap();
    assert_eq!(probed.sample_rate, 48_000);
    assert_eq!(probed.bits_per_sample, 24);
}

/// 验证损坏的源文件记为失败，批处理继续
#[test]
fn test_corrupt_input_recorded_as_failure() {
    let Some(transcoder) = ffmpeg_or_skip() else {
        return;
    };
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    std::fs::write(src.path().join("a-corrupt.wav"), b"definitely not RIFF").unwrap();
    write_sine_wav(&src.path().join("b-good.wav"), 44_100, 16, 0.25);

    let config = AppConfig::with_defaults(FormatProfile::Wav, src.path(), dest.path());
    let outcome = tools::run_with_transcoder(FormatProfile::Wav, &config, &transcoder).unwrap();

    assert_eq!(outcome.stats.failed, 1);
    assert_eq!(outcome.stats.processed, 1);
    assert!(dest.path().join("b-good.aiff").exists());
}

//! 命令行解析与退出码测试

use lossless2aiff::audio::FormatProfile;
use lossless2aiff::tools::{self, parse_args_from};
use std::fs;
use std::path::{Path, PathBuf};

fn parse(profile: FormatProfile, args: &[&str]) -> tools::AppConfig {
    let mut argv = vec![profile.tool_name()];
    argv.extend_from_slice(args);
    parse_args_from(profile, argv).expect("参数应能解析")
}

// ============================================================================
// 参数解析
// ============================================================================

#[test]
fn test_positionals_and_defaults() {
    let config = parse(FormatProfile::Flac, &["in", "out"]);
    assert_eq!(config.source_dir, PathBuf::from("in"));
    assert_eq!(config.dest_dir, PathBuf::from("out"));
    assert_eq!(config.sample_rate, None);
    assert_eq!(config.bit_depth, None);
    assert!(!config.verbose);
    assert!(!config.fail_on_error);
}

#[test]
fn test_dsd_profile_defaults() {
    let config = parse(FormatProfile::Dsd, &["in", "out"]);
    assert_eq!(config.sample_rate, Some(176_400));
    assert_eq!(config.bit_depth, Some(24));
}

/// 验证 `--redbook` 与显式参数按出现顺序后者优先
#[test]
fn test_redbook_precedence_by_position() {
    let later_explicit = parse(FormatProfile::Wav, &["--redbook", "-r", "48000", "in", "out"]);
    assert_eq!(later_explicit.sample_rate, Some(48_000));
    assert_eq!(later_explicit.bit_depth, Some(16));

    let later_preset = parse(FormatProfile::Wav, &["-b", "24", "--redbook", "in", "out"]);
    assert_eq!(later_preset.sample_rate, Some(44_100));
    assert_eq!(later_preset.bit_depth, Some(16));

    let dsd = parse(FormatProfile::Dsd, &["--redbook", "in", "out"]);
    assert_eq!(dsd.sample_rate, Some(44_100));
    assert_eq!(dsd.bit_depth, Some(16));
}

/// 验证重复选项以最后一次为准
#[test]
fn test_repeated_option_last_wins() {
    let config = parse(FormatProfile::Flac, &["-r", "48000", "-r", "96000", "in", "out"]);
    assert_eq!(config.sample_rate, Some(96_000));
}

#[test]
fn test_ambient_options() {
    let config = parse(
        FormatProfile::Flac,
        &[
            "--verbose",
            "--ffmpeg",
            "/opt/ffmpeg/bin/ffmpeg",
            "--report",
            "r.json",
            "--log-file",
            "run.log",
            "--fail-on-error",
            "in",
            "out",
        ],
    );
    assert!(config.verbose);
    assert!(config.fail_on_error);
    assert_eq!(config.ffmpeg_path, Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg")));
    assert_eq!(config.report_path, Some(PathBuf::from("r.json")));
    assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
}

// ============================================================================
// 退出码
// ============================================================================

#[test]
fn test_help_and_version_exit_zero() {
    assert_eq!(tools::run_from(FormatProfile::Dsd, ["dsd2aiff", "-h"]), 0);
    assert_eq!(tools::run_from(FormatProfile::Dsd, ["dsd2aiff", "--version"]), 0);
}

#[test]
fn test_missing_positionals_exit_one() {
    assert_eq!(tools::run_from(FormatProfile::Flac, ["flac2aiff"]), 1);
    assert_eq!(tools::run_from(FormatProfile::Flac, ["flac2aiff", "in"]), 1);
}

/// 验证选项写在位置参数之后视为用法错误
#[test]
fn test_options_after_positionals_exit_one() {
    assert_eq!(tools::run_from(FormatProfile::Flac, ["flac2aiff", "in", "out", "-r"]), 1);
    assert_eq!(
        tools::run_from(FormatProfile::Flac, ["flac2aiff", "src", "dst", "-r", "48000"]),
        1
    );
    assert_eq!(
        tools::run_from(FormatProfile::Flac, ["flac2aiff", "src", "dst", "--redbook"]),
        1
    );
}

#[test]
fn test_options_after_positionals_not_parsed() {
    for args in [
        ["flac2aiff", "src", "dst", "--redbook"],
        ["flac2aiff", "src", "--redbook", "dst"],
    ] {
        assert!(parse_args_from(FormatProfile::Flac, args).is_err(), "{args:?}");
    }
}

/// 验证源目录不存在时退出码1，且不创建目标目录
#[test]
fn test_nonexistent_source_exit_one() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("nope");
    let dest = tmp.path().join("dest");

    let code = tools::run_from(
        FormatProfile::Wav,
        [
            "wav2aiff".into(),
            src.into_os_string(),
            dest.clone().into_os_string(),
        ],
    );
    assert_eq!(code, 1);
    assert!(!dest.exists());
}

/// 验证非法位深退出码1，且不创建目标目录
#[test]
fn test_invalid_bit_depth_exit_one() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("a.wav"), b"data").unwrap();
    let dest = tmp.path().join("dest");

    let code = tools::run_from(
        FormatProfile::Wav,
        [
            "wav2aiff".into(),
            "-b".into(),
            "20".into(),
            src.into_os_string(),
            dest.clone().into_os_string(),
        ],
    );
    assert_eq!(code, 1);
    assert!(!dest.exists());
}

/// 验证指定的FFmpeg不可用时退出码1，且不创建目标目录
#[test]
fn test_unusable_ffmpeg_exit_one() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("a.flac"), b"data").unwrap();
    let dest = tmp.path().join("dest");
    let bogus = tmp.path().join("no-such-ffmpeg");

    let code = tools::run_from(
        FormatProfile::Flac,
        [
            "flac2aiff".into(),
            "--ffmpeg".into(),
            bogus.into_os_string(),
            src.into_os_string(),
            dest.clone().into_os_string(),
        ],
    );
    assert_eq!(code, 1);
    assert!(!dest.exists());
}

// ============================================================================
// 端到端：脚本模拟的FFmpeg
// ============================================================================

/// 写出一个模拟FFmpeg的shell脚本：`-version` 成功；输入名含 "broken" 时失败，
/// 否则在最后一个参数（输出路径）写入占位AIFF
#[cfg(unix)]
fn write_fake_ffmpeg(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-ffmpeg");
    fs::write(
        &script,
        r#"#!/bin/sh
if [ "$1" = "-version" ]; then
  echo "ffmpeg version fake"
  exit 0
fi
input="$6"
for output; do :; done
case "$input" in
  *broken*)
    echo "$input: Invalid data found when processing input" >&2
    exit 1
    ;;
esac
printf 'FORM' > "$output"
"#,
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[cfg(unix)]
fn album_with_one_broken_track(root: &Path) -> PathBuf {
    let src = root.join("album");
    fs::create_dir(&src).unwrap();
    for name in ["01 a.flac", "02 broken.flac", "03 c.flac"] {
        fs::write(src.join(name), b"data").unwrap();
    }
    src
}

/// 验证部分文件失败时完整流程仍以0退出
#[cfg(unix)]
#[test]
fn test_partial_failure_exits_zero_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let ffmpeg = write_fake_ffmpeg(tmp.path());
    let src = album_with_one_broken_track(tmp.path());
    let dest = tmp.path().join("out").join("album");

    let code = tools::run_from(
        FormatProfile::Flac,
        [
            "flac2aiff".into(),
            "--ffmpeg".into(),
            ffmpeg.into_os_string(),
            src.into_os_string(),
            dest.clone().into_os_string(),
        ],
    );

    assert_eq!(code, 0);
    assert!(dest.join("01 a.aiff").exists());
    assert!(!dest.join("02 broken.aiff").exists());
    assert!(dest.join("03 c.aiff").exists());
}

/// 验证 `--fail-on-error` 时部分失败以3退出
#[cfg(unix)]
#[test]
fn test_fail_on_error_exits_three_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let ffmpeg = write_fake_ffmpeg(tmp.path());
    let src = album_with_one_broken_track(tmp.path());
    let dest = tmp.path().join("out");

    let code = tools::run_from(
        FormatProfile::Flac,
        [
            "flac2aiff".into(),
            "--fail-on-error".into(),
            "--ffmpeg".into(),
            ffmpeg.into_os_string(),
            src.into_os_string(),
            dest.clone().into_os_string(),
        ],
    );

    assert_eq!(code, 3);
    assert!(dest.join("03 c.aiff").exists());
}

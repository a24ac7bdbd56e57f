//! 命令行接口模块
//!
//! 负责命令行参数解析、配置管理和程序信息展示。
//! `--redbook` 与 `-r/-b` 按出现顺序生效（后出现者覆盖）。

use crate::audio::{ConversionConfig, FormatProfile};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 位置参数（源目录、目标目录）
const PATHS: &str = "PATHS";

/// FFmpeg路径覆盖的环境变量
pub const FFMPEG_ENV_VAR: &str = "LOSSLESS2AIFF_FFMPEG";

/// 应用程序配置（原始命令行值，尚未校验）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 源目录
    pub source_dir: PathBuf,

    /// 目标目录（不存在时自动创建）
    pub dest_dir: PathBuf,

    /// 目标采样率（None = 保持源采样率）
    pub sample_rate: Option<u32>,

    /// 目标位深原始值（校验阶段只接受16/24）
    pub bit_depth: Option<u32>,

    /// 是否显示详细信息
    pub verbose: bool,

    /// 指定FFmpeg可执行文件
    pub ffmpeg_path: Option<PathBuf>,

    /// JSON批量报告输出路径
    pub report_path: Option<PathBuf>,

    /// 日志文件路径
    pub log_file: Option<PathBuf>,

    /// 任一文件失败时以非零退出码结束
    pub fail_on_error: bool,
}

impl AppConfig {
    /// 使用档案默认值创建配置
    pub fn with_defaults(
        profile: FormatProfile,
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            sample_rate: profile.default_sample_rate(),
            bit_depth: profile.default_bit_depth(),
            verbose: false,
            ffmpeg_path: None,
            report_path: None,
            log_file: None,
            fail_on_error: false,
        }
    }
}

fn defaults_help(profile: FormatProfile) -> String {
    let rate = profile
        .default_sample_rate()
        .map(|r| format!("{r} Hz"))
        .unwrap_or_else(|| "保持原始 / preserve original".to_string());
    let depth = profile
        .default_bit_depth()
        .map(|d| format!("{d}-bit"))
        .unwrap_or_else(|| "保持原始 / preserve original".to_string());
    format!(
        "默认值 / Defaults:\n  采样率 / sample rate: {rate}\n  位深 / bit depth:     {depth}\n\n\
         源格式 / Source format: {} (.{})",
        profile.display_name(),
        profile.extensions().join(", .")
    )
}

/// 构建命令定义
pub fn build_command(profile: FormatProfile) -> Command {
    Command::new(profile.tool_name())
        .version(VERSION)
        .about(format!(
            "将{0}文件批量转换为AIFF / Batch convert {0} files to AIFF",
            profile.display_name()
        ))
        .author("lossless2aiff Team")
        .args_override_self(true)
        .after_help(defaults_help(profile))
        .arg(
            // 第一个非选项参数之后的所有内容都按位置参数处理，数量由 parse_args_from 检查
            Arg::new(PATHS)
                .help("源文件夹与目标文件夹（目标自动创建）/ Source folder and destination folder (created if missing)")
                .required(true)
                .value_names(["SOURCE", "DESTINATION"])
                .num_args(1..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("sample_rate")
                .long("sample-rate")
                .short('r')
                .value_name("HZ")
                .help("输出采样率 / Output sample rate in Hz")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("bit_depth")
                .long("bit-depth")
                .short('b')
                .value_name("16|24")
                .help("输出位深 / Output bit depth")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("redbook")
                .long("redbook")
                .help("CD标准 44.1kHz/16位 / Red Book preset (44100 Hz, 16-bit)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("显示详细处理信息 / Verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ffmpeg")
                .long("ffmpeg")
                .value_name("PATH")
                .env(FFMPEG_ENV_VAR)
                .help("FFmpeg可执行文件路径 / Path to the ffmpeg executable")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .value_name("FILE")
                .help("写出JSON批量报告 / Write a JSON batch report")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log_file")
                .long("log-file")
                .value_name("FILE")
                .help("同时写入日志文件 / Also append logs to FILE")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("fail_on_error")
                .long("fail-on-error")
                .help("任一文件失败时退出码为3 / Exit with code 3 if any file fails")
                .action(ArgAction::SetTrue),
        )
}

/// 按出现顺序合并显式值与 `--redbook` 预设
fn resolve_last_wins(
    matches: &ArgMatches,
    id: &str,
    redbook_index: Option<usize>,
    redbook_value: Option<u32>,
    default: Option<u32>,
) -> Option<u32> {
    let explicit = matches
        .get_one::<u32>(id)
        .copied()
        .map(|value| (value, matches.index_of(id).unwrap_or(0)));

    match (explicit, redbook_index) {
        (Some((value, index)), Some(preset_index)) if index > preset_index => Some(value),
        (_, Some(_)) => redbook_value,
        (Some((value, _)), None) => Some(value),
        (None, None) => default,
    }
}

/// 取出恰好两个位置参数，否则返回用法错误
fn positional_paths(
    command: &mut Command,
    matches: &ArgMatches,
) -> Result<(PathBuf, PathBuf), clap::Error> {
    let paths: Vec<PathBuf> = matches
        .get_many::<PathBuf>(PATHS)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    match <[PathBuf; 2]>::try_from(paths) {
        Ok([source, destination]) => Ok((source, destination)),
        Err(paths) => Err(command.error(
            ErrorKind::WrongNumberOfValues,
            format!(
                "需要恰好两个位置参数（源目录、目标目录），选项必须写在它们之前 / \
                 expected exactly 2 positional arguments <SOURCE> <DESTINATION> with options \
                 before them, got {}: {}",
                paths.len(),
                paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
        )),
    }
}

/// 从解析结果和位置参数创建配置
fn config_from_matches(
    profile: FormatProfile,
    matches: &ArgMatches,
    source_dir: PathBuf,
    dest_dir: PathBuf,
) -> AppConfig {
    let redbook_index = matches
        .get_flag("redbook")
        .then(|| matches.index_of("redbook").unwrap_or(0));
    let preset = ConversionConfig::redbook();

    AppConfig {
        source_dir,
        dest_dir,
        sample_rate: resolve_last_wins(
            matches,
            "sample_rate",
            redbook_index,
            preset.sample_rate_hz,
            profile.default_sample_rate(),
        ),
        bit_depth: resolve_last_wins(
            matches,
            "bit_depth",
            redbook_index,
            preset.bit_depth.map(|d| d.bits()),
            profile.default_bit_depth(),
        ),
        verbose: matches.get_flag("verbose"),
        ffmpeg_path: matches.get_one::<PathBuf>("ffmpeg").cloned(),
        report_path: matches.get_one::<PathBuf>("report").cloned(),
        log_file: matches.get_one::<PathBuf>("log_file").cloned(),
        fail_on_error: matches.get_flag("fail_on_error"),
    }
}

/// 解析命令行参数（第一个元素为程序名）
///
/// 第一个非选项参数结束选项解析，之后必须恰好剩下两个位置参数。
/// 帮助/版本请求同样以 `clap::Error` 返回，由调用方决定退出码。
pub fn parse_args_from<I, T>(profile: FormatProfile, args: I) -> Result<AppConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = build_command(profile);
    let matches = command.try_get_matches_from_mut(args)?;
    let (source_dir, dest_dir) = positional_paths(&mut command, &matches)?;
    Ok(config_from_matches(profile, &matches, source_dir, dest_dir))
}

/// 显示程序启动信息
pub fn show_startup_info(profile: FormatProfile, config: &AppConfig) {
    println!("{} v{VERSION}", profile.tool_name());
    println!("📁 源目录 / Source:      {}", config.source_dir.display());
    println!("📂 目标目录 / Destination: {}", config.dest_dir.display());
    println!();
}

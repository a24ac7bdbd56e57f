//! 统一错误处理框架
//!
//! 命令行用法错误由clap报告；这里区分程序级错误（校验/依赖，直接退出）与单文件转换错误（记录后继续批处理）。

use std::fmt;
use std::io;

/// 转换流程相关的统一错误类型
#[derive(Debug)]
pub enum ConvertError {
    /// 输入校验错误（位深非法、源目录不存在）
    InvalidInput(String),

    /// 外部转码工具不可用
    MissingDependency(String),

    /// 文件I/O错误
    IoError(io::Error),

    /// 外部转码工具对单个文件返回失败
    TranscodeError(String),

    /// 输出文件格式探测错误
    FormatError(String),

    /// 批量报告写出错误
    ReportError(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::InvalidInput(msg) => write!(f, "输入验证失败 / Invalid input: {msg}"),
            ConvertError::MissingDependency(msg) => {
                write!(f, "缺少依赖 / Missing dependency: {msg}")
            }
            ConvertError::IoError(err) => write!(f, "文件I/O错误 / I/O error: {err}"),
            ConvertError::TranscodeError(msg) => write!(f, "转码失败 / Transcode failed: {msg}"),
            ConvertError::FormatError(msg) => write!(f, "音频格式错误 / Format error: {msg}"),
            ConvertError::ReportError(msg) => write!(f, "报告写出失败 / Report error: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ConvertError {
    fn from(err: io::Error) -> Self {
        ConvertError::IoError(err)
    }
}

impl From<walkdir::Error> for ConvertError {
    fn from(err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        match err.into_io_error() {
            Some(io_err) => {
                ConvertError::IoError(io::Error::new(io_err.kind(), format!("{path}: {io_err}")))
            }
            None => ConvertError::IoError(io::Error::other(format!(
                "目录遍历失败（符号链接循环）/ Directory walk failed (symlink loop): {path}"
            ))),
        }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::ReportError(err.to_string())
    }
}

/// 转换操作的标准Result类型
pub type ConvertResult<T> = Result<T, ConvertError>;

// ==================== 错误转换Helper函数 ====================

/// 创建格式错误的helper函数
#[inline]
pub fn format_error<E: fmt::Display>(context: &str, err: E) -> ConvertError {
    ConvertError::FormatError(format!("{context}: {err}"))
}

/// 创建转码错误的helper函数
#[inline]
pub fn transcode_error<E: fmt::Display>(context: &str, err: E) -> ConvertError {
    ConvertError::TranscodeError(format!("{context}: {err}"))
}

// ==================== 错误分类系统 ====================

/// 错误类别枚举（用于批量处理统计和退出码映射）
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum ErrorCategory {
    /// 校验错误（位深、源目录）
    Validation,
    /// 外部依赖缺失
    Dependency,
    /// I/O相关错误（无法启动进程、权限不足等）
    Io,
    /// 转码工具返回非零退出码
    Transcode,
    /// 其他未分类错误
    Other,
}

impl ErrorCategory {
    /// 从ConvertError提取错误类别
    pub fn from_convert_error(e: &ConvertError) -> Self {
        match e {
            ConvertError::InvalidInput(_) => Self::Validation,
            ConvertError::MissingDependency(_) => Self::Dependency,
            ConvertError::IoError(_) => Self::Io,
            ConvertError::TranscodeError(_) => Self::Transcode,
            ConvertError::FormatError(_) | ConvertError::ReportError(_) => Self::Other,
        }
    }

    /// 获取错误类别的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Validation => "校验错误 / validation",
            Self::Dependency => "依赖缺失 / dependency",
            Self::Io => "I/O错误 / I/O",
            Self::Transcode => "转码错误 / transcode",
            Self::Other => "其他错误 / other",
        }
    }
}

/// 退出码定义
pub mod exit_codes {
    /// 正常完成（包括部分文件转换失败）
    pub const SUCCESS: i32 = 0;
    /// 用法、校验、依赖或I/O错误
    pub const GENERAL_ERROR: i32 = 1;
    /// 启用 --fail-on-error 且至少一个文件转换失败
    pub const PARTIAL_FAILURE: i32 = 3;
}

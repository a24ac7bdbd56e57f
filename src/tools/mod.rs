//! 工具模块集合
//!
//! 包含CLI、校验、扫描、转码调度、封面解析和汇总输出，支持各命令行入口的流程控制。

pub mod app;
pub mod batch_state;
pub mod cli;
pub mod constants;
pub mod cover;
pub mod formatter;
pub mod processor;
pub mod scanner;
pub mod utils;
pub mod validator;

// 重新导出主要的公共接口
pub use app::{RunOutcome, execute, run, run_from, run_with_transcoder};
pub use batch_state::BatchStats;
pub use cli::{AppConfig, parse_args_from, show_startup_info};
pub use cover::{CopiedCover, CoverSearchResult, find_cover, resolve_cover};
pub use formatter::{BatchReport, DestinationSummary, summarize_destination, write_report};
pub use processor::{ConversionJob, JobStatus, convert_all, create_jobs};
pub use scanner::{scan_source_files, show_scan_results};
pub use validator::validate;

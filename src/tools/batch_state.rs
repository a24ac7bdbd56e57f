//! 批处理状态模块
//!
//! 单线程串行统计：成功/失败计数以及按错误类别归档的失败文件。

use crate::error::ErrorCategory;
use std::collections::BTreeMap;

/// 批处理统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// 成功转换的文件数
    pub processed: usize,
    /// 失败的文件数
    pub failed: usize,
    /// 错误类别 -> 失败文件名（按类别排序输出）
    pub error_stats: BTreeMap<ErrorCategory, Vec<String>>,
}

impl BatchStats {
    pub fn record_success(&mut self) {
        self.processed += 1;
    }

    pub fn record_failure(&mut self, category: ErrorCategory, filename: String) {
        self.failed += 1;
        self.error_stats.entry(category).or_default().push(filename);
    }
}

//! 工具函数模块
//!
//! 提供文件路径处理、扩展名判断、容量格式化等通用工具函数。

/// 文件路径处理工具函数
pub mod path {
    use std::path::Path;

    /// 提取文件名（返回String，用于日志显示）
    #[inline]
    pub fn extract_filename_lossy(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// 安全提取文件stem（返回String）
    #[inline]
    pub fn extract_file_stem_string(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio".to_string())
    }

    /// 扩展名是否属于列表（不区分大小写）
    #[inline]
    pub fn has_extension_ignore_case(path: &Path, extensions: &[&str]) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    /// 扩展名是否属于列表（区分大小写）
    #[inline]
    pub fn has_extension_exact(path: &Path, extensions: &[&str]) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext))
    }

    /// 小写文件名（用于不区分大小写的匹配）
    #[inline]
    pub fn lowercase_filename(path: &Path) -> String {
        extract_filename_lossy(path).to_lowercase()
    }
}

/// 容量格式化工具函数
pub mod size {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];

    /// 将字节数格式化为人类可读字符串（1024进制）
    pub fn format_bytes(bytes: u64) -> String {
        if bytes < 1024 {
            return format!("{bytes} B");
        }

        let mut value = bytes as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
        format!("{value:.1} {}", UNITS[unit])
    }
}

// 重新导出为平级函数
pub use path::{
    extract_file_stem_string, extract_filename_lossy, has_extension_exact,
    has_extension_ignore_case, lowercase_filename,
};
pub use size::format_bytes;

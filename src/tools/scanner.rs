//! 文件扫描模块
//!
//! 单层（不递归）扫描目录，按文件名排序，并按规范化路径去重，
//! 避免大小写不敏感文件系统上同一文件被重复匹配。
//! 无法解析的子项（例如失效的符号链接）只跳过，不影响其余文件。

use crate::audio::FormatProfile;
use crate::error::{ConvertError, ConvertResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 列出目录下的直接子文件（按文件名排序，跟随符号链接）
///
/// 只有目录本身无法读取时返回错误。
pub fn list_files(dir_path: &Path) -> ConvertResult<Vec<PathBuf>> {
    if !dir_path.is_dir() {
        return Err(ConvertError::InvalidInput(format!(
            "路径不是目录 / not a directory: {}",
            dir_path.display()
        )));
    }

    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir_path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                log::warn!(
                    "跳过无法解析的条目 / Skipping unresolvable entry: {}",
                    ConvertError::from(e)
                );
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        let key = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if seen.insert(key) {
            files.push(path);
        }
    }

    Ok(files)
}

/// 扫描目录中符合档案扩展名的源文件
pub fn scan_source_files(dir_path: &Path, profile: FormatProfile) -> ConvertResult<Vec<PathBuf>> {
    let files = list_files(dir_path)?
        .into_iter()
        .filter(|path| profile.matches_extension(path))
        .collect::<Vec<_>>();

    log::debug!(
        "扫描完成 / Scan finished: {} {} file(s) in {}",
        files.len(),
        profile.display_name(),
        dir_path.display()
    );

    Ok(files)
}

/// 显示文件扫描结果
pub fn show_scan_results(profile: FormatProfile, source_dir: &Path, files: &[PathBuf], verbose: bool) {
    if files.is_empty() {
        log::warn!(
            "在目录 {} 中没有找到{}文件 / No {} files found in {}",
            source_dir.display(),
            profile.display_name(),
            profile.display_name(),
            source_dir.display()
        );
        return;
    }

    println!("🎵 找到 {} 个{}文件 / Found {} file(s)", files.len(), profile.display_name(), files.len());

    if verbose {
        for (i, file) in files.iter().enumerate() {
            println!("   {}. {}", i + 1, super::utils::extract_filename_lossy(file));
        }
    }
    println!();
}

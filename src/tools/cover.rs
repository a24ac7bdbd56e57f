//! 封面解析模块
//!
//! 固定优先级、首个命中即返回的封面搜索：
//! 1. 根目录精确文件名（候选名 × jpg/png）
//! 2. 第一个存在的候选子目录内：文件名含 front/cover 的图片，其次任意 `.jpg`
//! 3. 根目录任意 `.jpg`/`.png`（按文件名排序）
//!
//! 第1、3步以及第2步的兜底都按扩展名原样匹配（区分大小写）。
//!
//! 找不到封面只是警告，不影响退出码。

use super::constants::cover::{
    FRONT_KEYWORDS, IMAGE_EXTENSIONS, ROOT_EXTENSIONS, ROOT_STEMS, SUBFOLDERS,
    SUBFOLDER_FALLBACK_EXTENSION,
};
use super::constants::output::COVER_STEM;
use super::scanner::list_files;
use super::utils;
use crate::error::ConvertResult;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 封面搜索结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverSearchResult {
    pub found_path: PathBuf,
    /// 命中来源描述（用于日志）
    pub source_description: String,
}

/// 已复制的封面
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopiedCover {
    #[serde(flatten)]
    pub search: CoverSearchResult,
    pub destination: PathBuf,
}

fn search_root_exact(source_dir: &Path) -> Option<CoverSearchResult> {
    ROOT_STEMS
        .iter()
        .flat_map(|stem| ROOT_EXTENSIONS.iter().map(move |ext| format!("{stem}.{ext}")))
        .map(|name| source_dir.join(name))
        .find(|candidate| candidate.is_file())
        .map(|found_path| CoverSearchResult {
            source_description: format!(
                "根目录 / root: {}",
                utils::extract_filename_lossy(&found_path)
            ),
            found_path,
        })
}

fn search_subfolders(source_dir: &Path) -> ConvertResult<Option<CoverSearchResult>> {
    let Some((folder_name, folder)) = SUBFOLDERS
        .iter()
        .map(|name| (*name, source_dir.join(name)))
        .find(|(_, path)| path.is_dir())
    else {
        return Ok(None);
    };

    let files = list_files(&folder)?;

    let front = FRONT_KEYWORDS.iter().find_map(|keyword| {
        files.iter().find(|p| {
            utils::has_extension_ignore_case(p, IMAGE_EXTENSIONS)
                && utils::lowercase_filename(p).contains(keyword)
        })
    });
    let found = front.or_else(|| {
        files
            .iter()
            .find(|p| utils::has_extension_exact(p, &[SUBFOLDER_FALLBACK_EXTENSION]))
    });

    Ok(found.map(|path| CoverSearchResult {
        source_description: format!(
            "子目录 / subfolder {folder_name}: {}",
            utils::extract_filename_lossy(path)
        ),
        found_path: path.clone(),
    }))
}

fn search_root_any(source_dir: &Path) -> ConvertResult<Option<CoverSearchResult>> {
    Ok(list_files(source_dir)?
        .into_iter()
        .find(|p| utils::has_extension_exact(p, ROOT_EXTENSIONS))
        .map(|found_path| CoverSearchResult {
            source_description: format!(
                "根目录任意图片 / any root image: {}",
                utils::extract_filename_lossy(&found_path)
            ),
            found_path,
        }))
}

/// 按固定顺序搜索封面
pub fn find_cover(source_dir: &Path) -> ConvertResult<Option<CoverSearchResult>> {
    if let Some(result) = search_root_exact(source_dir) {
        return Ok(Some(result));
    }
    if let Some(result) = search_subfolders(source_dir)? {
        return Ok(Some(result));
    }
    search_root_any(source_dir)
}

/// 计算封面目标路径：`cover.<源扩展名>`（jpeg 归一为 jpg）
pub fn cover_destination(found_path: &Path, dest_dir: &Path) -> PathBuf {
    let ext = found_path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let ext = match ext.as_str() {
        "png" => "png",
        _ => "jpg",
    };
    dest_dir.join(format!("{COVER_STEM}.{ext}"))
}

/// 复制封面到目标目录（不转码图片）
pub fn copy_cover(result: &CoverSearchResult, dest_dir: &Path) -> ConvertResult<CopiedCover> {
    let destination = cover_destination(&result.found_path, dest_dir);
    std::fs::copy(&result.found_path, &destination)?;
    Ok(CopiedCover {
        search: result.clone(),
        destination,
    })
}

/// 搜索并复制封面；任何失败都只记录警告
pub fn resolve_cover(source_dir: &Path, dest_dir: &Path) -> Option<CopiedCover> {
    let found = match find_cover(source_dir) {
        Ok(Some(found)) => found,
        Ok(None) => {
            log::warn!(
                "未找到封面图片 / No cover image found in {}",
                source_dir.display()
            );
            return None;
        }
        Err(e) => {
            log::warn!("封面搜索失败 / Cover search failed: {e}");
            return None;
        }
    };

    log::debug!("封面来源 / Cover source: {}", found.source_description);

    match copy_cover(&found, dest_dir) {
        Ok(copied) => {
            println!(
                "🖼️  封面 / Cover: {} -> {}",
                found.source_description,
                utils::extract_filename_lossy(&copied.destination)
            );
            Some(copied)
        }
        Err(e) => {
            log::warn!(
                "封面复制失败 / Failed to copy cover {}: {e}",
                found.found_path.display()
            );
            None
        }
    }
}

//! 常量和默认配置集中管理
//!
//! 将所有重要常量集中定义，避免"默认值漂移"和重复定义

/// Red Book (CD-DA) 参数
pub mod redbook {
    /// 44.1kHz
    pub const SAMPLE_RATE_HZ: u32 = 44_100;
    /// 16位
    pub const BIT_DEPTH: u32 = 16;
}

/// 输出相关常量
pub mod output {
    /// 输出文件扩展名
    pub const AIFF_EXTENSION: &str = "aiff";

    /// 封面输出文件名（不含扩展名），扩展名沿用源图片
    pub const COVER_STEM: &str = "cover";
}

/// 封面搜索候选列表（顺序即优先级）
pub mod cover {
    /// 根目录精确匹配的文件名主干
    pub const ROOT_STEMS: &[&str] = &[
        "cover", "Cover", "folder", "Folder", "front", "Front", "FRONT", "album", "Album",
        "artwork", "Artwork",
    ];

    /// 根目录精确匹配及兜底搜索的扩展名（区分大小写）
    pub const ROOT_EXTENSIONS: &[&str] = &["jpg", "png"];

    /// 子目录候选（只搜索第一个存在的子目录）
    pub const SUBFOLDERS: &[&str] = &[
        "Covers", "covers", "COVERS", "Cover", "cover", "Artwork", "artwork", "ARTWORK",
        "Scans", "scans", "SCANS",
    ];

    /// 子目录内表示正面封面的文件名关键字（不区分大小写）
    pub const FRONT_KEYWORDS: &[&str] = &["front", "cover"];

    /// 子目录内正面封面关键字匹配时接受的扩展名（不区分大小写）
    pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

    /// 子目录内无关键字命中时的兜底扩展名（区分大小写）
    pub const SUBFOLDER_FALLBACK_EXTENSION: &str = "jpg";
}

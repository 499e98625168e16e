use std::fs;
use std::path::PathBuf;

// 缩略图磁盘缓存目录
pub struct ThumbnailCache {
    pub cache_dir: PathBuf,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("theme-manager")
            .join("thumbnails");

        if let Err(e) = fs::create_dir_all(&cache_dir) {
            log::error!("缓存目录创建失败: {} - {}", cache_dir.display(), e);
        }

        Self { cache_dir }
    }
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::new()
    }
}

// 支持的壁纸扩展名（小写比较）
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

// 固定文件名
pub const SIDECAR_FILE_NAME: &str = "theme.json";
pub const CATALOG_FILE_NAME: &str = "wallpaper_themes.json";
pub const SNAPSHOT_FILE_NAME: &str = "theme_data.json";
pub const TABLE_EXPORT_PREFIX: &str = "wallpaper_themes_";
pub const QUOTES_EXPORT_PREFIX: &str = "quotes_";

// 缺省主题外观
pub const DEFAULT_THEME_ICON: &str = "photo";
pub const DEFAULT_THEME_COLOR: &str = "#007AFF";

// 默认主题配置（根据主题名自动匹配图标、颜色和描述）
pub const DEFAULT_THEME_CONFIGS: &[(&str, &str, &str, &str)] = &[
    ("季节", "leaf.fill", "#FF9500", "四季更迭，感受自然之美"),
    ("风景", "mountain.2.fill", "#34C759", "壮丽山河，心旷神怡"),
    ("美食", "fork.knife", "#FF3B30", "色香味俱全，治愈你的心"),
    ("城市", "building.2.fill", "#5856D6", "都市霓虹，繁华夜景"),
    ("动物", "pawprint.fill", "#AF52DE", "可爱萌宠，治愈心灵"),
    ("花卉", "camera.macro", "#E91E63", "花开四季，芬芳满园"),
    ("海洋", "water.waves", "#00BCD4", "碧海蓝天，心旷神怡"),
    ("星空", "star.fill", "#3F51B5", "璀璨星河，浩瀚宇宙"),
];

// 缩略图设置（PNG 格式，高 DPI 显示用）
pub const THUMBNAIL_SIZE: u32 = 480;

// 图片尺寸上限（防止超大图片耗尽内存）
pub const MAX_IMAGE_DIMENSION: u32 = 65535;
pub const MAX_PIXEL_COUNT: u64 = 100_000_000;

// 内存缓存条数
pub const MEMORY_CACHE_MAX_SIZE: usize = 20;

// 最近项目保留条数
pub const RECENT_PROJECTS_MAX: usize = 10;

/// 根据主题名查默认外观，查不到返回通用默认值 (icon, colorHex, description)
pub fn default_theme_config(name: &str) -> (&'static str, &'static str, &'static str) {
    for &(theme_name, icon, color, description) in DEFAULT_THEME_CONFIGS {
        if theme_name == name {
            return (icon, color, description);
        }
    }
    (DEFAULT_THEME_ICON, DEFAULT_THEME_COLOR, "")
}

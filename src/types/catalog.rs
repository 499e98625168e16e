use serde::{Deserialize, Serialize};

// 主题记录（聚合目录中的形态，字段名与 App 资源文件一致）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color_hex: String,
    pub description: String,
    pub is_premium: bool,
}

// 壁纸记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallpaper {
    #[serde(default)]
    pub id: String,
    pub theme_id: String,
    pub name: String,
    pub image_name: String,
    #[serde(default)]
    pub is_premium: bool,
}

// 聚合目录文件 wallpaper_themes.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WallpaperCatalog {
    pub themes: Vec<Theme>,
    pub wallpapers: Vec<Wallpaper>,
}

// theme.json 中的壁纸条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidecarWallpaper {
    #[serde(default)]
    pub name: String,
    pub file: String,
    #[serde(default)]
    pub is_premium: bool,
}

// 目录内 theme.json 的落盘形态（所有字段齐全）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSidecar {
    pub name: String,
    pub icon: String,
    pub color_hex: String,
    pub description: String,
    pub is_premium: bool,
    pub wallpapers: Vec<SidecarWallpaper>,
}

// theme.json 的解析形态：字段可以缺失，解析后按目录信息补默认值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidecarDoc {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color_hex: Option<String>,
    pub description: Option<String>,
    pub is_premium: Option<bool>,
    #[serde(default)]
    pub wallpapers: Vec<SidecarWallpaper>,
}

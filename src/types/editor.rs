use serde::{Deserialize, Serialize};

use super::Wallpaper;

// 主题分类类型（与 App 端 CategoryType 枚举一致）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    #[default]
    Normal,
    Combined,
    Seasonal,
}

impl CategoryType {
    /// Swift 枚举 case 名（生成 `.normal` 这类字面量时使用）
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Normal => "normal",
            CategoryType::Combined => "combined",
            CategoryType::Seasonal => "seasonal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(CategoryType::Normal),
            "combined" => Some(CategoryType::Combined),
            "seasonal" => Some(CategoryType::Seasonal),
            _ => None,
        }
    }
}

// 编辑器中的主题分类记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color_hex: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_name: String,
    #[serde(default, rename = "type")]
    pub category_type: CategoryType,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

// 编辑器快照文件 theme_data.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub wallpapers: Vec<Wallpaper>,
    #[serde(default)]
    pub updated_at: String,
}

// 加载结果（返回给前端刷新列表）
#[derive(Debug, Clone, Serialize)]
pub struct LoadOutcome {
    pub categories: Vec<Category>,
    pub wallpapers: Vec<Wallpaper>,
    // "snapshot" | "swift" | "empty"
    pub source: String,
    pub message: Option<String>,
}

use std::sync::Mutex;

use serde::Serialize;
use uuid::Uuid;

use crate::cache::ThumbnailMemoryCache;
use crate::types::{Category, Wallpaper};

// 编辑器的内存目录状态：两个有序集合，只被当前正在执行的命令访问
#[derive(Debug, Default, Clone, Serialize)]
pub struct EditorCatalog {
    pub categories: Vec<Category>,
    pub wallpapers: Vec<Wallpaper>,
}

impl EditorCatalog {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.wallpapers.is_empty()
    }

    pub fn replace(&mut self, categories: Vec<Category>, wallpapers: Vec<Wallpaper>) {
        self.categories = categories;
        self.wallpapers = wallpapers;
    }

    pub fn clear(&mut self) {
        self.categories.clear();
        self.wallpapers.clear();
    }

    /// 新增主题分类，缺 id 时自动分配。唯一的校验是名称非空。
    pub fn add_category(&mut self, mut category: Category) -> Result<Category, String> {
        if category.name.is_empty() {
            return Err("请输入名称".to_string());
        }
        if category.id.is_empty() {
            category.id = Uuid::new_v4().to_string();
        }
        self.categories.push(category.clone());
        Ok(category)
    }

    /// 按 id 替换主题分类（不依赖列表位置）
    pub fn update_category(&mut self, category: Category) -> Result<Category, String> {
        if category.name.is_empty() {
            return Err("请输入名称".to_string());
        }
        let slot = self
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| format!("未找到主题分类: {}", category.id))?;
        *slot = category.clone();
        Ok(category)
    }

    pub fn delete_category(&mut self, id: &str) -> Result<(), String> {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return Err(format!("未找到主题分类: {}", id));
        }
        Ok(())
    }

    /// 新增壁纸。themeId 悬空引用按约定容忍，不做校验。
    pub fn add_wallpaper(&mut self, mut wallpaper: Wallpaper) -> Result<Wallpaper, String> {
        if wallpaper.name.is_empty() {
            return Err("请输入名称".to_string());
        }
        if wallpaper.id.is_empty() {
            wallpaper.id = Uuid::new_v4().to_string();
        }
        self.wallpapers.push(wallpaper.clone());
        Ok(wallpaper)
    }

    pub fn update_wallpaper(&mut self, wallpaper: Wallpaper) -> Result<Wallpaper, String> {
        if wallpaper.name.is_empty() {
            return Err("请输入名称".to_string());
        }
        let slot = self
            .wallpapers
            .iter_mut()
            .find(|w| w.id == wallpaper.id)
            .ok_or_else(|| format!("未找到壁纸: {}", wallpaper.id))?;
        *slot = wallpaper.clone();
        Ok(wallpaper)
    }

    pub fn delete_wallpaper(&mut self, id: &str) -> Result<(), String> {
        let before = self.wallpapers.len();
        self.wallpapers.retain(|w| w.id != id);
        if self.wallpapers.len() == before {
            return Err(format!("未找到壁纸: {}", id));
        }
        Ok(())
    }
}

// 应用状态：编辑器目录 + 缩略图内存缓存
pub struct AppState {
    pub catalog: Mutex<EditorCatalog>,
    pub memory_cache: Mutex<ThumbnailMemoryCache>,
}

use std::fs;
use std::path::Path;

use base64::Engine;
use serde::Serialize;
use tauri::State;

use crate::cache::ThumbnailCache;
use crate::constants::{IMAGE_EXTENSIONS, THUMBNAIL_SIZE};
use crate::image_utils::{create_thumbnail, open_validated};
use crate::state::AppState;

/// 缩略图生成结果
#[derive(Serialize)]
pub struct ThumbnailResult {
    /// 缓存键（MD5）
    pub cache_key: String,
    /// base64 data URL，前端直接作为 img src
    pub data_url: String,
    /// "memory" | "disk" | "generated"
    pub status: String,
}

fn to_data_url(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

// 壁纸编辑对话框里的图片预览
#[tauri::command]
pub async fn generate_thumbnail(
    file_path: String,
    modified_time: u64,
    cache: State<'_, ThumbnailCache>,
    app_state: State<'_, AppState>,
) -> Result<ThumbnailResult, String> {
    let input = format!("{}:{}:{}:png", file_path, modified_time, THUMBNAIL_SIZE);
    let cache_key = format!("{:x}", md5::compute(&input));

    // 内存缓存命中直接返回
    {
        let mut memory = app_state
            .memory_cache
            .lock()
            .map_err(|_| "内存缓存锁异常".to_string())?;
        if let Some(data_url) = memory.get(&cache_key) {
            return Ok(ThumbnailResult {
                cache_key,
                data_url,
                status: "memory".to_string(),
            });
        }
    }

    let cache_dir = cache.cache_dir.clone();
    let key = cache_key.clone();

    let (data_url, status) = tokio::task::spawn_blocking(move || {
        let path = Path::new(&file_path);
        if !path.exists() {
            return Err("文件不存在".to_string());
        }

        let cached_path = cache_dir.join(format!("{}.png", key));
        if cached_path.exists() {
            let data = fs::read(&cached_path).map_err(|e| e.to_string())?;
            return Ok((to_data_url(&data), "disk".to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            return Err(format!("不支持的文件格式: {}", ext));
        }

        // 尺寸校验在解码之前完成
        let img = open_validated(path)?;
        let data = create_thumbnail(img)?;
        fs::write(&cached_path, &data).map_err(|e| e.to_string())?;

        Ok((to_data_url(&data), "generated".to_string()))
    })
    .await
    .map_err(|e| e.to_string())??;

    let mut memory = app_state
        .memory_cache
        .lock()
        .map_err(|_| "内存缓存锁异常".to_string())?;
    memory.insert(cache_key.clone(), data_url.clone());

    Ok(ThumbnailResult {
        cache_key,
        data_url,
        status,
    })
}

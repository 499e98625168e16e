use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat};

use crate::constants::{MAX_IMAGE_DIMENSION, MAX_PIXEL_COUNT, THUMBNAIL_SIZE};

// 图片尺寸校验（防止解码超大图片）
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), String> {
    if width == 0 || height == 0 {
        return Err("无效的图片尺寸: 宽或高为 0".to_string());
    }
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(format!(
            "图片尺寸过大: {}x{} (上限: {})",
            width, height, MAX_IMAGE_DIMENSION
        ));
    }
    let pixel_count = (width as u64) * (height as u64);
    if pixel_count > MAX_PIXEL_COUNT {
        return Err(format!(
            "像素数过多: {} (上限: {})",
            pixel_count, MAX_PIXEL_COUNT
        ));
    }
    Ok(())
}

// 先从文件头读尺寸做校验，通过后才真正解码
pub fn open_validated(path: &Path) -> Result<DynamicImage, String> {
    let (width, height) =
        image::image_dimensions(path).map_err(|e| format!("图片读取错误: {}", e))?;
    validate_dimensions(width, height)?;
    image::open(path).map_err(|e| format!("图片读取错误: {}", e))
}

// 生成壁纸预览缩略图（PNG 无损输出，手机壁纸按竖图比例收缩）
pub fn create_thumbnail(img: DynamicImage) -> Result<Vec<u8>, String> {
    use image::imageops::FilterType;

    validate_dimensions(img.width(), img.height())?;

    let thumbnail = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE * 2, FilterType::Triangle);

    let mut buffer = Cursor::new(Vec::new());
    thumbnail
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| format!("缩略图写出错误: {}", e))?;

    Ok(buffer.into_inner())
}

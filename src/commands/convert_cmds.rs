use std::path::Path;

use serde::Serialize;

use crate::catalog::{quotes, tables};

#[derive(Serialize)]
pub struct ImportSummary {
    pub themes: usize,
    pub wallpapers: usize,
}

// 聚合目录 -> 带时间戳的表格文档（themes / wallpapers 两张表）
#[tauri::command]
pub async fn export_catalog_tables(
    catalog_path: String,
    output_dir: String,
) -> Result<String, String> {
    tables::export_catalog_tables(Path::new(&catalog_path), Path::new(&output_dir))
        .map(|p| p.to_string_lossy().to_string())
        .map_err(|e| e.to_string())
}

// 表格文档 -> 聚合目录（固定路径整体覆盖）。document 为空时取最新一份导出。
#[tauri::command]
pub async fn import_catalog_tables(
    document: Option<String>,
    search_dir: String,
    catalog_path: String,
) -> Result<ImportSummary, String> {
    let catalog = tables::import_catalog_tables(
        document.as_deref().map(Path::new),
        Path::new(&search_dir),
        Path::new(&catalog_path),
    )
    .map_err(|e| e.to_string())?;
    Ok(ImportSummary {
        themes: catalog.themes.len(),
        wallpapers: catalog.wallpapers.len(),
    })
}

// quotes.json -> 带时间戳的名言表格（单向导出）
#[tauri::command]
pub async fn export_quotes_table(
    quotes_path: String,
    output_dir: String,
) -> Result<String, String> {
    quotes::export_quotes_table(Path::new(&quotes_path), Path::new(&output_dir))
        .map(|p| p.to_string_lossy().to_string())
        .map_err(|e| e.to_string())
}

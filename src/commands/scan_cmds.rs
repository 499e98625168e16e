use std::path::Path;

use crate::catalog::scanner;
use crate::constants::CATALOG_FILE_NAME;
use crate::types::{ScanPlan, ScanSummary};

// 只读扫描：遍历壁纸目录，返回推导出的目录与计划中的 theme.json 写入
#[tauri::command]
pub async fn scan_wallpaper_directory(wallpapers_dir: String) -> Result<ScanPlan, String> {
    scanner::scan(Path::new(&wallpapers_dir)).map_err(|e| e.to_string())
}

// 应用扫描计划：写入 theme.json，聚合文件以固定名落在输出目录下
#[tauri::command]
pub async fn apply_scan_plan(plan: ScanPlan, output_dir: String) -> Result<ScanSummary, String> {
    let output = Path::new(&output_dir).join(CATALOG_FILE_NAME);
    scanner::apply(&plan, &output).map_err(|e| e.to_string())
}

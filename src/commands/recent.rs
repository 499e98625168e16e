use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::RECENT_PROJECTS_MAX;
use crate::types::RecentProject;

// 配置目录
fn get_config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
        .map(|p| p.join("theme-manager"))
        .ok_or_else(|| "无法确定配置目录".to_string())
}

// 读取列表并过滤掉已不存在的项目目录
fn read_recent(recent_path: &Path) -> Result<Vec<RecentProject>, String> {
    if !recent_path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(recent_path).map_err(|e| format!("读取错误: {}", e))?;
    let recent: Vec<RecentProject> = serde_json::from_str(&content).unwrap_or_default();
    Ok(recent
        .into_iter()
        .filter(|r| Path::new(&r.path).exists())
        .collect())
}

// 去重后插到最前面，超出上限截断
fn push_recent(recent_path: &Path, path: String, name: String) -> Result<(), String> {
    let mut recent = if recent_path.exists() {
        let content = fs::read_to_string(recent_path).map_err(|e| format!("读取错误: {}", e))?;
        serde_json::from_str::<Vec<RecentProject>>(&content).unwrap_or_default()
    } else {
        Vec::new()
    };

    recent.retain(|r| r.path != path);
    recent.insert(
        0,
        RecentProject {
            path,
            name,
            opened_at: chrono::Local::now().to_rfc3339(),
        },
    );
    recent.truncate(RECENT_PROJECTS_MAX);

    if let Some(parent) = recent_path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("目录创建错误: {}", e))?;
    }
    let json =
        serde_json::to_string_pretty(&recent).map_err(|e| format!("JSON 序列化错误: {}", e))?;
    fs::write(recent_path, json).map_err(|e| format!("文件写入错误: {}", e))?;
    Ok(())
}

// 最近打开的项目列表
#[tauri::command]
pub async fn get_recent_projects() -> Result<Vec<RecentProject>, String> {
    let recent_path = get_config_path()?.join("recent_projects.json");
    read_recent(&recent_path)
}

// 记录最近打开的项目
#[tauri::command]
pub async fn add_recent_project(path: String, name: String) -> Result<(), String> {
    let recent_path = get_config_path()?.join("recent_projects.json");
    push_recent(&recent_path, path, name)
}

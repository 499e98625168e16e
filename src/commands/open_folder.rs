use std::path::Path;
use std::process::Command;

/// 在系统文件浏览器中打开项目目录
#[tauri::command]
pub fn open_project_folder(project_path: String) -> Result<(), String> {
    if !Path::new(&project_path).is_dir() {
        return Err(format!("目录不存在: {}", project_path));
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("explorer")
            .arg(&project_path)
            .spawn()
            .map_err(|e| format!("无法打开文件夹: {}", e))?;
    }

    #[cfg(target_os = "macos")]
    {
        Command::new("open")
            .arg(&project_path)
            .spawn()
            .map_err(|e| format!("无法打开文件夹: {}", e))?;
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open")
            .arg(&project_path)
            .spawn()
            .map_err(|e| format!("无法打开文件夹: {}", e))?;
    }

    Ok(())
}

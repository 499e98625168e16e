mod cache;
mod catalog;
mod commands;
mod constants;
mod image_utils;
mod state;
mod thumbnail;
mod types;

use std::sync::Mutex;

use tauri_plugin_log::{Target, TargetKind};

use cache::{ThumbnailCache, ThumbnailMemoryCache};
use constants::MEMORY_CACHE_MAX_SIZE;
use state::{AppState, EditorCatalog};

// Tauri 命令
use commands::convert_cmds::{export_catalog_tables, export_quotes_table, import_catalog_tables};
use commands::editor_cmds::{
    add_category, add_wallpaper, delete_category, delete_wallpaper, export_swift_code,
    get_theme_data, load_theme_data, reload_from_swift, save_theme_data, update_category,
    update_wallpaper,
};
use commands::open_folder::open_project_folder;
use commands::recent::{add_recent_project, get_recent_projects};
use commands::scan_cmds::{apply_scan_plan, scan_wallpaper_directory};
use thumbnail::generate_thumbnail;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    if let Err(e) = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .plugin(
            tauri_plugin_log::Builder::default()
                .targets([
                    Target::new(TargetKind::Stdout),
                    Target::new(TargetKind::LogDir {
                        file_name: Some("theme-manager.log".into()),
                    }),
                    Target::new(TargetKind::Webview),
                ])
                .build(),
        )
        .manage(ThumbnailCache::new())
        .manage(AppState {
            catalog: Mutex::new(EditorCatalog::default()),
            memory_cache: Mutex::new(ThumbnailMemoryCache::new(MEMORY_CACHE_MAX_SIZE)),
        })
        .invoke_handler(tauri::generate_handler![
            load_theme_data,
            reload_from_swift,
            get_theme_data,
            save_theme_data,
            add_category,
            update_category,
            delete_category,
            add_wallpaper,
            update_wallpaper,
            delete_wallpaper,
            export_swift_code,
            scan_wallpaper_directory,
            apply_scan_plan,
            export_catalog_tables,
            import_catalog_tables,
            export_quotes_table,
            generate_thumbnail,
            get_recent_projects,
            add_recent_project,
            open_project_folder,
        ])
        .run(tauri::generate_context!())
    {
        eprintln!("Tauri 应用启动错误: {}", e);
        std::process::exit(1);
    }
}

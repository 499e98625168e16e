use std::path::Path;

use tauri::State;
use uuid::Uuid;

use crate::catalog::{snapshot, swift_gen, swift_parser};
use crate::state::{AppState, EditorCatalog};
use crate::types::{Category, LoadOutcome, Snapshot, Wallpaper};

// App 端样例数据文件，JSON 快照缺失时从这里逆向解析
const SWIFT_SOURCE_RELATIVE: &str = "MotivationApp/Models/Category.swift";

fn ensure_category_ids(mut categories: Vec<Category>) -> Vec<Category> {
    for category in &mut categories {
        if category.id.is_empty() {
            category.id = Uuid::new_v4().to_string();
        }
    }
    categories
}

fn ensure_wallpaper_ids(mut wallpapers: Vec<Wallpaper>) -> Vec<Wallpaper> {
    for wallpaper in &mut wallpapers {
        if wallpaper.id.is_empty() {
            wallpaper.id = Uuid::new_v4().to_string();
        }
    }
    wallpapers
}

// 从 Swift 源码加载主题分类。文件缺失返回 Ok(None)，解析失败返回 Err。
fn load_from_swift(project: &Path) -> Result<Option<Vec<Category>>, String> {
    let source_path = project.join(SWIFT_SOURCE_RELATIVE);
    if !source_path.exists() {
        log::warn!("未找到文件: {}", source_path.display());
        return Ok(None);
    }
    let content = std::fs::read_to_string(&source_path).map_err(|e| e.to_string())?;
    let parsed = swift_parser::parse_categories(&content).map_err(|e| e.to_string())?;
    for entry in &parsed {
        if !entry.defaulted.is_empty() {
            log::info!(
                "主题 {} 的字段使用默认值: {}",
                entry.category.name,
                entry.defaulted.join(", ")
            );
        }
    }
    Ok(Some(ensure_category_ids(
        parsed.into_iter().map(|p| p.category).collect(),
    )))
}

// 加载流程：优先 JSON 快照，损坏或缺失时退回 Swift 解析。
// 两头都失败时保持内存集合为空，并把情况告知操作者。
pub(crate) fn load_catalog(project: &Path) -> Result<LoadOutcome, String> {
    match snapshot::load_snapshot(project) {
        Ok(Some(snap)) => {
            let categories = ensure_category_ids(snap.categories);
            let wallpapers = ensure_wallpaper_ids(snap.wallpapers);
            log::info!(
                "从 JSON 加载了 {} 个主题和 {} 个壁纸",
                categories.len(),
                wallpapers.len()
            );
            return Ok(LoadOutcome {
                categories,
                wallpapers,
                source: "snapshot".to_string(),
                message: None,
            });
        }
        Ok(None) => log::info!("JSON 文件不存在，尝试从 Swift 文件加载数据"),
        Err(e) => log::warn!("加载 JSON 数据失败: {}", e),
    }

    match load_from_swift(project)? {
        Some(categories) => {
            let message = format!("从 Category.swift 加载了 {} 个主题", categories.len());
            log::info!("{}", message);
            Ok(LoadOutcome {
                categories,
                wallpapers: Vec::new(),
                source: "swift".to_string(),
                message: Some(message),
            })
        }
        None => Ok(LoadOutcome {
            categories: Vec::new(),
            wallpapers: Vec::new(),
            source: "empty".to_string(),
            message: Some("未找到可加载的数据，将从空数据开始".to_string()),
        }),
    }
}

fn lock_catalog(state: &AppState) -> Result<std::sync::MutexGuard<'_, EditorCatalog>, String> {
    state.catalog.lock().map_err(|_| "目录状态锁异常".to_string())
}

#[tauri::command]
pub async fn load_theme_data(
    project_path: String,
    state: State<'_, AppState>,
) -> Result<LoadOutcome, String> {
    let outcome = match load_catalog(Path::new(&project_path)) {
        Ok(outcome) => outcome,
        Err(e) => {
            // 加载失败：集合保持为空，由前端弹窗告知
            lock_catalog(&state)?.clear();
            return Err(e);
        }
    };
    lock_catalog(&state)?.replace(outcome.categories.clone(), outcome.wallpapers.clone());
    Ok(outcome)
}

// 显式从 Swift 文件重新加载（会丢弃未保存的更改，确认在前端完成）
#[tauri::command]
pub async fn reload_from_swift(
    project_path: String,
    state: State<'_, AppState>,
) -> Result<LoadOutcome, String> {
    let categories = load_from_swift(Path::new(&project_path))?
        .ok_or_else(|| format!("未找到文件: {}", SWIFT_SOURCE_RELATIVE))?;
    let message = format!("已从 Swift 文件加载 {} 个主题", categories.len());
    let mut catalog = lock_catalog(&state)?;
    catalog.categories = categories.clone();
    Ok(LoadOutcome {
        categories,
        wallpapers: catalog.wallpapers.clone(),
        source: "swift".to_string(),
        message: Some(message),
    })
}

#[tauri::command]
pub async fn get_theme_data(state: State<'_, AppState>) -> Result<EditorCatalog, String> {
    Ok(lock_catalog(&state)?.clone())
}

// 保存流程的纯逻辑部分，便于直接测试
pub(crate) fn save_catalog(project: &Path, catalog: &EditorCatalog) -> Result<String, String> {
    // 空集合不允许悄悄覆盖一份有内容的快照（典型场景：加载失败后直接点保存）
    if catalog.is_empty() {
        if let Ok(Some(existing)) = snapshot::load_snapshot(project) {
            if !existing.categories.is_empty() || !existing.wallpapers.is_empty() {
                return Err("当前数据为空，拒绝覆盖已有快照。请先加载或添加数据。".to_string());
            }
        }
    }
    let mut snap = Snapshot {
        categories: catalog.categories.clone(),
        wallpapers: catalog.wallpapers.clone(),
        updated_at: String::new(),
    };
    let path = snapshot::save_snapshot(project, &mut snap).map_err(|e| e.to_string())?;
    Ok(path.to_string_lossy().to_string())
}

#[tauri::command]
pub async fn save_theme_data(
    project_path: String,
    state: State<'_, AppState>,
) -> Result<String, String> {
    let catalog = lock_catalog(&state)?.clone();
    save_catalog(Path::new(&project_path), &catalog)
}

#[tauri::command]
pub async fn add_category(
    category: Category,
    state: State<'_, AppState>,
) -> Result<Category, String> {
    lock_catalog(&state)?.add_category(category)
}

#[tauri::command]
pub async fn update_category(
    category: Category,
    state: State<'_, AppState>,
) -> Result<Category, String> {
    lock_catalog(&state)?.update_category(category)
}

#[tauri::command]
pub async fn delete_category(id: String, state: State<'_, AppState>) -> Result<(), String> {
    lock_catalog(&state)?.delete_category(&id)
}

#[tauri::command]
pub async fn add_wallpaper(
    wallpaper: Wallpaper,
    state: State<'_, AppState>,
) -> Result<Wallpaper, String> {
    lock_catalog(&state)?.add_wallpaper(wallpaper)
}

#[tauri::command]
pub async fn update_wallpaper(
    wallpaper: Wallpaper,
    state: State<'_, AppState>,
) -> Result<Wallpaper, String> {
    lock_catalog(&state)?.update_wallpaper(wallpaper)
}

#[tauri::command]
pub async fn delete_wallpaper(id: String, state: State<'_, AppState>) -> Result<(), String> {
    lock_catalog(&state)?.delete_wallpaper(&id)
}

// 生成 Swift 代码并写到操作者选择的路径
#[tauri::command]
pub async fn export_swift_code(
    output_path: String,
    state: State<'_, AppState>,
) -> Result<String, String> {
    let categories = lock_catalog(&state)?.categories.clone();
    swift_gen::export_swift_code(&categories, Path::new(&output_path))
        .map_err(|e| e.to_string())?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_swift_source(project: &Path) {
        let model_dir = project.join("MotivationApp/Models");
        fs::create_dir_all(&model_dir).unwrap();
        fs::write(
            model_dir.join("Category.swift"),
            r##"
extension Category {
    static let sampleCategories: [Category] = [
        Category(
            name: "动画",
            icon: "play.circle.fill",
            colorHex: "#4A90E2",
            description: "动态主题组合",
            type: .combined,
            isFeatured: true
        ),
    ]
}
"##,
        )
        .unwrap();
    }

    #[test]
    fn load_prefers_snapshot_over_swift() {
        let dir = TempDir::new().unwrap();
        write_swift_source(dir.path());
        let mut snap = Snapshot {
            categories: vec![Category {
                id: "c1".into(),
                name: "快照里的主题".into(),
                ..Default::default()
            }],
            wallpapers: vec![],
            updated_at: String::new(),
        };
        snapshot::save_snapshot(dir.path(), &mut snap).unwrap();

        let outcome = load_catalog(dir.path()).unwrap();
        assert_eq!(outcome.source, "snapshot");
        assert_eq!(outcome.categories[0].name, "快照里的主题");
    }

    #[test]
    fn load_falls_back_to_swift_when_snapshot_missing() {
        let dir = TempDir::new().unwrap();
        write_swift_source(dir.path());

        let outcome = load_catalog(dir.path()).unwrap();
        assert_eq!(outcome.source, "swift");
        assert_eq!(outcome.categories.len(), 1);
        assert_eq!(outcome.categories[0].name, "动画");
        // 逆向解析出的记录补发了稳定 id
        assert!(!outcome.categories[0].id.is_empty());
        // 缺失的可选字段落回默认值而不是报错
        assert!(!outcome.categories[0].is_new);
    }

    #[test]
    fn load_falls_back_to_swift_when_snapshot_malformed() {
        let dir = TempDir::new().unwrap();
        write_swift_source(dir.path());
        let snap_path = snapshot::snapshot_path(dir.path());
        fs::create_dir_all(snap_path.parent().unwrap()).unwrap();
        fs::write(&snap_path, "损坏的 JSON").unwrap();

        let outcome = load_catalog(dir.path()).unwrap();
        assert_eq!(outcome.source, "swift");
    }

    #[test]
    fn load_reports_empty_when_nothing_is_found() {
        let dir = TempDir::new().unwrap();
        let outcome = load_catalog(dir.path()).unwrap();
        assert_eq!(outcome.source, "empty");
        assert!(outcome.categories.is_empty());
        assert!(outcome.message.is_some());
    }

    #[test]
    fn empty_state_must_not_overwrite_existing_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut snap = Snapshot {
            categories: vec![Category {
                id: "c1".into(),
                name: "有效数据".into(),
                ..Default::default()
            }],
            wallpapers: vec![],
            updated_at: String::new(),
        };
        snapshot::save_snapshot(dir.path(), &mut snap).unwrap();

        // 模拟加载失败后的空状态直接保存
        let err = save_catalog(dir.path(), &EditorCatalog::default()).unwrap_err();
        assert!(err.contains("拒绝覆盖"));

        // 原快照毫发无损
        let existing = snapshot::load_snapshot(dir.path()).unwrap().unwrap();
        assert_eq!(existing.categories[0].name, "有效数据");
    }

    #[test]
    fn empty_state_may_create_a_fresh_snapshot() {
        let dir = TempDir::new().unwrap();
        // 没有旧快照时，空数据保存是合法的初始化动作
        let path = save_catalog(dir.path(), &EditorCatalog::default()).unwrap();
        assert!(Path::new(&path).exists());
    }

    #[test]
    fn save_writes_both_collections_and_timestamp() {
        let dir = TempDir::new().unwrap();
        let mut catalog = EditorCatalog::default();
        catalog
            .add_category(Category {
                name: "季节".into(),
                ..Default::default()
            })
            .unwrap();
        catalog
            .add_wallpaper(Wallpaper {
                id: String::new(),
                theme_id: "t1".into(),
                name: "冬日雪景".into(),
                image_name: "冬日雪景".into(),
                is_premium: false,
            })
            .unwrap();

        save_catalog(dir.path(), &catalog).unwrap();
        let snap = snapshot::load_snapshot(dir.path()).unwrap().unwrap();
        assert_eq!(snap.categories.len(), 1);
        assert_eq!(snap.wallpapers.len(), 1);
        assert!(!snap.updated_at.is_empty());
    }
}

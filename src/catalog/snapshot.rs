use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::SNAPSHOT_FILE_NAME;
use crate::types::Snapshot;

use super::error::{CatalogError, CatalogResult};

/// 编辑器快照的固定位置：{项目根}/tools/theme_data.json
pub fn snapshot_path(project_path: &Path) -> PathBuf {
    project_path.join("tools").join(SNAPSHOT_FILE_NAME)
}

/// 读取快照。文件不存在返回 Ok(None)，存在但损坏返回 Err。
pub fn load_snapshot(project_path: &Path) -> CatalogResult<Option<Snapshot>> {
    let path = snapshot_path(project_path);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let snapshot = serde_json::from_str(&content)
        .map_err(|e| CatalogError::MalformedStructure(format!("{}: {}", path.display(), e)))?;
    Ok(Some(snapshot))
}

/// 整体覆盖写入快照，附带保存时间戳
pub fn save_snapshot(project_path: &Path, snapshot: &mut Snapshot) -> CatalogResult<PathBuf> {
    let path = snapshot_path(project_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    snapshot.updated_at = chrono::Local::now().to_rfc3339();
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use tempfile::TempDir;

    #[test]
    fn missing_snapshot_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_snapshot(dir.path()).unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut snapshot = Snapshot {
            categories: vec![Category {
                id: "c1".into(),
                name: "星空".into(),
                ..Default::default()
            }],
            wallpapers: vec![],
            updated_at: String::new(),
        };
        save_snapshot(dir.path(), &mut snapshot).unwrap();
        assert!(!snapshot.updated_at.is_empty());

        let loaded = load_snapshot(dir.path()).unwrap().unwrap();
        assert_eq!(loaded.categories.len(), 1);
        assert_eq!(loaded.categories[0].name, "星空");
        assert_eq!(loaded.updated_at, snapshot.updated_at);
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = snapshot_path(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "损坏的内容").unwrap();
        assert!(matches!(
            load_snapshot(dir.path()).unwrap_err(),
            CatalogError::MalformedStructure(_)
        ));
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::TABLE_EXPORT_PREFIX;
use crate::types::{Theme, Wallpaper, WallpaperCatalog};

use super::error::{CatalogError, CatalogResult};
use super::scanner::{read_catalog, write_catalog};

// 往返转换声明的列集合，顺序固定
const THEME_COLUMNS: &[&str] = &["id", "name", "icon", "colorHex", "description", "isPremium"];
const WALLPAPER_COLUMNS: &[&str] = &["id", "themeId", "name", "imageName", "isPremium"];

const THEMES_TABLE: &str = "themes.csv";
const WALLPAPERS_TABLE: &str = "wallpapers.csv";

/// 把聚合目录导出成表格文档：一个带时间戳的目录，内含 themes / wallpapers 两张表。
/// 时间戳保证重复导出互不覆盖。
pub fn export_catalog_tables(catalog_path: &Path, out_dir: &Path) -> CatalogResult<PathBuf> {
    let catalog = read_catalog(catalog_path)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let document = out_dir.join(format!("{}{}", TABLE_EXPORT_PREFIX, timestamp));
    fs::create_dir_all(&document)?;

    let mut themes = csv::Writer::from_path(document.join(THEMES_TABLE))?;
    themes.write_record(THEME_COLUMNS)?;
    for t in &catalog.themes {
        themes.write_record([
            t.id.as_str(),
            t.name.as_str(),
            t.icon.as_str(),
            t.color_hex.as_str(),
            t.description.as_str(),
            if t.is_premium { "true" } else { "false" },
        ])?;
    }
    themes.flush().map_err(CatalogError::from)?;

    let mut wallpapers = csv::Writer::from_path(document.join(WALLPAPERS_TABLE))?;
    wallpapers.write_record(WALLPAPER_COLUMNS)?;
    for w in &catalog.wallpapers {
        wallpapers.write_record([
            w.id.as_str(),
            w.theme_id.as_str(),
            w.name.as_str(),
            w.image_name.as_str(),
            if w.is_premium { "true" } else { "false" },
        ])?;
    }
    wallpapers.flush().map_err(CatalogError::from)?;

    log::info!(
        "表格已导出: {} （themes {} 条，wallpapers {} 条）",
        document.display(),
        catalog.themes.len(),
        catalog.wallpapers.len()
    );
    Ok(document)
}

/// 表格单元格的布尔规整：1/0、true/false（大小写不限）、yes/no 都收敛成 bool
pub fn coerce_bool(cell: &str) -> CatalogResult<bool> {
    match cell.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(CatalogError::MalformedStructure(format!(
            "无法识别的布尔值: {}",
            other
        ))),
    }
}

// 按表头名定位声明列，缺列立即失败
fn column_indexes(
    table: &str,
    headers: &csv::StringRecord,
    required: &[&str],
) -> CatalogResult<Vec<usize>> {
    required
        .iter()
        .map(|col| {
            headers
                .iter()
                .position(|h| h == *col)
                .ok_or_else(|| {
                    CatalogError::MalformedStructure(format!("{} 缺少列: {}", table, col))
                })
        })
        .collect()
}

fn open_table(document: &Path, table: &str) -> CatalogResult<csv::Reader<fs::File>> {
    let path = document.join(table);
    if !path.exists() {
        return Err(CatalogError::MalformedStructure(format!(
            "文档中缺少表格: {}",
            table
        )));
    }
    Ok(csv::Reader::from_path(path)?)
}

fn cell<'a>(record: &'a csv::StringRecord, index: usize) -> &'a str {
    record.get(index).unwrap_or("")
}

/// 在工具目录下查找最新的导出文档（按名字里的时间戳倒序）
pub fn find_latest_document(search_dir: &Path) -> CatalogResult<PathBuf> {
    let mut candidates: Vec<_> = fs::read_dir(search_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_dir()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with(TABLE_EXPORT_PREFIX))
                    .unwrap_or(false)
        })
        .collect();
    candidates.sort();
    candidates.pop().ok_or_else(|| {
        CatalogError::MissingInput(format!(
            "未找到 {}* 导出文档，请先执行表格导出",
            TABLE_EXPORT_PREFIX
        ))
    })
}

/// 把表格文档读回聚合目录并整体覆盖写入固定路径。
/// `document` 为空时取 `search_dir` 下最新的一份导出。
pub fn import_catalog_tables(
    document: Option<&Path>,
    search_dir: &Path,
    catalog_path: &Path,
) -> CatalogResult<WallpaperCatalog> {
    let document = match document {
        Some(path) => {
            if !path.is_dir() {
                return Err(CatalogError::MissingInput(format!(
                    "文档不存在: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => find_latest_document(search_dir)?,
    };
    log::info!("读取表格文档: {}", document.display());

    let mut catalog = WallpaperCatalog::default();

    let mut themes = open_table(&document, THEMES_TABLE)?;
    let idx = column_indexes(THEMES_TABLE, themes.headers()?, THEME_COLUMNS)?;
    for record in themes.records() {
        let record = record?;
        catalog.themes.push(Theme {
            id: cell(&record, idx[0]).to_string(),
            name: cell(&record, idx[1]).to_string(),
            icon: cell(&record, idx[2]).to_string(),
            color_hex: cell(&record, idx[3]).to_string(),
            description: cell(&record, idx[4]).to_string(),
            is_premium: coerce_bool(cell(&record, idx[5]))?,
        });
    }

    let mut wallpapers = open_table(&document, WALLPAPERS_TABLE)?;
    let idx = column_indexes(WALLPAPERS_TABLE, wallpapers.headers()?, WALLPAPER_COLUMNS)?;
    for record in wallpapers.records() {
        let record = record?;
        catalog.wallpapers.push(Wallpaper {
            id: cell(&record, idx[0]).to_string(),
            theme_id: cell(&record, idx[1]).to_string(),
            name: cell(&record, idx[2]).to_string(),
            image_name: cell(&record, idx[3]).to_string(),
            is_premium: coerce_bool(cell(&record, idx[4]))?,
        });
    }

    write_catalog(&catalog, catalog_path)?;
    log::info!(
        "已生成: {} （themes {} 条，wallpapers {} 条）",
        catalog_path.display(),
        catalog.themes.len(),
        catalog.wallpapers.len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_catalog() -> WallpaperCatalog {
        WallpaperCatalog {
            themes: vec![
                Theme {
                    id: "00000001-0000-0000-0000-000000000001".into(),
                    name: "季节".into(),
                    icon: "leaf.fill".into(),
                    color_hex: "#FF9500".into(),
                    description: "四季更迭，感受自然之美".into(),
                    is_premium: false,
                },
                Theme {
                    id: "00000003-0000-0000-0000-000000000001".into(),
                    name: "星空".into(),
                    icon: "star.fill".into(),
                    color_hex: "#3F51B5".into(),
                    description: "璀璨星河".into(),
                    is_premium: true,
                },
            ],
            wallpapers: vec![Wallpaper {
                id: "00000030-0000-0000-0000-000000000001".into(),
                theme_id: "00000003-0000-0000-0000-000000000001".into(),
                name: "银河".into(),
                image_name: "银河".into(),
                is_premium: true,
            }],
        }
    }

    #[test]
    fn round_trip_preserves_declared_columns() {
        let dir = TempDir::new().unwrap();
        let catalog_path = dir.path().join("wallpaper_themes.json");
        write_catalog(&sample_catalog(), &catalog_path).unwrap();

        let document = export_catalog_tables(&catalog_path, dir.path()).unwrap();
        let imported =
            import_catalog_tables(Some(document.as_path()), dir.path(), &catalog_path).unwrap();

        assert_eq!(imported, sample_catalog());
        // 固定路径上的聚合文件也被覆盖更新
        assert_eq!(read_catalog(&catalog_path).unwrap(), sample_catalog());
    }

    #[test]
    fn import_picks_latest_document_when_unspecified() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("wallpaper_themes_20240101_000000");
        let new = dir.path().join("wallpaper_themes_20250101_000000");
        for d in [&old, &new] {
            std::fs::create_dir(d).unwrap();
            std::fs::write(
                d.join("themes.csv"),
                "id,name,icon,colorHex,description,isPremium\n",
            )
            .unwrap();
        }
        std::fs::write(
            old.join("wallpapers.csv"),
            "id,themeId,name,imageName,isPremium\na,b,旧,img,1\n",
        )
        .unwrap();
        std::fs::write(
            new.join("wallpapers.csv"),
            "id,themeId,name,imageName,isPremium\na,b,新,img,0\n",
        )
        .unwrap();

        let catalog_path = dir.path().join("out.json");
        let imported = import_catalog_tables(None, dir.path(), &catalog_path).unwrap();
        assert_eq!(imported.wallpapers[0].name, "新");
    }

    #[test]
    fn boolean_cells_coerce_from_all_sources() {
        for v in ["1", "true", "TRUE", "True", "yes", "YES"] {
            assert!(coerce_bool(v).unwrap(), "{}", v);
        }
        for v in ["0", "false", "FALSE", "no", "NO", ""] {
            assert!(!coerce_bool(v).unwrap(), "{}", v);
        }
        assert!(coerce_bool("大概").is_err());
    }

    #[test]
    fn missing_column_fails_import() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("wallpaper_themes_20250101_000000");
        std::fs::create_dir(&doc).unwrap();
        // themes 表缺少 isPremium 列
        std::fs::write(
            doc.join("themes.csv"),
            "id,name,icon,colorHex,description\n",
        )
        .unwrap();
        std::fs::write(
            doc.join("wallpapers.csv"),
            "id,themeId,name,imageName,isPremium\n",
        )
        .unwrap();

        let err = import_catalog_tables(
            Some(doc.as_path()),
            dir.path(),
            &dir.path().join("out.json"),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::MalformedStructure(_)));
    }

    #[test]
    fn missing_table_fails_import() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("wallpaper_themes_20250101_000000");
        std::fs::create_dir(&doc).unwrap();
        std::fs::write(
            doc.join("themes.csv"),
            "id,name,icon,colorHex,description,isPremium\n",
        )
        .unwrap();

        let err = import_catalog_tables(
            Some(doc.as_path()),
            dir.path(),
            &dir.path().join("out.json"),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::MalformedStructure(_)));
    }

    #[test]
    fn missing_input_fails_with_diagnostic() {
        let dir = TempDir::new().unwrap();
        let err = import_catalog_tables(None, dir.path(), &dir.path().join("out.json"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::MissingInput(_)));

        let err =
            export_catalog_tables(&dir.path().join("缺失.json"), dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingInput(_)));
    }

    #[test]
    fn extra_columns_are_dropped_not_corrupted() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("wallpaper_themes_20250101_000000");
        std::fs::create_dir(&doc).unwrap();
        // 声明列之外的 note 列被忽略，顺序也允许打乱
        std::fs::write(
            doc.join("themes.csv"),
            "note,name,id,icon,colorHex,description,isPremium\n备注,季节,t1,leaf.fill,#FF9500,描述,yes\n",
        )
        .unwrap();
        std::fs::write(
            doc.join("wallpapers.csv"),
            "id,themeId,name,imageName,isPremium\n",
        )
        .unwrap();

        let imported = import_catalog_tables(
            Some(doc.as_path()),
            dir.path(),
            &dir.path().join("out.json"),
        )
        .unwrap();
        assert_eq!(imported.themes[0].id, "t1");
        assert_eq!(imported.themes[0].name, "季节");
        assert!(imported.themes[0].is_premium);
    }
}

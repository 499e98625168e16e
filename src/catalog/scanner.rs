use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{default_theme_config, IMAGE_EXTENSIONS, SIDECAR_FILE_NAME};
use crate::types::{
    ScanPlan, ScanSummary, SidecarDoc, SidecarWallpaper, SidecarWrite, SidecarWriteReason, Theme,
    ThemeSidecar, Wallpaper, WallpaperCatalog,
};

use super::error::{CatalogError, CatalogResult};
use super::format_uuid;

// 目录命名规则：序号_主题名 或 序号_$主题名（$ 表示整个主题付费）
static THEME_DIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)_(\$?)(.+)$").expect("主题目录正则不合法"));

/// 解析主题目录名，返回 (序号, 主题名, 是否付费)。不匹配返回 None。
pub fn parse_theme_dir_name(dir_name: &str) -> Option<(u64, String, bool)> {
    let caps = THEME_DIR_RE.captures(dir_name)?;
    let ordinal: u64 = caps.get(1)?.as_str().parse().ok()?;
    Some((
        ordinal,
        caps.get(3)?.as_str().to_string(),
        caps.get(2)?.as_str() == "$",
    ))
}

/// 解析壁纸文件主干名，返回 (壁纸名, 是否付费)。$ 前缀表示单张付费。
pub fn parse_wallpaper_stem(stem: &str) -> (String, bool) {
    match stem.strip_prefix('$') {
        Some(rest) => (rest.to_string(), true),
        None => (stem.to_string(), false),
    }
}

// 扫描目录中的壁纸图片，按文件名自然顺序
fn scan_images_in_dir(theme_dir: &Path) -> CatalogResult<Vec<SidecarWallpaper>> {
    let mut entries: Vec<_> = fs::read_dir(theme_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort_by(|a, b| {
        natord::compare(
            &a.file_name().unwrap_or_default().to_string_lossy(),
            &b.file_name().unwrap_or_default().to_string_lossy(),
        )
    });

    let mut images = Vec::new();
    for path in entries {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();
        let (name, is_premium) = parse_wallpaper_stem(&stem);
        images.push(SidecarWallpaper {
            name,
            // 去掉 $ 前缀后的主干名即资源名
            file: stem.trim_start_matches('$').to_string(),
            is_premium,
        });
    }
    Ok(images)
}

// 把解析出的 theme.json（字段可缺失）按目录信息补全成落盘形态
fn resolve_sidecar(
    doc: SidecarDoc,
    theme_name: &str,
    dir_premium: bool,
    scanned: &[SidecarWallpaper],
) -> (ThemeSidecar, bool) {
    let mut filled = false;
    let mut wallpapers = doc.wallpapers;
    // 自愈合并：声明列表为空而目录里确实有图片时，以扫描结果为准
    if wallpapers.is_empty() && !scanned.is_empty() {
        wallpapers = scanned.to_vec();
        filled = true;
    }
    let sidecar = ThemeSidecar {
        name: doc.name.unwrap_or_else(|| theme_name.to_string()),
        icon: doc
            .icon
            .unwrap_or_else(|| crate::constants::DEFAULT_THEME_ICON.to_string()),
        color_hex: doc
            .color_hex
            .unwrap_or_else(|| crate::constants::DEFAULT_THEME_COLOR.to_string()),
        description: doc.description.unwrap_or_default(),
        is_premium: doc.is_premium.unwrap_or(dir_premium),
        wallpapers,
    };
    (sidecar, filled)
}

/// 纯扫描阶段：遍历壁纸根目录，推导聚合目录与待写入的 theme.json 列表。
/// 不产生任何磁盘写入，落盘由 [`apply`] 负责。
pub fn scan(root: &Path) -> CatalogResult<ScanPlan> {
    if !root.is_dir() {
        return Err(CatalogError::MissingInput(format!(
            "目录不存在: {}",
            root.display()
        )));
    }

    let mut dirs: Vec<_> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort_by(|a, b| {
        natord::compare(
            &a.file_name().unwrap_or_default().to_string_lossy(),
            &b.file_name().unwrap_or_default().to_string_lossy(),
        )
    });

    let mut plan = ScanPlan::default();

    for theme_dir in dirs {
        let dir_name = theme_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let Some((ordinal, theme_name, dir_premium)) = parse_theme_dir_name(&dir_name) else {
            log::warn!("跳过目录 {}：目录名格式不正确（应为 序号_主题名）", dir_name);
            plan.skipped_dirs.push(dir_name);
            continue;
        };
        if ordinal == 0 {
            log::warn!("跳过目录 {}：序号不能为 0", dir_name);
            plan.skipped_dirs.push(dir_name);
            continue;
        }

        let scanned = scan_images_in_dir(&theme_dir)?;
        let sidecar_path = theme_dir.join(SIDECAR_FILE_NAME);

        let sidecar = if sidecar_path.exists() {
            // theme.json 损坏视为整次运行失败，不做按目录隔离
            let content = fs::read_to_string(&sidecar_path)?;
            let doc: SidecarDoc = serde_json::from_str(&content).map_err(|e| {
                CatalogError::MalformedStructure(format!("{}: {}", sidecar_path.display(), e))
            })?;
            let (sidecar, filled) = resolve_sidecar(doc, &theme_name, dir_premium, &scanned);
            if filled {
                plan.sidecar_writes.push(SidecarWrite {
                    path: sidecar_path.to_string_lossy().to_string(),
                    sidecar: sidecar.clone(),
                    reason: SidecarWriteReason::WallpapersFilled,
                });
            }
            sidecar
        } else {
            // 没有 theme.json 时按主题名查默认外观并计划新建
            let (icon, color, description) = default_theme_config(&theme_name);
            let sidecar = ThemeSidecar {
                name: theme_name.clone(),
                icon: icon.to_string(),
                color_hex: color.to_string(),
                description: description.to_string(),
                is_premium: dir_premium,
                wallpapers: scanned.clone(),
            };
            plan.sidecar_writes.push(SidecarWrite {
                path: sidecar_path.to_string_lossy().to_string(),
                sidecar: sidecar.clone(),
                reason: SidecarWriteReason::Created,
            });
            sidecar
        };

        let theme_id = format_uuid(ordinal, 1);
        plan.catalog.themes.push(Theme {
            id: theme_id.clone(),
            name: sidecar.name.clone(),
            icon: sidecar.icon.clone(),
            color_hex: sidecar.color_hex.clone(),
            description: sidecar.description.clone(),
            is_premium: sidecar.is_premium,
        });

        for (seq, wp) in sidecar.wallpapers.iter().enumerate() {
            let seq = (seq + 1) as u64;
            plan.catalog.wallpapers.push(Wallpaper {
                id: format_uuid(ordinal * 10, seq),
                theme_id: theme_id.clone(),
                name: if wp.name.is_empty() {
                    format!("壁纸{}", seq)
                } else {
                    wp.name.clone()
                },
                image_name: wp.file.clone(),
                is_premium: wp.is_premium,
            });
        }

        log::info!("{}: {} 张壁纸", dir_name, sidecar.wallpapers.len());
    }

    Ok(plan)
}

/// 应用阶段：写入计划中的 theme.json，然后整体覆盖聚合目录文件。
pub fn apply(plan: &ScanPlan, output_path: &Path) -> CatalogResult<ScanSummary> {
    for write in &plan.sidecar_writes {
        let json = serde_json::to_string_pretty(&write.sidecar)?;
        fs::write(&write.path, json)?;
        match write.reason {
            SidecarWriteReason::Created => log::info!("已生成: {}", write.path),
            SidecarWriteReason::WallpapersFilled => log::info!("已更新壁纸列表: {}", write.path),
        }
    }

    write_catalog(&plan.catalog, output_path)?;
    log::info!(
        "已生成: {} （主题 {} 个，壁纸 {} 张）",
        output_path.display(),
        plan.catalog.themes.len(),
        plan.catalog.wallpapers.len()
    );

    Ok(ScanSummary {
        themes: plan.catalog.themes.len(),
        wallpapers: plan.catalog.wallpapers.len(),
        sidecars_written: plan.sidecar_writes.len(),
        output_path: output_path.to_string_lossy().to_string(),
    })
}

/// 读取聚合目录文件
pub fn read_catalog(path: &Path) -> CatalogResult<WallpaperCatalog> {
    if !path.exists() {
        return Err(CatalogError::MissingInput(format!(
            "文件不存在: {}",
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;
    let catalog = serde_json::from_str(&content)
        .map_err(|e| CatalogError::MalformedStructure(format!("{}: {}", path.display(), e)))?;
    Ok(catalog)
}

/// 整体覆盖写入聚合目录文件
pub fn write_catalog(catalog: &WallpaperCatalog, path: &Path) -> CatalogResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(catalog)?;
    fs::write(path, json)?;
    Ok(())
}

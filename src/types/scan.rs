use serde::{Deserialize, Serialize};

use super::{ThemeSidecar, WallpaperCatalog};

// 计划写入 theme.json 的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidecarWriteReason {
    // 目录中没有 theme.json，需要新建
    Created,
    // theme.json 存在但壁纸列表为空，用扫描结果补全
    WallpapersFilled,
}

// 一条待执行的 theme.json 写入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidecarWrite {
    pub path: String,
    pub sidecar: ThemeSidecar,
    pub reason: SidecarWriteReason,
}

// 扫描阶段的产物：只描述将要发生的事情，不落盘
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanPlan {
    pub catalog: WallpaperCatalog,
    pub sidecar_writes: Vec<SidecarWrite>,
    // 被跳过的目录名（命名不符合 序号_主题名 规则）
    pub skipped_dirs: Vec<String>,
}

// apply 之后的统计
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub themes: usize,
    pub wallpapers: usize,
    pub sidecars_written: usize,
    pub output_path: String,
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::QUOTES_EXPORT_PREFIX;
use crate::types::Quote;

use super::error::{CatalogError, CatalogResult};

// 名言表的固定 6 列表头
const QUOTE_COLUMNS: &[&str] = &["ID", "内容", "作者", "分类", "是否收藏", "创建日期"];

/// 把 quotes.json 单向导出为带时间戳的表格文件。没有反向导入路径。
pub fn export_quotes_table(quotes_path: &Path, out_dir: &Path) -> CatalogResult<PathBuf> {
    if !quotes_path.exists() {
        return Err(CatalogError::MissingInput(format!(
            "文件不存在: {}",
            quotes_path.display()
        )));
    }
    let content = fs::read_to_string(quotes_path)?;
    let quotes: Vec<Quote> = serde_json::from_str(&content).map_err(|e| {
        CatalogError::MalformedStructure(format!("{}: {}", quotes_path.display(), e))
    })?;

    fs::create_dir_all(out_dir)?;
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let output = out_dir.join(format!("{}{}.csv", QUOTES_EXPORT_PREFIX, timestamp));

    let mut writer = csv::Writer::from_path(&output)?;
    writer.write_record(QUOTE_COLUMNS)?;
    for quote in &quotes {
        writer.write_record([
            quote.id.as_str(),
            quote.content.as_str(),
            quote.author.as_str(),
            quote.category_id.as_str(),
            if quote.is_favorite { "是" } else { "否" },
            quote.created_date.as_str(),
        ])?;
    }
    writer.flush().map_err(CatalogError::from)?;

    log::info!("转换完成，文件已保存为: {} （{} 条）", output.display(), quotes.len());
    Ok(output)
}

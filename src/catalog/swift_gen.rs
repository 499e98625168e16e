use std::fs;
use std::path::Path;

use crate::types::Category;

use super::error::CatalogResult;

// 生成的字符串字面量里转义引号和反斜杠
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// 把主题分类集合渲染回 App 端的 sampleCategories 字面量。
/// 字段顺序固定，布尔用小写字面量，tags 渲染为引号字符串的逗号序列。
pub fn generate_swift_code(categories: &[Category]) -> String {
    let mut body = String::from("    static let sampleCategories: [Category] = [\n");
    for cat in categories {
        let tags = cat
            .tags
            .iter()
            .map(|tag| format!("\"{}\"", escape(tag)))
            .collect::<Vec<_>>()
            .join(", ");
        body.push_str(&format!(
            r#"        Category(
            name: "{name}",
            icon: "{icon}",
            colorHex: "{color}",
            description: "{description}",
            imageName: "{image}",
            type: .{category_type},
            isNew: {is_new},
            isFeatured: {is_featured},
            tags: [{tags}]
        ),
"#,
            name = escape(&cat.name),
            icon = escape(&cat.icon),
            color = escape(&cat.color_hex),
            description = escape(&cat.description),
            image = escape(&cat.image_name),
            category_type = cat.category_type.as_str(),
            is_new = cat.is_new,
            is_featured = cat.is_featured,
            tags = tags,
        ));
    }
    body.push_str("    ]\n");

    format!(
        r#"//
//  GeneratedThemeData.swift
//  MotivationApp
//
//  Auto-generated on {timestamp}
//

import Foundation
import SwiftUI

// MARK: - Category Sample Data
extension Category {{
{body}}}
"#,
        timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        body = body,
    )
}

/// 生成并写出到操作者选择的路径
pub fn export_swift_code(categories: &[Category], output_path: &Path) -> CatalogResult<()> {
    let code = generate_swift_code(categories);
    fs::write(output_path, code)?;
    log::info!("Swift 代码已导出到: {}", output_path.display());
    Ok(())
}

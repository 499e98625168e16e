//! Category.swift 中 sampleCategories 字面量的逆向解析。
//!
//! 不再用正则堆叠做最努力匹配，而是按文档化的语法做一个小型递归下降解析：
//!
//! ```text
//! array  := '[' entry ( ',' entry )* ','? ']'
//! entry  := 'Category' '(' field ( ',' field )* ','? ')'
//! field  := ident ':' value
//! value  := string | bool | '.' ident | '[' string ( ',' string )* ','? ']' | 其他平衡表达式
//! ```
//!
//! 每条记录都带标记：哪些字段真实解析到，哪些字段落回了默认值。
//! 语法形状不符时报带行号的解析错误，绝不静默产出半截记录。

use crate::types::{Category, CategoryType};

use super::error::{CatalogError, CatalogResult};

// 解析结果：记录本体 + 落回默认值的字段名
#[derive(Debug, Clone)]
pub struct ParsedCategory {
    pub category: Category,
    pub defaulted: Vec<&'static str>,
}

/// 在整份 Swift 源码里定位 sampleCategories 数组并解析全部记录。
/// 没有 name 的记录与原工具一致，直接丢弃（会打警告日志）。
pub fn parse_categories(source: &str) -> CatalogResult<Vec<ParsedCategory>> {
    let marker = source.find("sampleCategories").ok_or_else(|| {
        CatalogError::ParseFailure("未找到 sampleCategories 数组".to_string())
    })?;
    let after = &source[marker..];
    let eq = after.find('=').ok_or_else(|| {
        CatalogError::ParseFailure("sampleCategories 声明缺少 =".to_string())
    })?;
    let bracket = after[eq..].find('[').ok_or_else(|| {
        CatalogError::ParseFailure("sampleCategories 声明缺少 [".to_string())
    })?;

    // 行号从数组起点之前的内容算起
    let offset = marker + eq + bracket;
    let base_line = source[..offset].matches('\n').count();
    let mut parser = Parser::new(&source[offset..], base_line + 1);
    parser.parse_array()
}

// 字段值的结构化形态
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Str(String),
    Bool(bool),
    EnumCase(String),
    StrArray(Vec<String>),
    // UUID()、Color(...) 这类不关心的平衡表达式
    Other,
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    base_line: usize,
}

impl Parser {
    fn new(input: &str, base_line: usize) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            base_line,
        }
    }

    fn error(&self, message: &str) -> CatalogError {
        let line = self.base_line
            + self.chars[..self.pos.min(self.chars.len())]
                .iter()
                .filter(|c| **c == '\n')
                .count();
        CatalogError::ParseFailure(format!("第 {} 行: {}", line, message))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    // 跳过空白和 // 注释
    fn skip_trivia(&mut self) {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.pos += 1;
            }
            if self.peek() == Some('/') && self.chars.get(self.pos + 1) == Some(&'/') {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.pos += 1;
                }
                continue;
            }
            break;
        }
    }

    fn expect(&mut self, expected: char) -> CatalogResult<()> {
        self.skip_trivia();
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(&format!("期望 '{}'，遇到 '{}'", expected, c))),
            None => Err(self.error(&format!("期望 '{}'，源码意外结束", expected))),
        }
    }

    fn ident(&mut self) -> CatalogResult<String> {
        self.skip_trivia();
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("期望标识符"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn string(&mut self) -> CatalogResult<String> {
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('0') => out.push('\0'),
                    Some(c) => out.push(c),
                    None => return Err(self.error("字符串未闭合")),
                },
                Some(c) => out.push(c),
                None => return Err(self.error("字符串未闭合")),
            }
        }
    }

    // 跳过一段平衡表达式，直到深度 0 的 ',' 或 ')' 为止（不消费终结符）
    fn skip_balanced(&mut self) -> CatalogResult<()> {
        let mut depth = 0usize;
        loop {
            self.skip_trivia();
            match self.peek() {
                Some(',') | Some(')') if depth == 0 => return Ok(()),
                Some('(') | Some('[') => {
                    depth += 1;
                    self.pos += 1;
                }
                Some(')') | Some(']') => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| self.error("括号不平衡"))?;
                    self.pos += 1;
                }
                Some('"') => {
                    self.string()?;
                }
                Some(_) => {
                    self.pos += 1;
                }
                None => return Err(self.error("表达式未结束")),
            }
        }
    }

    fn value(&mut self) -> CatalogResult<Value> {
        self.skip_trivia();
        match self.peek() {
            Some('"') => Ok(Value::Str(self.string()?)),
            Some('.') => {
                self.pos += 1;
                Ok(Value::EnumCase(self.ident()?))
            }
            Some('[') => {
                self.pos += 1;
                let mut items = Vec::new();
                loop {
                    self.skip_trivia();
                    if self.peek() == Some(']') {
                        self.pos += 1;
                        return Ok(Value::StrArray(items));
                    }
                    items.push(self.string()?);
                    self.skip_trivia();
                    if self.peek() == Some(',') {
                        self.pos += 1;
                    }
                }
            }
            Some(c) if c.is_alphanumeric() || c == '_' => {
                let word = self.ident()?;
                match word.as_str() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "nil" => Ok(Value::Other),
                    // UUID() / Color(red:...) 等构造调用，整体跳过
                    _ => {
                        self.skip_balanced()?;
                        Ok(Value::Other)
                    }
                }
            }
            _ => {
                self.skip_balanced()?;
                Ok(Value::Other)
            }
        }
    }

    fn parse_entry(&mut self) -> CatalogResult<Option<ParsedCategory>> {
        let head = self.ident()?;
        if head != "Category" {
            return Err(self.error(&format!("期望 Category 构造调用，遇到 {}", head)));
        }
        self.expect('(')?;

        let mut fields: Vec<(String, Value)> = Vec::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some(')') {
                self.pos += 1;
                break;
            }
            let name = self.ident()?;
            self.expect(':')?;
            let value = self.value()?;
            fields.push((name, value));
            self.skip_trivia();
            if self.peek() == Some(',') {
                self.pos += 1;
            }
        }

        build_category(fields).map_err(|msg| self.error(&msg))
    }

    fn parse_array(&mut self) -> CatalogResult<Vec<ParsedCategory>> {
        self.expect('[')?;
        let mut entries = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                Some(']') => {
                    self.pos += 1;
                    return Ok(entries);
                }
                Some(_) => {
                    if let Some(parsed) = self.parse_entry()? {
                        entries.push(parsed);
                    }
                    self.skip_trivia();
                    if self.peek() == Some(',') {
                        self.pos += 1;
                    }
                }
                None => return Err(self.error("数组未闭合")),
            }
        }
    }
}

// 把解析到的字段装配成记录，缺失字段落默认值并留下标记
fn build_category(
    fields: Vec<(String, Value)>,
) -> Result<Option<ParsedCategory>, String> {
    let mut category = Category::default();
    let mut defaulted: Vec<&'static str> = Vec::new();

    let take = |key: &str| -> Option<Value> {
        fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.clone())
    };

    fn string_field(
        key: &'static str,
        value: Option<Value>,
        defaulted: &mut Vec<&'static str>,
    ) -> Result<String, String> {
        match value {
            Some(Value::Str(s)) => Ok(s),
            Some(other) => Err(format!("字段 {} 应为字符串字面量，实际是 {:?}", key, other)),
            None => {
                defaulted.push(key);
                Ok(String::new())
            }
        }
    }

    category.name = string_field("name", take("name"), &mut defaulted)?;
    category.icon = string_field("icon", take("icon"), &mut defaulted)?;
    category.color_hex = string_field("colorHex", take("colorHex"), &mut defaulted)?;
    category.description = string_field("description", take("description"), &mut defaulted)?;
    category.image_name = string_field("imageName", take("imageName"), &mut defaulted)?;

    match take("type") {
        Some(Value::EnumCase(case)) => {
            category.category_type = CategoryType::parse(&case)
                .ok_or_else(|| format!("未知的主题类型: .{}", case))?;
        }
        Some(other) => return Err(format!("字段 type 应为枚举 case，实际是 {:?}", other)),
        None => defaulted.push("type"),
    }

    for (key, marker) in [("isNew", "isNew"), ("isFeatured", "isFeatured")] {
        match take(key) {
            Some(Value::Bool(b)) => {
                if key == "isNew" {
                    category.is_new = b;
                } else {
                    category.is_featured = b;
                }
            }
            Some(other) => {
                return Err(format!("字段 {} 应为布尔字面量，实际是 {:?}", key, other))
            }
            None => defaulted.push(marker),
        }
    }

    match take("tags") {
        Some(Value::StrArray(tags)) => category.tags = tags,
        Some(other) => return Err(format!("字段 tags 应为字符串数组，实际是 {:?}", other)),
        None => defaulted.push("tags"),
    }

    if category.name.is_empty() {
        log::warn!("跳过没有 name 的 Category 记录");
        return Ok(None);
    }
    Ok(Some(ParsedCategory {
        category,
        defaulted,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
import Foundation

extension Category {
    static let sampleCategories: [Category] = [
        Category(
            name: "动画",
            icon: "play.circle.fill",
            colorHex: "#4A90E2",
            description: "动态主题组合",
            imageName: "theme_animation",
            type: .combined,
            isNew: false,
            isFeatured: true,
            tags: ["组合"]
        ),
        Category(
            name: "季节",
            icon: "leaf.fill",
            colorHex: "#7ED321",
            description: "四季主题",
            imageName: "theme_season",
            type: .combined,
            isNew: false,
            isFeatured: true,
            tags: ["组合", "季节"]
        ),
    ]
}
"##;

    #[test]
    fn parses_all_entries_with_fields() {
        let parsed = parse_categories(SAMPLE).unwrap();
        assert_eq!(parsed.len(), 2);

        let first = &parsed[0].category;
        assert_eq!(first.name, "动画");
        assert_eq!(first.icon, "play.circle.fill");
        assert_eq!(first.color_hex, "#4A90E2");
        assert_eq!(first.image_name, "theme_animation");
        assert_eq!(first.category_type, CategoryType::Combined);
        assert!(!first.is_new);
        assert!(first.is_featured);
        assert_eq!(first.tags, vec!["组合"]);
        assert!(parsed[0].defaulted.is_empty());

        assert_eq!(parsed[1].category.tags, vec!["组合", "季节"]);
    }

    #[test]
    fn missing_optional_fields_default_with_markers() {
        let source = r##"
let sampleCategories: [Category] = [
    Category(
        name: "动力",
        icon: "flame.fill",
        colorHex: "#FF6B6B",
        description: "激励你追求梦想"
    ),
]
"##;
        let parsed = parse_categories(source).unwrap();
        assert_eq!(parsed.len(), 1);
        let entry = &parsed[0];
        assert_eq!(entry.category.category_type, CategoryType::Normal);
        assert!(!entry.category.is_featured);
        assert!(!entry.category.is_new);
        assert!(entry.category.tags.is_empty());
        assert_eq!(
            entry.defaulted,
            vec!["imageName", "type", "isNew", "isFeatured", "tags"]
        );
    }

    #[test]
    fn skips_unknown_constructor_arguments() {
        let source = r##"
static let sampleCategories: [Category] = [
    Category(
        id: UUID(),
        name: "海洋",
        icon: "water.waves",
        colorHex: "#00BCD4",
        description: "碧海蓝天",
        sortWeight: 3
    ),
]
"##;
        let parsed = parse_categories(source).unwrap();
        assert_eq!(parsed[0].category.name, "海洋");
    }

    #[test]
    fn entries_without_name_are_dropped() {
        let source = r##"
static let sampleCategories: [Category] = [
    Category(
        icon: "photo",
        colorHex: "#007AFF",
        description: "无名"
    ),
]
"##;
        assert!(parse_categories(source).unwrap().is_empty());
    }

    #[test]
    fn missing_array_is_a_parse_failure() {
        let err = parse_categories("import Foundation\n").unwrap_err();
        assert!(matches!(err, CatalogError::ParseFailure(_)));
    }

    #[test]
    fn broken_syntax_reports_line_number() {
        let source = "static let sampleCategories: [Category] = [\n    Category(\n        name \"缺冒号\"\n    )\n]\n";
        let err = parse_categories(source).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("第 3 行"), "{}", message);
    }

    #[test]
    fn wrong_field_shape_is_an_error_not_a_default() {
        let source = r#"
static let sampleCategories: [Category] = [
    Category(
        name: "季节",
        isNew: "true"
    ),
]
"#;
        assert!(parse_categories(source).is_err());
    }

    #[test]
    fn handles_comments_inside_the_literal() {
        let source = r##"
static let sampleCategories: [Category] = [
    // 第一条
    Category(
        name: "城市", // 夜景
        icon: "building.2.fill",
        colorHex: "#5856D6",
        description: "都市霓虹"
    ),
]
"##;
        let parsed = parse_categories(source).unwrap();
        assert_eq!(parsed[0].category.name, "城市");
    }
}

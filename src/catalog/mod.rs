pub mod error;
pub mod quotes;
pub mod scanner;
pub mod snapshot;
pub mod swift_gen;
pub mod swift_parser;
pub mod tables;

pub use error::CatalogError;

/// 生成结构化 ID：前缀补零到 8 位，序号补零到 12 位。
/// 扫描器用它从目录序号推导主题/壁纸 ID，保证重扫结果稳定。
pub fn format_uuid(prefix: u64, index: u64) -> String {
    format!("{:0>8}-0000-0000-0000-{:0>12}", prefix, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_uuid_pads_prefix_and_index() {
        assert_eq!(format_uuid(3, 1), "00000003-0000-0000-0000-000000000001");
        assert_eq!(format_uuid(30, 12), "00000030-0000-0000-0000-000000000012");
    }
}

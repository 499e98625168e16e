use serde::Serialize;
use thiserror::Error;

// 目录处理层的错误类型，命令边界统一转成字符串弹窗
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("输入不存在: {0}")]
    MissingInput(String),
    #[error("数据结构不正确: {0}")]
    MalformedStructure(String),
    #[error("解析失败: {0}")]
    ParseFailure(String),
    #[error("文件读写错误: {0}")]
    Io(String),
}

impl From<std::io::Error> for CatalogError {
    fn from(error: std::io::Error) -> Self {
        CatalogError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(error: serde_json::Error) -> Self {
        CatalogError::MalformedStructure(error.to_string())
    }
}

impl From<csv::Error> for CatalogError {
    fn from(error: csv::Error) -> Self {
        CatalogError::MalformedStructure(error.to_string())
    }
}

impl Serialize for CatalogError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

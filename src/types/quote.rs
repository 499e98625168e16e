use serde::{Deserialize, Serialize};

// 名言记录（quotes.json 中的形态，仅用于单向导出）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub content: String,
    pub author: String,
    pub category_id: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub created_date: String,
}

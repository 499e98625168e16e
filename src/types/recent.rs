use serde::{Deserialize, Serialize};

// 最近打开的项目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentProject {
    pub path: String,
    pub name: String,
    pub opened_at: String,
}

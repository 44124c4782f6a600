use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    // 班组ID
    pub id: i64,
    // 班组名称（唯一）
    pub name: String,
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    // 科目ID
    pub id: i64,
    // 科目名称（唯一）
    pub name: String,
    // 授课教师，教师删除后为空
    pub teacher_id: Option<i64>,
}

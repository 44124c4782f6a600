use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    // 学生ID
    pub id: i64,
    // 名
    pub first_name: String,
    // 姓
    pub last_name: String,
    // 邮箱（唯一）
    pub email: String,
    // 电话
    pub phone: Option<String>,
    // 所属班组，班组删除后为空
    pub group_id: Option<i64>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

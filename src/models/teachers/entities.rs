use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    // 教师ID
    pub id: i64,
    // 名
    pub first_name: String,
    // 姓
    pub last_name: String,
    // 邮箱（唯一）
    pub email: String,
    // 电话
    pub phone: Option<String>,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

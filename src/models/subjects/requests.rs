use serde::Deserialize;

use crate::errors::Result;
use crate::utils::validate::validate_name;

// 创建科目请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
    pub teacher_id: Option<i64>,
}

impl CreateSubjectRequest {
    pub fn validate(&self) -> Result<()> {
        validate_name("subject name", &self.name, 150)
    }
}

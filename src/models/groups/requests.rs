use serde::Deserialize;

use crate::errors::Result;
use crate::utils::validate::validate_name;

// 创建班组请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

impl CreateGroupRequest {
    pub fn validate(&self) -> Result<()> {
        validate_name("group name", &self.name, 50)
    }
}

use serde::Deserialize;

use crate::errors::Result;
use crate::utils::validate::{validate_contact_email, validate_name, validate_phone};

// 创建学生请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub group_id: Option<i64>,
}

impl CreateStudentRequest {
    pub fn validate(&self) -> Result<()> {
        validate_name("first name", &self.first_name, 50)?;
        validate_name("last name", &self.last_name, 50)?;
        validate_contact_email(&self.email)?;
        validate_phone(self.phone.as_deref())
    }
}

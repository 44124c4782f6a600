use serde::Deserialize;

use crate::errors::Result;
use crate::utils::validate::{validate_contact_email, validate_name, validate_phone};

// 创建教师请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeacherRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl CreateTeacherRequest {
    pub fn validate(&self) -> Result<()> {
        validate_name("first name", &self.first_name, 50)?;
        validate_name("last name", &self.last_name, 50)?;
        validate_contact_email(&self.email)?;
        validate_phone(self.phone.as_deref())
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, SchoolError};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+()x. -]+$").expect("Invalid phone regex"));

/// 邮箱和电话列宽
const CONTACT_MAX_LEN: usize = 50;

pub fn validate_email(email: &str) -> std::result::Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 名称校验：去掉首尾空白后非空，且不超过列宽
pub fn validate_name(field: &str, value: &str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SchoolError::validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(SchoolError::validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// 学生、教师的联系邮箱校验
pub fn validate_contact_email(email: &str) -> Result<()> {
    if email.len() > CONTACT_MAX_LEN {
        return Err(SchoolError::validation(format!(
            "Email must be at most {CONTACT_MAX_LEN} characters"
        )));
    }
    validate_email(email).map_err(SchoolError::validation)
}

pub fn validate_phone(phone: Option<&str>) -> Result<()> {
    let Some(phone) = phone else {
        return Ok(());
    };
    if phone.len() > CONTACT_MAX_LEN {
        return Err(SchoolError::validation(format!(
            "Phone must be at most {CONTACT_MAX_LEN} characters"
        )));
    }
    if !PHONE_RE.is_match(phone) {
        return Err(SchoolError::validation("Phone format is invalid"));
    }
    Ok(())
}

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::{Result, SchoolError};

// 创建成绩请求
//
// date_received 由调用方显式给出，存储层不会补默认值。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub grade: f64,
    pub date_received: DateTime<Utc>,
}

impl CreateGradeRequest {
    /// 以当前时间作为获得时间
    pub fn received_now(student_id: i64, subject_id: i64, grade: f64) -> Self {
        Self {
            student_id,
            subject_id,
            grade,
            date_received: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.grade.is_finite() {
            return Err(SchoolError::validation(format!(
                "grade must be a finite number, got {}",
                self.grade
            )));
        }
        Ok(())
    }
}

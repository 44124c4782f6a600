use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    // 成绩ID
    pub id: i64,
    // 学生ID
    pub student_id: i64,
    // 科目ID
    pub subject_id: i64,
    // 分数
    pub grade: f64,
    // 获得时间
    pub date_received: chrono::DateTime<chrono::Utc>,
}

use chrono::{DateTime, Utc};
use serde::Serialize;

// 待插入的教师
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedTeacher {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

// 待插入的科目，teacher 为 SeedPlan::teachers 下标
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSubject {
    pub name: String,
    pub teacher: usize,
}

// 待插入的学生，group 为 SeedPlan::groups 下标
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub group: usize,
}

// 待插入的成绩，student/subject 为计划内下标
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedGrade {
    pub student: usize,
    pub subject: usize,
    pub grade: f64,
    pub date_received: DateTime<Utc>,
}

/// 一次填充的完整计划
///
/// 所有引用都是计划内的下标，插入时再解析为数据库 ID。
#[derive(Debug, Clone, PartialEq)]
pub struct SeedPlan {
    pub groups: Vec<String>,
    pub teachers: Vec<PlannedTeacher>,
    pub subjects: Vec<PlannedSubject>,
    pub students: Vec<PlannedStudent>,
    pub grades: Vec<PlannedGrade>,
}

// 填充结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub groups_created: u64,
    pub groups_reused: u64,
    pub teachers: u64,
    pub subjects: u64,
    pub students: u64,
    pub grades: u64,
}

use serde::Serialize;

use crate::models::students::entities::Student;

// 学生平均分
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAverage {
    pub student: Student,
    pub avg_grade: f64,
}

// 班组在某科目上的平均分
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAverage {
    pub group_name: String,
    pub avg_grade: f64,
}

// 班组内学生在某科目上的单条成绩
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentGrade {
    pub first_name: String,
    pub last_name: String,
    pub grade: f64,
}

// 各表行数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowCounts {
    pub groups: u64,
    pub teachers: u64,
    pub subjects: u64,
    pub students: u64,
    pub grades: u64,
}

// 报表查询参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportParams {
    pub subject_id: i64,
    pub group_id: i64,
    pub teacher_id: i64,
}

// 完整报表，依次对应七个查询
#[derive(Debug, Clone, Serialize)]
pub struct SchoolReport {
    pub params: ReportParams,
    pub top_students: Vec<StudentAverage>,
    pub top_student_in_subject: Option<StudentAverage>,
    pub group_averages_in_subject: Vec<GroupAverage>,
    pub overall_average: Option<f64>,
    pub teacher_subjects: Vec<String>,
    pub group_students: Vec<Student>,
    pub group_subject_grades: Vec<StudentGrade>,
}

use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::{
    grades::{entities::Grade, requests::CreateGradeRequest},
    groups::{entities::Group, requests::CreateGroupRequest},
    reports::responses::{GroupAverage, RowCounts, StudentAverage, StudentGrade},
    seed::entities::{SeedPlan, SeedSummary},
    students::{entities::Student, requests::CreateStudentRequest},
    subjects::{entities::Subject, requests::CreateSubjectRequest},
    teachers::{entities::Teacher, requests::CreateTeacherRequest},
};

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 班组管理方法
    // 创建班组
    async fn create_group(&self, group: CreateGroupRequest) -> Result<Group>;
    // 通过ID获取班组
    async fn get_group_by_id(&self, id: i64) -> Result<Option<Group>>;
    // 通过名称获取班组
    async fn get_group_by_name(&self, name: &str) -> Result<Option<Group>>;
    // 列出全部班组
    async fn list_groups(&self) -> Result<Vec<Group>>;
    // 删除班组（学生的 group_id 置空）
    async fn delete_group(&self, id: i64) -> Result<bool>;

    /// 教师管理方法
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;
    // 删除教师（科目的 teacher_id 置空）
    async fn delete_teacher(&self, id: i64) -> Result<bool>;

    /// 科目管理方法
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    // 删除科目（级联删除成绩）
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 学生管理方法
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn list_students(&self) -> Result<Vec<Student>>;
    // 删除学生（级联删除成绩）
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 成绩管理方法
    async fn create_grade(&self, grade: CreateGradeRequest) -> Result<Grade>;
    async fn list_grades(&self) -> Result<Vec<Grade>>;
    async fn list_grades_by_student(&self, student_id: i64) -> Result<Vec<Grade>>;

    // 各表行数
    async fn count_rows(&self) -> Result<RowCounts>;

    /// 报表查询（只读）
    // 1. 全部科目平均分最高的 5 名学生
    async fn top_students_by_average(&self) -> Result<Vec<StudentAverage>>;
    // 2. 某科目平均分最高的学生
    async fn top_student_in_subject(&self, subject_id: i64) -> Result<Option<StudentAverage>>;
    // 3. 某科目各班组平均分
    async fn group_averages_in_subject(&self, subject_id: i64) -> Result<Vec<GroupAverage>>;
    // 4. 全部成绩的平均分
    async fn overall_average_grade(&self) -> Result<Option<f64>>;
    // 5. 某教师教授的科目
    async fn subjects_taught_by(&self, teacher_id: i64) -> Result<Vec<String>>;
    // 6. 某班组的学生
    async fn students_in_group(&self, group_id: i64) -> Result<Vec<Student>>;
    // 7. 某班组学生在某科目上的成绩
    async fn group_subject_grades(
        &self,
        group_id: i64,
        subject_id: i64,
    ) -> Result<Vec<StudentGrade>>;

    /// 在单个事务内执行填充计划，失败时整体回滚
    async fn seed(&self, plan: SeedPlan) -> Result<SeedSummary>;

    /// 关闭连接池
    async fn close(&self) -> Result<()>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}

//! 报表查询
//!
//! 只读聚合查询，不做错误处理，数据库错误直接向上传递。

use super::SeaOrmStorage;
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::groups::{self, Column as GroupColumn, Entity as Groups};
use crate::entity::students::{self, Column as StudentColumn, Entity as Students};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::teachers::Entity as Teachers;
use crate::errors::Result;
use crate::models::reports::responses::{GroupAverage, RowCounts, StudentAverage, StudentGrade};
use crate::models::students::entities::Student;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};

/// 学生行 + 平均分
#[derive(Debug, FromQueryResult)]
struct StudentAverageRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    group_id: Option<i64>,
    avg_grade: f64,
}

impl StudentAverageRow {
    fn into_student_average(self) -> StudentAverage {
        StudentAverage {
            student: Student {
                id: self.id,
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                phone: self.phone,
                group_id: self.group_id,
            },
            avg_grade: self.avg_grade,
        }
    }
}

/// AVG(grades.grade)
fn avg_grade() -> SimpleExpr {
    Func::avg(Expr::col((Grades, GradeColumn::Grade))).into()
}

const TOP_STUDENTS_LIMIT: u64 = 5;

const STUDENT_COLUMNS: [StudentColumn; 6] = [
    StudentColumn::Id,
    StudentColumn::FirstName,
    StudentColumn::LastName,
    StudentColumn::Email,
    StudentColumn::Phone,
    StudentColumn::GroupId,
];

impl SeaOrmStorage {
    /// 全部科目平均分最高的 5 名学生，平均分相同按学生 ID 升序
    pub async fn top_students_by_average_impl(&self) -> Result<Vec<StudentAverage>> {
        let rows = Students::find()
            .select_only()
            .columns(STUDENT_COLUMNS)
            .column_as(avg_grade(), "avg_grade")
            .join(JoinType::InnerJoin, students::Relation::Grades.def())
            .group_by(StudentColumn::Id)
            .order_by_desc(avg_grade())
            .order_by_asc(StudentColumn::Id)
            .limit(TOP_STUDENTS_LIMIT)
            .into_model::<StudentAverageRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(StudentAverageRow::into_student_average)
            .collect())
    }

    /// 某科目平均分最高的学生
    pub async fn top_student_in_subject_impl(
        &self,
        subject_id: i64,
    ) -> Result<Option<StudentAverage>> {
        let row = Students::find()
            .select_only()
            .columns(STUDENT_COLUMNS)
            .column_as(avg_grade(), "avg_grade")
            .join(JoinType::InnerJoin, students::Relation::Grades.def())
            .filter(GradeColumn::SubjectId.eq(subject_id))
            .group_by(StudentColumn::Id)
            .order_by_desc(avg_grade())
            .order_by_asc(StudentColumn::Id)
            .limit(1u64)
            .into_model::<StudentAverageRow>()
            .one(&self.db)
            .await?;

        Ok(row.map(StudentAverageRow::into_student_average))
    }

    /// 某科目各班组的平均分，按班组名称排序
    pub async fn group_averages_in_subject_impl(
        &self,
        subject_id: i64,
    ) -> Result<Vec<GroupAverage>> {
        let rows = Groups::find()
            .select_only()
            .column(GroupColumn::Name)
            .column_as(avg_grade(), "avg_grade")
            .join(JoinType::InnerJoin, groups::Relation::Students.def())
            .join(JoinType::InnerJoin, students::Relation::Grades.def())
            .filter(GradeColumn::SubjectId.eq(subject_id))
            .group_by(GroupColumn::Id)
            .group_by(GroupColumn::Name)
            .order_by_asc(GroupColumn::Name)
            .into_tuple::<(String, f64)>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(group_name, avg_grade)| GroupAverage {
                group_name,
                avg_grade,
            })
            .collect())
    }

    /// 全部成绩的平均分，成绩表为空时返回 None
    pub async fn overall_average_grade_impl(&self) -> Result<Option<f64>> {
        let avg = Grades::find()
            .select_only()
            .column_as(avg_grade(), "avg_grade")
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await?
            .flatten();

        Ok(avg)
    }

    /// 某教师教授的科目名称
    pub async fn subjects_taught_by_impl(&self, teacher_id: i64) -> Result<Vec<String>> {
        let names = Subjects::find()
            .select_only()
            .column(SubjectColumn::Name)
            .filter(SubjectColumn::TeacherId.eq(teacher_id))
            .order_by_asc(SubjectColumn::Name)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;

        Ok(names)
    }

    /// 某班组的学生
    pub async fn students_in_group_impl(&self, group_id: i64) -> Result<Vec<Student>> {
        let students = Students::find()
            .filter(StudentColumn::GroupId.eq(group_id))
            .order_by_asc(StudentColumn::Id)
            .all(&self.db)
            .await?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 某班组学生在某科目上的全部成绩
    pub async fn group_subject_grades_impl(
        &self,
        group_id: i64,
        subject_id: i64,
    ) -> Result<Vec<StudentGrade>> {
        let rows = Students::find()
            .select_only()
            .column(StudentColumn::FirstName)
            .column(StudentColumn::LastName)
            .column(GradeColumn::Grade)
            .join(JoinType::InnerJoin, students::Relation::Grades.def())
            .filter(StudentColumn::GroupId.eq(group_id))
            .filter(GradeColumn::SubjectId.eq(subject_id))
            .order_by_asc(StudentColumn::Id)
            .order_by_asc(GradeColumn::Id)
            .into_tuple::<(String, String, f64)>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(first_name, last_name, grade)| StudentGrade {
                first_name,
                last_name,
                grade,
            })
            .collect())
    }

    /// 各表行数
    pub async fn count_rows_impl(&self) -> Result<RowCounts> {
        Ok(RowCounts {
            groups: Groups::find().count(&self.db).await?,
            teachers: Teachers::find().count(&self.db).await?,
            subjects: Subjects::find().count(&self.db).await?,
            students: Students::find().count(&self.db).await?,
            grades: Grades::find().count(&self.db).await?,
        })
    }
}

//! 填充数据存储操作
//!
//! 按依赖顺序插入：班组/教师 -> 科目/学生 -> 成绩，全部在同一事务中完成。

use super::SeaOrmStorage;
use super::groups::find_group_by_name;
use crate::entity::prelude::{
    GradeActiveModel, Grades, GroupActiveModel, StudentActiveModel, SubjectActiveModel,
    TeacherActiveModel,
};
use crate::errors::{Result, SchoolError};
use crate::models::groups::requests::CreateGroupRequest;
use crate::models::seed::entities::{SeedPlan, SeedSummary};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::teachers::requests::CreateTeacherRequest;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, EntityTrait, Set, TransactionTrait};
use tracing::{debug, error, info};

/// 每批插入的成绩行数
const GRADE_BATCH_SIZE: usize = 100;

impl SeaOrmStorage {
    /// 执行填充计划，任何错误都会回滚整个事务
    pub async fn seed_impl(&self, plan: SeedPlan) -> Result<SeedSummary> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        match Self::apply_seed_plan(&txn, &plan).await {
            Ok(summary) => {
                txn.commit()
                    .await
                    .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;
                info!(
                    "Seed committed: {} groups created ({} reused), {} teachers, {} subjects, {} students, {} grades",
                    summary.groups_created,
                    summary.groups_reused,
                    summary.teachers,
                    summary.subjects,
                    summary.students,
                    summary.grades
                );
                Ok(summary)
            }
            Err(e) => {
                error!("填充数据失败，回滚事务: {e}");
                if let Err(rollback_err) = txn.rollback().await {
                    error!("回滚事务失败: {rollback_err}");
                }
                Err(e)
            }
        }
    }

    async fn apply_seed_plan(txn: &DatabaseTransaction, plan: &SeedPlan) -> Result<SeedSummary> {
        let mut summary = SeedSummary::default();

        // 班组：已存在的名称直接复用
        let mut group_ids = Vec::with_capacity(plan.groups.len());
        for name in &plan.groups {
            CreateGroupRequest { name: name.clone() }.validate()?;

            let existing = find_group_by_name(txn, name).await?;

            let id = match existing {
                Some(group) => {
                    debug!("Group '{}' already exists, reusing id {}", name, group.id);
                    summary.groups_reused += 1;
                    group.id
                }
                None => {
                    let group = GroupActiveModel {
                        name: Set(name.clone()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    summary.groups_created += 1;
                    group.id
                }
            };
            group_ids.push(id);
        }

        // 教师
        let mut teacher_ids = Vec::with_capacity(plan.teachers.len());
        for teacher in &plan.teachers {
            CreateTeacherRequest {
                first_name: teacher.first_name.clone(),
                last_name: teacher.last_name.clone(),
                email: teacher.email.clone(),
                phone: teacher.phone.clone(),
            }
            .validate()?;

            let model = TeacherActiveModel {
                first_name: Set(teacher.first_name.clone()),
                last_name: Set(teacher.last_name.clone()),
                email: Set(teacher.email.clone()),
                phone: Set(teacher.phone.clone()),
                ..Default::default()
            }
            .insert(txn)
            .await?;
            teacher_ids.push(model.id);
        }
        summary.teachers = teacher_ids.len() as u64;

        // 科目
        let mut subject_ids = Vec::with_capacity(plan.subjects.len());
        for subject in &plan.subjects {
            let teacher_id = resolve(&teacher_ids, subject.teacher, "teacher")?;
            CreateSubjectRequest {
                name: subject.name.clone(),
                teacher_id: Some(teacher_id),
            }
            .validate()?;

            let model = SubjectActiveModel {
                name: Set(subject.name.clone()),
                teacher_id: Set(Some(teacher_id)),
                ..Default::default()
            }
            .insert(txn)
            .await?;
            subject_ids.push(model.id);
        }
        summary.subjects = subject_ids.len() as u64;

        // 学生
        let mut student_ids = Vec::with_capacity(plan.students.len());
        for student in &plan.students {
            let group_id = resolve(&group_ids, student.group, "group")?;
            CreateStudentRequest {
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
                email: student.email.clone(),
                phone: student.phone.clone(),
                group_id: Some(group_id),
            }
            .validate()?;

            let model = StudentActiveModel {
                first_name: Set(student.first_name.clone()),
                last_name: Set(student.last_name.clone()),
                email: Set(student.email.clone()),
                phone: Set(student.phone.clone()),
                group_id: Set(Some(group_id)),
                ..Default::default()
            }
            .insert(txn)
            .await?;
            student_ids.push(model.id);
        }
        summary.students = student_ids.len() as u64;

        // 成绩：分批插入
        for batch in plan.grades.chunks(GRADE_BATCH_SIZE) {
            let mut models = Vec::with_capacity(batch.len());
            for grade in batch {
                models.push(GradeActiveModel {
                    student_id: Set(resolve(&student_ids, grade.student, "student")?),
                    subject_id: Set(resolve(&subject_ids, grade.subject, "subject")?),
                    grade: Set(grade.grade),
                    date_received: Set(grade.date_received.timestamp()),
                    ..Default::default()
                });
            }
            Grades::insert_many(models).exec(txn).await?;
            summary.grades += batch.len() as u64;
        }

        Ok(summary)
    }
}

/// 将计划内下标解析为已插入行的 ID
fn resolve(ids: &[i64], index: usize, kind: &str) -> Result<i64> {
    ids.get(index).copied().ok_or_else(|| {
        SchoolError::seed(format!(
            "seed plan references {kind} #{index}, but only {} were inserted",
            ids.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::groups::requests::CreateGroupRequest;
    use crate::models::reports::responses::RowCounts;
    use crate::models::seed::entities::{
        PlannedGrade, PlannedStudent, PlannedSubject, PlannedTeacher, SeedPlan,
    };
    use chrono::Utc;

    fn small_plan() -> SeedPlan {
        let now = Utc::now();
        SeedPlan {
            groups: vec!["1-CS".to_string(), "3-CS".to_string()],
            teachers: vec![PlannedTeacher {
                first_name: "Frances".to_string(),
                last_name: "Allen".to_string(),
                email: "frances.allen@example.edu".to_string(),
                phone: None,
            }],
            subjects: vec![
                PlannedSubject {
                    name: "Compilers".to_string(),
                    teacher: 0,
                },
                PlannedSubject {
                    name: "Operating Systems".to_string(),
                    teacher: 0,
                },
            ],
            students: (0..3)
                .map(|i| PlannedStudent {
                    first_name: format!("Student{i}"),
                    last_name: "Seeded".to_string(),
                    email: format!("student{i}@example.edu"),
                    phone: Some("+1-555-000-0000".to_string()),
                    group: i % 2,
                })
                .collect(),
            grades: (0..250)
                .map(|i| PlannedGrade {
                    student: i % 3,
                    subject: i % 2,
                    grade: 60.0 + (i % 41) as f64,
                    date_received: now,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_seed_inserts_everything_in_batches() {
        let storage = memory_storage().await;

        let summary = storage.seed_impl(small_plan()).await.unwrap();

        assert_eq!(summary.groups_created, 2);
        assert_eq!(summary.groups_reused, 0);
        assert_eq!(summary.grades, 250);
        assert_eq!(
            storage.count_rows_impl().await.unwrap(),
            RowCounts {
                groups: 2,
                teachers: 1,
                subjects: 2,
                students: 3,
                grades: 250,
            }
        );
    }

    #[tokio::test]
    async fn test_seed_reuses_existing_group_names() {
        let storage = memory_storage().await;
        let existing = storage
            .create_group_impl(CreateGroupRequest {
                name: "1-CS".to_string(),
            })
            .await
            .unwrap();

        let summary = storage.seed_impl(small_plan()).await.unwrap();

        assert_eq!(summary.groups_created, 1);
        assert_eq!(summary.groups_reused, 1);
        let members = storage.students_in_group_impl(existing.id).await.unwrap();
        assert_eq!(members.len(), 2);
    }

    #[tokio::test]
    async fn test_seed_rolls_back_on_bad_reference() {
        let storage = memory_storage().await;
        let mut plan = small_plan();
        plan.grades.push(PlannedGrade {
            student: 42,
            subject: 0,
            grade: 70.0,
            date_received: Utc::now(),
        });

        let err = storage.seed_impl(plan).await.unwrap_err();

        assert_eq!(err.code(), "E007");
        assert_eq!(storage.count_rows_impl().await.unwrap(), RowCounts::default());
    }

    #[tokio::test]
    async fn test_seed_rolls_back_on_constraint_violation() {
        let storage = memory_storage().await;
        let mut plan = small_plan();
        plan.students[2].email = plan.students[0].email.clone();

        let err = storage.seed_impl(plan).await.unwrap_err();

        assert_eq!(err.code(), "E003");
        assert_eq!(storage.count_rows_impl().await.unwrap(), RowCounts::default());
    }
}

//! 成绩存储操作

use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{Result, SchoolError};
use crate::models::grades::{entities::Grade, requests::CreateGradeRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建成绩
    pub async fn create_grade_impl(&self, req: CreateGradeRequest) -> Result<Grade> {
        req.validate()?;

        let model = ActiveModel {
            student_id: Set(req.student_id),
            subject_id: Set(req.subject_id),
            grade: Set(req.grade),
            date_received: Set(req.date_received.timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建成绩失败: {e}")))?;

        result.into_grade()
    }

    /// 列出全部成绩
    pub async fn list_grades_impl(&self) -> Result<Vec<Grade>> {
        let grades = Grades::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩列表失败: {e}")))?;

        grades.into_iter().map(|m| m.into_grade()).collect()
    }

    /// 列出某学生的成绩，按获得时间排序
    pub async fn list_grades_by_student_impl(&self, student_id: i64) -> Result<Vec<Grade>> {
        let grades = Grades::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::DateReceived)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生成绩失败: {e}")))?;

        grades.into_iter().map(|m| m.into_grade()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use super::ActiveModel;
    use crate::models::grades::requests::CreateGradeRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::subjects::requests::CreateSubjectRequest;
    use chrono::{TimeZone, Utc};
    use sea_orm::{ActiveModelTrait, Set};

    #[tokio::test]
    async fn test_grade_keeps_caller_supplied_date() {
        let storage = memory_storage().await;
        let student = storage
            .create_student_impl(CreateStudentRequest {
                first_name: "Edsger".to_string(),
                last_name: "Dijkstra".to_string(),
                email: "edsger@example.edu".to_string(),
                phone: None,
                group_id: None,
            })
            .await
            .unwrap();
        let subject = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Data Structures and Algorithms".to_string(),
                teacher_id: None,
            })
            .await
            .unwrap();
        let received = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();

        let grade = storage
            .create_grade_impl(CreateGradeRequest {
                student_id: student.id,
                subject_id: subject.id,
                grade: 88.5,
                date_received: received,
            })
            .await
            .unwrap();

        assert_eq!(grade.date_received, received);
        assert_eq!(grade.grade, 88.5);
        assert_eq!(
            storage.list_grades_by_student_impl(student.id).await.unwrap(),
            vec![grade]
        );
    }

    #[tokio::test]
    async fn test_grade_requires_existing_student_and_subject() {
        let storage = memory_storage().await;

        let err = storage
            .create_grade_impl(CreateGradeRequest::received_now(1, 1, 90.0))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");
        assert!(storage.list_grades_impl().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_date_is_reported() {
        let storage = memory_storage().await;
        let student = storage
            .create_student_impl(CreateStudentRequest {
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                email: "grace@example.edu".to_string(),
                phone: None,
                group_id: None,
            })
            .await
            .unwrap();
        let subject = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Compilers".to_string(),
                teacher_id: None,
            })
            .await
            .unwrap();

        // 绕过请求校验直接写入无法转换的时间戳
        ActiveModel {
            student_id: Set(student.id),
            subject_id: Set(subject.id),
            grade: Set(70.0),
            date_received: Set(i64::MAX),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();

        let err = storage.list_grades_impl().await.unwrap_err();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("日期超出范围"));
        assert!(storage.list_grades_by_student_impl(student.id).await.is_err());
    }

    #[tokio::test]
    async fn test_non_finite_grade_is_rejected() {
        let storage = memory_storage().await;

        let err = storage
            .create_grade_impl(CreateGradeRequest::received_now(1, 1, f64::NAN))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
    }
}

//! 科目存储操作

use super::SeaOrmStorage;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{Result, SchoolError};
use crate::models::subjects::{entities::Subject, requests::CreateSubjectRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        req.validate()?;

        let model = ActiveModel {
            name: Set(req.name),
            teacher_id: Set(req.teacher_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    /// 通过 ID 获取科目
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 列出全部科目
    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 删除科目，成绩由外键级联删除
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::grades::requests::CreateGradeRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::subjects::requests::CreateSubjectRequest;

    #[tokio::test]
    async fn test_subject_without_teacher() {
        let storage = memory_storage().await;

        let subject = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Operating Systems".to_string(),
                teacher_id: None,
            })
            .await
            .unwrap();

        assert_eq!(subject.teacher_id, None);
        assert_eq!(storage.list_subjects_impl().await.unwrap(), vec![subject]);
    }

    #[tokio::test]
    async fn test_subject_with_unknown_teacher_is_rejected() {
        let storage = memory_storage().await;

        let err = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Computer Networks".to_string(),
                teacher_id: Some(404),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");
    }

    #[tokio::test]
    async fn test_delete_subject_removes_its_grades() {
        let storage = memory_storage().await;
        let student = storage
            .create_student_impl(CreateStudentRequest {
                first_name: "Alan".to_string(),
                last_name: "Turing".to_string(),
                email: "alan@example.edu".to_string(),
                phone: None,
                group_id: None,
            })
            .await
            .unwrap();
        let doomed = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Artificial Intelligence".to_string(),
                teacher_id: None,
            })
            .await
            .unwrap();
        let kept = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Software Engineering".to_string(),
                teacher_id: None,
            })
            .await
            .unwrap();

        for (subject_id, grade) in [(doomed.id, 70.0), (doomed.id, 90.0), (kept.id, 80.0)] {
            storage
                .create_grade_impl(CreateGradeRequest::received_now(student.id, subject_id, grade))
                .await
                .unwrap();
        }

        assert!(storage.delete_subject_impl(doomed.id).await.unwrap());

        let remaining = storage.list_grades_impl().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|g| g.subject_id == kept.id));
    }
}

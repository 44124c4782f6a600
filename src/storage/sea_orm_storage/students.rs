//! 学生存储操作

use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SchoolError};
use crate::models::students::{entities::Student, requests::CreateStudentRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        req.validate()?;

        let model = ActiveModel {
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            phone: Set(req.phone),
            group_id: Set(req.group_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 列出全部学生
    pub async fn list_students_impl(&self) -> Result<Vec<Student>> {
        let students = Students::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 删除学生，成绩由外键级联删除
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::grades::requests::CreateGradeRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::subjects::requests::CreateSubjectRequest;

    fn student_request(email: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            first_name: "Barbara".to_string(),
            last_name: "Liskov".to_string(),
            email: email.to_string(),
            phone: None,
            group_id: None,
        }
    }

    #[tokio::test]
    async fn test_student_email_is_unique() {
        let storage = memory_storage().await;

        let first = storage
            .create_student_impl(student_request("barbara@example.edu"))
            .await
            .unwrap();
        assert_eq!(first.full_name(), "Barbara Liskov");

        let err = storage
            .create_student_impl(student_request("barbara@example.edu"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");
        assert_eq!(storage.list_students_impl().await.unwrap(), vec![first]);
    }

    #[tokio::test]
    async fn test_student_with_unknown_group_is_rejected() {
        let storage = memory_storage().await;

        let err = storage
            .create_student_impl(CreateStudentRequest {
                group_id: Some(77),
                ..student_request("barbara@example.edu")
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");
    }

    #[tokio::test]
    async fn test_delete_student_removes_their_grades() {
        let storage = memory_storage().await;
        let doomed = storage
            .create_student_impl(student_request("doomed@example.edu"))
            .await
            .unwrap();
        let kept = storage
            .create_student_impl(student_request("kept@example.edu"))
            .await
            .unwrap();
        let subject = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Database Management Systems".to_string(),
                teacher_id: None,
            })
            .await
            .unwrap();

        for (student_id, grade) in [(doomed.id, 61.0), (doomed.id, 99.0), (kept.id, 75.0)] {
            storage
                .create_grade_impl(CreateGradeRequest::received_now(student_id, subject.id, grade))
                .await
                .unwrap();
        }

        assert!(storage.delete_student_impl(doomed.id).await.unwrap());

        assert!(
            storage
                .list_grades_by_student_impl(doomed.id)
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            storage
                .list_grades_by_student_impl(kept.id)
                .await
                .unwrap()
                .len(),
            1
        );
    }
}

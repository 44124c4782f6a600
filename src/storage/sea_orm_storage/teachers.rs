//! 教师存储操作

use super::SeaOrmStorage;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{Result, SchoolError};
use crate::models::teachers::{entities::Teacher, requests::CreateTeacherRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        req.validate()?;

        let model = ActiveModel {
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            phone: Set(req.phone),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 列出全部教师
    pub async fn list_teachers_impl(&self) -> Result<Vec<Teacher>> {
        let teachers = Teachers::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(teachers.into_iter().map(|m| m.into_teacher()).collect())
    }

    /// 删除教师
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = Teachers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::subjects::requests::CreateSubjectRequest;
    use crate::models::teachers::requests::CreateTeacherRequest;

    fn teacher_request(email: &str) -> CreateTeacherRequest {
        CreateTeacherRequest {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: email.to_string(),
            phone: Some("+1-555-010-2030".to_string()),
        }
    }

    #[tokio::test]
    async fn test_teacher_crud() {
        let storage = memory_storage().await;

        let teacher = storage
            .create_teacher_impl(teacher_request("grace@example.edu"))
            .await
            .unwrap();
        assert_eq!(teacher.full_name(), "Grace Hopper");
        assert_eq!(
            storage.get_teacher_by_id_impl(teacher.id).await.unwrap(),
            Some(teacher.clone())
        );
        assert_eq!(storage.list_teachers_impl().await.unwrap().len(), 1);

        assert!(storage.delete_teacher_impl(teacher.id).await.unwrap());
        assert!(storage.get_teacher_by_id_impl(teacher.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected_before_insert() {
        let storage = memory_storage().await;

        let err = storage
            .create_teacher_impl(teacher_request("grace-at-example"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
        assert!(storage.list_teachers_impl().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_teacher_nulls_subject_teacher() {
        let storage = memory_storage().await;
        let teacher = storage
            .create_teacher_impl(teacher_request("grace@example.edu"))
            .await
            .unwrap();
        let subject = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Compilers".to_string(),
                teacher_id: Some(teacher.id),
            })
            .await
            .unwrap();

        assert!(storage.delete_teacher_impl(teacher.id).await.unwrap());

        let reloaded = storage
            .get_subject_by_id_impl(subject.id)
            .await
            .unwrap()
            .expect("subject survives teacher deletion");
        assert_eq!(reloaded.teacher_id, None);
    }
}

//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub grade: f64,
    pub date_received: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id",
        on_delete = "Cascade"
    )]
    Subject,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    /// date_received 超出 chrono 可表示范围时返回错误
    pub fn into_grade(self) -> crate::errors::Result<crate::models::grades::entities::Grade> {
        use chrono::{DateTime, Utc};

        let date_received =
            DateTime::<Utc>::from_timestamp(self.date_received, 0).ok_or_else(|| {
                crate::errors::SchoolError::database_operation(format!(
                    "成绩 {} 的日期超出范围: {}",
                    self.id, self.date_received
                ))
            })?;

        Ok(crate::models::grades::entities::Grade {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            grade: self.grade,
            date_received,
        })
    }
}

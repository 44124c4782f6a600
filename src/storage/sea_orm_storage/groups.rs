//! 班组存储操作

use super::SeaOrmStorage;
use crate::entity::groups::{ActiveModel, Column, Entity as Groups};
use crate::errors::{Result, SchoolError};
use crate::models::groups::{entities::Group, requests::CreateGroupRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建班组
    pub async fn create_group_impl(&self, req: CreateGroupRequest) -> Result<Group> {
        req.validate()?;

        let model = ActiveModel {
            name: Set(req.name),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建班组失败: {e}")))?;

        Ok(result.into_group())
    }

    /// 通过 ID 获取班组
    pub async fn get_group_by_id_impl(&self, id: i64) -> Result<Option<Group>> {
        let result = Groups::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班组失败: {e}")))?;

        Ok(result.map(|m| m.into_group()))
    }

    /// 通过名称获取班组
    pub async fn get_group_by_name_impl(&self, name: &str) -> Result<Option<Group>> {
        find_group_by_name(&self.db, name).await
    }

    /// 列出全部班组
    pub async fn list_groups_impl(&self) -> Result<Vec<Group>> {
        let groups = Groups::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班组列表失败: {e}")))?;

        Ok(groups.into_iter().map(|m| m.into_group()).collect())
    }

    /// 删除班组
    pub async fn delete_group_impl(&self, id: i64) -> Result<bool> {
        let result = Groups::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除班组失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

/// 按名称查找班组，连接和事务均可
pub(super) async fn find_group_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<Option<Group>> {
    let result = Groups::find()
        .filter(Column::Name.eq(name))
        .one(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询班组失败: {e}")))?;

    Ok(result.map(|m| m.into_group()))
}

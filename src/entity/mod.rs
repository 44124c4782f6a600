//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! 实体之间只保存外键字段，不互相持有对象引用。

pub mod prelude;

pub mod grades;
pub mod groups;
pub mod students;
pub mod subjects;
pub mod teachers;

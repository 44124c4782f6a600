//! School Records - 学校数据模型与报表工具
//!
//! 基于 SeaORM 的班组、学生、教师、科目、成绩数据模型，提供七个只读报表查询
//! 以及确定性的测试数据填充。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `runtime`: 运行时生命周期管理
//! - `services`: 报表与填充逻辑
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

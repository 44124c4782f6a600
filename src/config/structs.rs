use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub seed: SeedConfig,
    pub report: ReportConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub environment: String,
    pub log_level: String,
}

/// 数据库配置
///
/// `url` 非空时直接使用；否则由 host/port/user/password/name 拼出 PostgreSQL URL。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing, default)] // 不输出密码
    pub password: String,
    pub name: String,
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 填充数据配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub random_seed: u64,
    pub teacher_count: usize,
    pub student_count: usize,
    pub min_grades_per_student: u32,
    pub max_grades_per_student: u32,
    pub history_days: i64, // 成绩日期回溯天数
}

/// 报表配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub format: String, // "table" 或 "json"
    pub subject_id: i64,
    pub group_id: i64,
    pub teacher_id: i64,
}

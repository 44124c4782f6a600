use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::{AppConfig, DatabaseConfig, SeedConfig};
use crate::errors::{Result, SchoolError};

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 成绩日期窗口上限（天）
const MAX_HISTORY_DAYS: i64 = 36_500;

impl AppConfig {
    /// 加载配置
    pub fn load() -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 内置默认值，保证无配置文件时也能启动
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("database.url", "")?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "")?
            .set_default("database.name", "school")?
            .set_default("database.pool_size", 5)?
            .set_default("database.timeout", 30)?
            .set_default("seed.random_seed", 42)?
            .set_default("seed.teacher_count", 5)?
            .set_default("seed.student_count", 100)?
            .set_default("seed.min_grades_per_student", 10)?
            .set_default("seed.max_grades_per_student", 20)?
            .set_default("seed.history_days", 180)?
            .set_default("report.format", "table")?
            .set_default("report.subject_id", 1)?
            .set_default("report.group_id", 1)?
            .set_default("report.teacher_id", 1)?
            // 加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("SCHOOL")
                    .separator("__")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("database.host", std::env::var("POSTGRES_HOST").ok())?
            .set_override_option("database.port", std::env::var("POSTGRES_PORT").ok())?
            .set_override_option("database.user", std::env::var("POSTGRES_USER").ok())?
            .set_override_option(
                "database.password",
                std::env::var("POSTGRES_PASSWORD").ok(),
            )?
            .set_override_option("database.name", std::env::var("POSTGRES_DB").ok())?
            .set_override_option("seed.random_seed", std::env::var("SEED_RANDOM_SEED").ok())?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> std::result::Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }
}

impl DatabaseConfig {
    /// 获取连接 URL
    pub fn connection_url(&self) -> String {
        if !self.url.trim().is_empty() {
            return self.url.trim().to_string();
        }
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }
}

impl SeedConfig {
    /// 校验填充参数
    pub fn validate(&self) -> Result<()> {
        if self.teacher_count == 0 || self.student_count == 0 {
            return Err(SchoolError::validation(
                "seed.teacher_count and seed.student_count must be positive",
            ));
        }
        if self.min_grades_per_student > self.max_grades_per_student {
            return Err(SchoolError::validation(format!(
                "seed.min_grades_per_student ({}) exceeds seed.max_grades_per_student ({})",
                self.min_grades_per_student, self.max_grades_per_student
            )));
        }
        if !(0..=MAX_HISTORY_DAYS).contains(&self.history_days) {
            return Err(SchoolError::validation(format!(
                "seed.history_days must be between 0 and {MAX_HISTORY_DAYS}"
            )));
        }
        Ok(())
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            random_seed: 42,
            teacher_count: 5,
            student_count: 100,
            min_grades_per_student: 10,
            max_grades_per_student: 20,
            history_days: 180,
        }
    }
}

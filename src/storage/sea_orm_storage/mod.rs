//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod grades;
mod groups;
mod reports;
mod seed;
mod students;
mod subjects;
mod teachers;

use crate::config::DatabaseConfig;
use crate::errors::{Result, SchoolError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{debug, info};

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 建立连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.connection_url())?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::migration(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", Self::redact_url(&db_url));

        Ok(Self { db })
    }

    /// SQLite 专用连接（外键约束 + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000");
        }

        // 内存库只能共享同一个连接
        let max_connections = if in_memory { 1 } else { config.pool_size };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        debug!("SQLite pool ready (max_connections = {})", max_connections);

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径",
                Self::redact_url(url)
            )))
        }
    }

    /// 日志中隐藏密码
    fn redact_url(url: &str) -> String {
        match (url.find("://"), url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                let credentials = &url[scheme_end + 3..at];
                match credentials.find(':') {
                    Some(colon) => format!(
                        "{}{}:***{}",
                        &url[..scheme_end + 3],
                        &credentials[..colon],
                        &url[at..]
                    ),
                    None => url.to_string(),
                }
            }
            _ => url.to_string(),
        }
    }

    /// 关闭连接池
    pub async fn close_impl(&self) -> Result<()> {
        self.db
            .clone()
            .close()
            .await
            .map_err(|e| SchoolError::database_connection(format!("关闭数据库连接失败: {e}")))
    }
}

// Storage trait 实现
use crate::models::{
    grades::{entities::Grade, requests::CreateGradeRequest},
    groups::{entities::Group, requests::CreateGroupRequest},
    reports::responses::{GroupAverage, RowCounts, StudentAverage, StudentGrade},
    seed::entities::{SeedPlan, SeedSummary},
    students::{entities::Student, requests::CreateStudentRequest},
    subjects::{entities::Subject, requests::CreateSubjectRequest},
    teachers::{entities::Teacher, requests::CreateTeacherRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 班组模块
    async fn create_group(&self, group: CreateGroupRequest) -> Result<Group> {
        self.create_group_impl(group).await
    }

    async fn get_group_by_id(&self, id: i64) -> Result<Option<Group>> {
        self.get_group_by_id_impl(id).await
    }

    async fn get_group_by_name(&self, name: &str) -> Result<Option<Group>> {
        self.get_group_by_name_impl(name).await
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        self.list_groups_impl().await
    }

    async fn delete_group(&self, id: i64) -> Result<bool> {
        self.delete_group_impl(id).await
    }

    // 教师模块
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(teacher).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.list_teachers_impl().await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    // 科目模块
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        self.list_students_impl().await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 成绩模块
    async fn create_grade(&self, grade: CreateGradeRequest) -> Result<Grade> {
        self.create_grade_impl(grade).await
    }

    async fn list_grades(&self) -> Result<Vec<Grade>> {
        self.list_grades_impl().await
    }

    async fn list_grades_by_student(&self, student_id: i64) -> Result<Vec<Grade>> {
        self.list_grades_by_student_impl(student_id).await
    }

    async fn count_rows(&self) -> Result<RowCounts> {
        self.count_rows_impl().await
    }

    // 报表模块
    async fn top_students_by_average(&self) -> Result<Vec<StudentAverage>> {
        self.top_students_by_average_impl().await
    }

    async fn top_student_in_subject(&self, subject_id: i64) -> Result<Option<StudentAverage>> {
        self.top_student_in_subject_impl(subject_id).await
    }

    async fn group_averages_in_subject(&self, subject_id: i64) -> Result<Vec<GroupAverage>> {
        self.group_averages_in_subject_impl(subject_id).await
    }

    async fn overall_average_grade(&self) -> Result<Option<f64>> {
        self.overall_average_grade_impl().await
    }

    async fn subjects_taught_by(&self, teacher_id: i64) -> Result<Vec<String>> {
        self.subjects_taught_by_impl(teacher_id).await
    }

    async fn students_in_group(&self, group_id: i64) -> Result<Vec<Student>> {
        self.students_in_group_impl(group_id).await
    }

    async fn group_subject_grades(
        &self,
        group_id: i64,
        subject_id: i64,
    ) -> Result<Vec<StudentGrade>> {
        self.group_subject_grades_impl(group_id, subject_id).await
    }

    // 填充模块
    async fn seed(&self, plan: SeedPlan) -> Result<SeedSummary> {
        self.seed_impl(plan).await
    }

    async fn close(&self) -> Result<()> {
        self.close_impl().await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::config::DatabaseConfig;

    /// 已迁移的内存 SQLite 存储
    pub(crate) async fn memory_storage() -> SeaOrmStorage {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            host: String::new(),
            port: 0,
            user: String::new(),
            password: String::new(),
            name: String::new(),
            pool_size: 1,
            timeout: 5,
        };
        SeaOrmStorage::connect(&config)
            .await
            .expect("in-memory storage should connect and migrate")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("school.db").unwrap(),
            "sqlite://school.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgresql://u:p@localhost:5432/school").unwrap(),
            "postgresql://u:p@localhost:5432/school"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("ftp://u:p@host/x")
                .unwrap_err()
                .code(),
            "E001"
        );
    }

    #[test]
    fn test_redact_url_hides_password() {
        assert_eq!(
            SeaOrmStorage::redact_url("postgresql://school:secret@db:5432/records"),
            "postgresql://school:***@db:5432/records"
        );
        assert_eq!(
            SeaOrmStorage::redact_url("sqlite::memory:"),
            "sqlite::memory:"
        );
    }

    #[tokio::test]
    async fn test_connect_runs_migrations() {
        let storage = test_support::memory_storage().await;
        let counts = storage.count_rows_impl().await.unwrap();
        assert_eq!(counts, RowCounts::default());
        storage.close_impl().await.unwrap();
    }
}

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::SeedService;
use super::generator::generate_plan;
use crate::config::SeedConfig;
use crate::errors::Result;
use crate::models::seed::entities::SeedSummary;

pub async fn run_seed(
    service: &SeedService,
    config: &SeedConfig,
    now: DateTime<Utc>,
) -> Result<SeedSummary> {
    let storage = service.get_storage();

    let plan = generate_plan(config, now)?;
    info!(
        "Seed plan generated (random_seed = {}): {} groups, {} teachers, {} subjects, {} students, {} grades",
        config.random_seed,
        plan.groups.len(),
        plan.teachers.len(),
        plan.subjects.len(),
        plan.students.len(),
        plan.grades.len()
    );

    // 失败时存储层已记录日志并回滚
    let summary = storage.seed(plan).await?;

    // 数据已提交，完整性检查失败只记录日志
    if let Err(e) = service.verify_integrity().await {
        warn!("Integrity check after seeding failed: {e}");
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;
    use crate::models::reports::responses::RowCounts;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 10, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_seed_fresh_database() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = SeedService::new(storage.clone());
        let config = SeedConfig::default();

        let summary = service.run_at(&config, fixed_now()).await.unwrap();
        let expected_grades = generate_plan(&config, fixed_now()).unwrap().grades.len() as u64;

        assert_eq!(summary.groups_created, 2);
        assert_eq!(summary.groups_reused, 0);
        assert_eq!(summary.teachers, 5);
        assert_eq!(summary.subjects, 7);
        assert_eq!(summary.students, 100);
        assert_eq!(summary.grades, expected_grades);

        let counts = storage.count_rows().await.unwrap();
        assert_eq!(
            counts,
            RowCounts {
                groups: 2,
                teachers: 5,
                subjects: 7,
                students: 100,
                grades: expected_grades,
            }
        );

        let index = service.verify_integrity().await.unwrap();
        assert!(index.dangling_grades().is_empty());
        assert!(index.ungrouped_students().is_empty());
        for student in storage.list_students().await.unwrap() {
            let count = index.grades_of_student(student.id).len();
            assert!((10..=20).contains(&count));
        }
    }

    #[tokio::test]
    async fn test_seed_twice_fails_and_keeps_first_batch() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = SeedService::new(storage.clone());
        let config = SeedConfig::default();

        service.run_at(&config, fixed_now()).await.unwrap();
        let before = storage.count_rows().await.unwrap();

        // 科目名称和邮箱唯一，第二次填充整体回滚
        let err = service.run_at(&config, fixed_now()).await.unwrap_err();
        assert_eq!(err.code(), "E003");
        assert_eq!(storage.count_rows().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_seed_succeeds_when_integrity_check_fails_after_commit() {
        use crate::entity::grades::ActiveModel as GradeActiveModel;
        use crate::models::students::requests::CreateStudentRequest;
        use crate::models::subjects::requests::CreateSubjectRequest;
        use sea_orm::{ActiveModelTrait, Set};

        let concrete = memory_storage().await;
        let student = concrete
            .create_student_impl(CreateStudentRequest {
                first_name: "Alan".to_string(),
                last_name: "Turing".to_string(),
                email: "alan@example.edu".to_string(),
                phone: None,
                group_id: None,
            })
            .await
            .unwrap();
        let subject = concrete
            .create_subject_impl(CreateSubjectRequest {
                name: "Computability".to_string(),
                teacher_id: None,
            })
            .await
            .unwrap();
        // 无法转换的日期让 list_grades 失败
        GradeActiveModel {
            student_id: Set(student.id),
            subject_id: Set(subject.id),
            grade: Set(65.0),
            date_received: Set(i64::MAX),
            ..Default::default()
        }
        .insert(&concrete.db)
        .await
        .unwrap();

        let storage: Arc<dyn Storage> = Arc::new(concrete);
        let service = SeedService::new(storage.clone());

        assert!(service.verify_integrity().await.is_err());

        let summary = service
            .run_at(&SeedConfig::default(), fixed_now())
            .await
            .unwrap();
        assert_eq!(summary.students, 100);
        assert_eq!(storage.count_rows().await.unwrap().students, 101);
    }

    #[tokio::test]
    async fn test_seed_rejects_invalid_config_without_writing() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = SeedService::new(storage.clone());
        let config = SeedConfig {
            min_grades_per_student: 5,
            max_grades_per_student: 1,
            ..SeedConfig::default()
        };

        assert!(service.run_at(&config, fixed_now()).await.is_err());
        assert_eq!(storage.count_rows().await.unwrap(), RowCounts::default());
    }
}

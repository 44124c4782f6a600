//! 填充计划生成
//!
//! 纯函数：相同的 (random_seed, now) 总是得到相同的计划。

use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SeedConfig;
use crate::errors::Result;
use crate::models::seed::entities::{
    PlannedGrade, PlannedStudent, PlannedSubject, PlannedTeacher, SeedPlan,
};

/// 班组名称，重复项只创建一次
pub const GROUP_NAMES: [&str; 3] = ["1-CS", "1-CS", "3-CS"];

pub const SUBJECT_NAMES: [&str; 7] = [
    "Introduction to Programming",
    "Data Structures and Algorithms",
    "Computer Networks",
    "Database Management Systems",
    "Software Engineering",
    "Operating Systems",
    "Artificial Intelligence",
];

pub const MIN_SCORE: u32 = 60;
pub const MAX_SCORE: u32 = 100;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White",
];

const STUDENT_EMAIL_DOMAIN: &str = "students.example.edu";
const TEACHER_EMAIL_DOMAIN: &str = "faculty.example.edu";

/// 生成完整的填充计划
pub fn generate_plan(config: &SeedConfig, now: DateTime<Utc>) -> Result<SeedPlan> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.random_seed);

    let groups = unique_group_names();

    let teachers = (0..config.teacher_count)
        .map(|i| {
            let (first_name, last_name) = random_name(&mut rng);
            PlannedTeacher {
                email: contact_email(&first_name, &last_name, i, TEACHER_EMAIL_DOMAIN),
                phone: Some(random_phone(&mut rng)),
                first_name,
                last_name,
            }
        })
        .collect();

    let subjects = SUBJECT_NAMES
        .iter()
        .map(|name| PlannedSubject {
            name: (*name).to_string(),
            teacher: rng.random_range(0..config.teacher_count),
        })
        .collect();

    let students = (0..config.student_count)
        .map(|i| {
            let (first_name, last_name) = random_name(&mut rng);
            PlannedStudent {
                email: contact_email(&first_name, &last_name, i, STUDENT_EMAIL_DOMAIN),
                phone: Some(random_phone(&mut rng)),
                first_name,
                last_name,
                group: rng.random_range(0..groups.len()),
            }
        })
        .collect();

    let window_start = now - TimeDelta::days(config.history_days);
    let mut grades = Vec::new();
    for student in 0..config.student_count {
        let count =
            rng.random_range(config.min_grades_per_student..=config.max_grades_per_student);
        for _ in 0..count {
            let subject = rng.random_range(0..SUBJECT_NAMES.len());
            let score = rng.random_range(MIN_SCORE..=MAX_SCORE);
            let offset = rng.random_range(0..=config.history_days);
            grades.push(PlannedGrade {
                student,
                subject,
                grade: f64::from(score),
                date_received: window_start + TimeDelta::days(offset),
            });
        }
    }

    Ok(SeedPlan {
        groups,
        teachers,
        subjects,
        students,
        grades,
    })
}

/// 按出现顺序去重
fn unique_group_names() -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(GROUP_NAMES.len());
    for name in GROUP_NAMES {
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn random_name(rng: &mut StdRng) -> (String, String) {
    let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
    (first.to_string(), last.to_string())
}

// 序号保证同一批次内邮箱唯一
fn contact_email(first_name: &str, last_name: &str, index: usize, domain: &str) -> String {
    format!(
        "{}.{}{}@{}",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        index + 1,
        domain
    )
}

fn random_phone(rng: &mut StdRng) -> String {
    format!(
        "+1-555-{:03}-{:04}",
        rng.random_range(0..1000u32),
        rng.random_range(0..10000u32)
    )
}
